//! Site descriptor handling
//!
//! A site is described by a single JSON file, `kiln.json`, at its root.
//! The descriptor is the entire configuration surface: there is no global
//! config file and no environment override.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;
use thiserror::Error;

/// Descriptor file name, resolved against the site root.
pub const DESCRIPTOR_FILE: &str = "kiln.json";

#[derive(Debug, Error)]
pub enum DescriptorError {
    #[error("Invalid JSON in {path}: {message}")]
    InvalidJson { path: PathBuf, message: String },
}

/// The parsed `kiln.json` descriptor.
///
/// All path fields are relative to the site root. A malformed descriptor
/// is fatal before any content is read.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteDescriptor {
    /// Theme directory holding `templates/` and `static/`.
    pub theme: PathBuf,

    /// Directory of per-context JSON metadata files.
    pub metadata: PathBuf,

    /// Build output directory.
    pub build: PathBuf,

    /// The designated global context file.
    pub globals: PathBuf,

    /// strftime pattern for the date formatter stage.
    #[serde(default)]
    pub date_format: Option<String>,
}

impl SiteDescriptor {
    /// Loads `kiln.json` from the given site root.
    pub fn load(site_root: &Path) -> Result<Self> {
        let path = site_root.join(DESCRIPTOR_FILE);

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read site descriptor: {}", path.display()))?;

        Self::parse(&content, &path)
    }

    /// Parses descriptor content, attributing errors to its path.
    fn parse(content: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| {
            DescriptorError::InvalidJson {
                path: path.to_path_buf(),
                message: e.to_string(),
            }
            .into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn parse_full_descriptor() {
        let json = r#"{
            "theme": "theme",
            "metadata": "metadata",
            "build": "build",
            "globals": "metadata/global.json",
            "dateFormat": "%Y-%m-%d"
        }"#;

        let descriptor = SiteDescriptor::parse(json, Path::new("kiln.json")).unwrap();
        assert_eq!(descriptor.theme, PathBuf::from("theme"));
        assert_eq!(descriptor.metadata, PathBuf::from("metadata"));
        assert_eq!(descriptor.build, PathBuf::from("build"));
        assert_eq!(descriptor.globals, PathBuf::from("metadata/global.json"));
        assert_eq!(descriptor.date_format.as_deref(), Some("%Y-%m-%d"));
    }

    #[test]
    fn date_format_is_optional() {
        let json = r#"{
            "theme": "theme",
            "metadata": "metadata",
            "build": "build",
            "globals": "metadata/global.json"
        }"#;

        let descriptor = SiteDescriptor::parse(json, Path::new("kiln.json")).unwrap();
        assert!(descriptor.date_format.is_none());
    }

    #[test]
    fn invalid_json_names_the_file() {
        let err = SiteDescriptor::parse("{ not json", Path::new("site/kiln.json")).unwrap_err();
        let descriptor_err = err.downcast::<DescriptorError>().unwrap();

        assert!(matches!(
            descriptor_err,
            DescriptorError::InvalidJson { ref path, .. } if path == Path::new("site/kiln.json")
        ));
    }

    #[test]
    fn missing_field_is_invalid_json() {
        let err = SiteDescriptor::parse(r#"{"theme": "theme"}"#, Path::new("kiln.json"))
            .unwrap_err();
        assert!(err.downcast_ref::<DescriptorError>().is_some());
    }

    #[test]
    fn load_reads_from_site_root() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(DESCRIPTOR_FILE),
            r#"{"theme": "t", "metadata": "m", "build": "b", "globals": "m/g.json"}"#,
        )
        .unwrap();

        let descriptor = SiteDescriptor::load(dir.path()).unwrap();
        assert_eq!(descriptor.theme, PathBuf::from("t"));
    }

    #[test]
    fn load_fails_without_descriptor() {
        let dir = TempDir::new().unwrap();
        let err = SiteDescriptor::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("Failed to read site descriptor"));
    }
}
