//! Context store loading
//!
//! Expands the contexts glob, parses each matching file as a JSON object,
//! and keys it by its normalized site-relative path. Loading is
//! deterministic: glob results come back sorted and the store itself is
//! keyed by ordered paths.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use thiserror::Error;
use tracing::debug;

use super::BuildOptions;
use crate::domain::{Context, ContextPath, Link, SiteModel};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Invalid contexts pattern: {0}")]
    BadPattern(String),

    #[error("Invalid JSON in {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Context root is not a JSON object: {0}")]
    NotAnObject(PathBuf),
}

/// Loads every context file selected by the options and derives the Link
/// records from the linking rules.
///
/// `root` must be the same site root the options were built from, so
/// that on-disk paths strip back to canonical store keys.
pub fn load_contexts(root: &Path, options: &BuildOptions) -> Result<(SiteModel, Vec<Link>)> {
    let mut site = SiteModel::new();

    let entries = glob::glob(&options.contexts_pattern)
        .map_err(|e| StoreError::BadPattern(e.to_string()))?;

    for entry in entries {
        let file = entry.context("Failed to walk contexts directory")?;
        let record = read_context(&file)?;

        let path = ContextPath::relative_to(root, &file)
            .with_context(|| format!("Context file outside site root: {}", file.display()))?;

        debug!(context = %path, "loaded context");
        site.insert(path, record);
    }

    let links = derive_links(&site, options);

    Ok((site, links))
}

/// Parses one context file, requiring a JSON object at the root.
fn read_context(file: &Path) -> Result<Context> {
    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read context file: {}", file.display()))?;

    let value: serde_json::Value =
        serde_json::from_str(&content).map_err(|e| StoreError::Parse {
            path: file.to_path_buf(),
            message: e.to_string(),
        })?;

    match value {
        serde_json::Value::Object(map) => Ok(Context::new(map)),
        _ => Err(StoreError::NotAnObject(file.to_path_buf()).into()),
    }
}

/// One Link per store key matching a linking rule, first rule wins.
fn derive_links(site: &SiteModel, options: &BuildOptions) -> Vec<Link> {
    site.paths()
        .filter_map(|path| {
            options
                .linking_rules
                .iter()
                .find(|rule| rule.matches(path))
                .map(|rule| Link {
                    context: path.clone(),
                    template: rule.template.clone(),
                })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::SiteDescriptor;
    use tempfile::TempDir;

    fn site_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("metadata")).unwrap();
        fs::write(
            dir.path().join("metadata/global.json"),
            r#"{"title": "My Site"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("metadata/alpha.json"),
            r#"{"title": "alpha", "date": "2020-01-01"}"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("metadata/beta.json"),
            r#"{"title": "beta", "date": "2021-06-01"}"#,
        )
        .unwrap();
        dir
    }

    fn options_for(dir: &TempDir) -> BuildOptions {
        let descriptor = SiteDescriptor {
            theme: PathBuf::from("theme"),
            metadata: PathBuf::from("metadata"),
            build: PathBuf::from("build"),
            globals: PathBuf::from("metadata/global.json"),
            date_format: None,
        };
        BuildOptions::from_descriptor(dir.path(), &descriptor).unwrap()
    }

    #[test]
    fn loads_every_matching_file() {
        let dir = site_fixture();
        let (site, _) = load_contexts(dir.path(), &options_for(&dir)).unwrap();

        let keys: Vec<&str> = site.paths().map(ContextPath::as_str).collect();
        assert_eq!(
            keys,
            [
                "metadata/alpha.json",
                "metadata/beta.json",
                "metadata/global.json"
            ]
        );
        assert_eq!(
            site.get(&"metadata/alpha.json".parse().unwrap())
                .unwrap()
                .get("title"),
            Some(&serde_json::json!("alpha"))
        );
    }

    #[test]
    fn non_json_files_are_ignored() {
        let dir = site_fixture();
        fs::write(dir.path().join("metadata/notes.txt"), "not metadata").unwrap();

        let (site, _) = load_contexts(dir.path(), &options_for(&dir)).unwrap();
        assert_eq!(site.len(), 3);
    }

    #[test]
    fn every_loaded_context_gets_a_link() {
        let dir = site_fixture();
        let options = options_for(&dir);
        let (_, links) = load_contexts(dir.path(), &options).unwrap();

        // the global file matches metadata/*.json like any other context
        let contexts: Vec<&str> = links.iter().map(|l| l.context.as_str()).collect();
        assert_eq!(
            contexts,
            [
                "metadata/alpha.json",
                "metadata/beta.json",
                "metadata/global.json"
            ]
        );
        assert!(links
            .iter()
            .all(|l| l.template.ends_with("theme/templates/post.tpl")));
    }

    #[test]
    fn malformed_json_names_the_file() {
        let dir = site_fixture();
        fs::write(dir.path().join("metadata/bad.json"), "{ nope").unwrap();

        let err = load_contexts(dir.path(), &options_for(&dir)).unwrap_err();
        let store_err = err.downcast::<StoreError>().unwrap();

        assert!(matches!(
            store_err,
            StoreError::Parse { ref path, .. } if path.ends_with("metadata/bad.json")
        ));
    }

    #[test]
    fn array_root_is_rejected() {
        let dir = site_fixture();
        fs::write(dir.path().join("metadata/list.json"), r#"[1, 2, 3]"#).unwrap();

        let err = load_contexts(dir.path(), &options_for(&dir)).unwrap_err();
        let store_err = err.downcast::<StoreError>().unwrap();

        assert!(matches!(
            store_err,
            StoreError::NotAnObject(ref path) if path.ends_with("metadata/list.json")
        ));
    }

    #[test]
    fn empty_metadata_dir_yields_empty_store() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("metadata")).unwrap();

        let (site, links) = load_contexts(dir.path(), &options_for(&dir)).unwrap();
        assert!(site.is_empty());
        assert!(links.is_empty());
    }
}
