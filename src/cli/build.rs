//! The `build` command
//!
//! Runs the full flow: descriptor, options, content store, pipeline, and
//! finally the processed-model handoff at `<build>/site.json`.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::info;

use super::output::Output;
use crate::domain::{Link, SiteModel};
use crate::plugin::Pipeline;
use crate::storage::{load_contexts, BuildOptions, SiteDescriptor};

/// Everything a site build produces in memory.
#[derive(Debug)]
pub(super) struct Processed {
    pub options: BuildOptions,
    pub site: SiteModel,
    pub links: Vec<Link>,
}

/// Loads a site rooted at `path` and runs the pipeline over it.
///
/// The root is canonicalized first so that glob results strip back to
/// the same relative keys the options layer produced.
pub(super) fn process(path: &Path) -> Result<Processed> {
    let root = path
        .canonicalize()
        .with_context(|| format!("Site root not found: {}", path.display()))?;

    let descriptor = SiteDescriptor::load(&root)?;
    let options = BuildOptions::from_descriptor(&root, &descriptor)?;

    let (mut site, links) = load_contexts(&root, &options)?;
    info!(
        contexts = site.len(),
        links = links.len(),
        "content store loaded"
    );

    let pipeline = Pipeline::for_site(options.globals.clone(), options.date_format.clone());
    pipeline.run(&mut site, &links)?;

    Ok(Processed {
        options,
        site,
        links,
    })
}

pub fn run(output: &Output, path: &Path) -> Result<()> {
    let processed = process(path)?;

    fs::create_dir_all(&processed.options.dest).with_context(|| {
        format!(
            "Failed to create build directory: {}",
            processed.options.dest.display()
        )
    })?;

    let site_path = processed.options.dest.join("site.json");
    let content = serde_json::to_string_pretty(&processed.site)
        .context("Failed to serialize processed site model")?;
    fs::write(&site_path, content)
        .with_context(|| format!("Failed to write site model: {}", site_path.display()))?;

    info!(site = %site_path.display(), "site model written");

    if output.is_json() {
        output.data(&serde_json::json!({
            "contexts": processed.site.len(),
            "links": processed.links.len(),
            "site": site_path.display().to_string(),
        }));
    } else {
        output.success(&format!(
            "Built {} contexts to {}",
            processed.site.len(),
            site_path.display()
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn site_fixture() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("metadata")).unwrap();
        fs::write(
            dir.path().join("kiln.json"),
            json!({
                "theme": "theme",
                "metadata": "metadata",
                "build": "build",
                "globals": "metadata/global.json",
                "dateFormat": "%Y-%m-%d"
            })
            .to_string(),
        )
        .unwrap();
        fs::write(
            dir.path().join("metadata/global.json"),
            json!({"title": "My Site"}).to_string(),
        )
        .unwrap();
        fs::write(
            dir.path().join("metadata/alpha.json"),
            json!({"title": "alpha", "date": "2020-01-01"}).to_string(),
        )
        .unwrap();
        fs::write(
            dir.path().join("metadata/beta.json"),
            json!({"title": "beta", "date": 1_592_179_200_000i64}).to_string(),
        )
        .unwrap();
        dir
    }

    #[test]
    fn process_sorts_and_formats() {
        let dir = site_fixture();
        let processed = process(dir.path()).unwrap();

        let members: Vec<&str> = processed
            .site
            .global()
            .unwrap()
            .members
            .iter()
            .map(|p| p.as_str())
            .collect();
        // beta's epoch is 2020-06-15, later than alpha
        assert_eq!(members, ["metadata/beta.json", "metadata/alpha.json"]);

        assert_eq!(
            processed
                .site
                .get(&"metadata/beta.json".parse().unwrap())
                .unwrap()
                .get("date"),
            Some(&json!("2020-06-15"))
        );
    }

    #[test]
    fn process_fails_without_global_context() {
        let dir = site_fixture();
        fs::remove_file(dir.path().join("metadata/global.json")).unwrap();

        let err = process(dir.path()).unwrap_err();
        assert!(err.to_string().contains("inject-globals"));
    }

    #[test]
    fn process_fails_on_missing_root() {
        let err = process(Path::new("/nonexistent/site")).unwrap_err();
        assert!(err.to_string().contains("Site root not found"));
    }
}
