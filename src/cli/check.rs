//! The `check` command
//!
//! Validates a site without writing anything: same descriptor, store,
//! and pipeline work as `build`, minus the handoff.

use std::path::Path;

use anyhow::Result;

use super::build;
use super::output::Output;

pub fn run(output: &Output, path: &Path) -> Result<()> {
    let processed = build::process(path)?;

    if output.is_json() {
        output.data(&serde_json::json!({
            "contexts": processed.site.len(),
            "links": processed.links.len(),
        }));
    } else {
        output.success(&format!(
            "Checked {} contexts ({} linked), pipeline clean",
            processed.site.len(),
            processed.links.len()
        ));
    }

    Ok(())
}
