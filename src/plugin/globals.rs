//! Global context injection
//!
//! Establishes the linkage between the designated global context and
//! every other context in the store: the model's global member list gets
//! one entry per non-global context, and each non-global context gets
//! the global's id.

use super::{Plugin, PluginError};
use crate::domain::{ContextPath, GlobalLink, Link, SiteModel};

/// Links every context to the designated global context.
#[derive(Debug, Clone)]
pub struct InjectGlobals {
    globals: ContextPath,
}

impl InjectGlobals {
    /// Creates the plugin for the given (already normalized) global path.
    pub fn new(globals: ContextPath) -> Self {
        Self { globals }
    }
}

impl Plugin for InjectGlobals {
    fn name(&self) -> &str {
        "inject-globals"
    }

    fn run(&self, site: &mut SiteModel, _links: &[Link]) -> Result<(), PluginError> {
        // Existence is checked before any record is touched, so a missing
        // global leaves the model exactly as it was.
        if !site.contains(&self.globals) {
            return Err(PluginError::GlobalNotFound(self.globals.clone()));
        }

        let members: Vec<ContextPath> = site
            .paths()
            .filter(|path| **path != self.globals)
            .cloned()
            .collect();

        for path in &members {
            if let Some(record) = site.get_mut(path) {
                record.set_global(self.globals.clone());
            }
        }

        site.set_global(GlobalLink {
            path: self.globals.clone(),
            members,
        });

        Ok(())
    }
}
