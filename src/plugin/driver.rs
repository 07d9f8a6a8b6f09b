//! Sequential pipeline driver
//!
//! Runs registered plugins strictly in order against the shared model,
//! stopping at the first failure. There is no parallelism: each stage
//! exclusively borrows the model for the duration of its turn.

use thiserror::Error;
use tracing::{debug, error};

use super::{FormatDates, InjectGlobals, Plugin, PluginError, SortByDate};
use crate::domain::{ContextPath, Link, SiteModel};

/// A plugin failure, attributed to its stage.
#[derive(Debug, Error)]
#[error("plugin '{stage}' failed")]
pub struct PipelineError {
    pub stage: String,
    #[source]
    pub source: PluginError,
}

/// An ordered list of processing stages.
#[derive(Default)]
pub struct Pipeline {
    plugins: Vec<Box<dyn Plugin>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a stage, preserving registration order.
    pub fn register(mut self, plugin: Box<dyn Plugin>) -> Self {
        self.plugins.push(plugin);
        self
    }

    /// Builds the canonical site pipeline:
    /// inject-globals → sort-by-date → format-dates.
    ///
    /// The sorter compares raw `date` values, so it must precede the
    /// formatter; registration order encodes that dependency.
    pub fn for_site(globals: ContextPath, date_format: impl Into<String>) -> Self {
        Self::new()
            .register(Box::new(InjectGlobals::new(globals)))
            .register(Box::new(SortByDate::new()))
            .register(Box::new(FormatDates::new(date_format)))
    }

    /// Stage names in execution order.
    pub fn stages(&self) -> Vec<&str> {
        self.plugins.iter().map(|plugin| plugin.name()).collect()
    }

    /// Runs every stage in order, short-circuiting on the first error.
    pub fn run(&self, site: &mut SiteModel, links: &[Link]) -> Result<(), PipelineError> {
        for plugin in &self.plugins {
            debug!(stage = plugin.name(), "running plugin");
            plugin.run(site, links).map_err(|source| {
                error!(stage = plugin.name(), error = %source, "plugin failed");
                PipelineError {
                    stage: plugin.name().to_string(),
                    source,
                }
            })?;
        }
        Ok(())
    }
}
