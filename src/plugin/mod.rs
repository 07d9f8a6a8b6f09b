//! # Plugin System
//!
//! Processing stages that run over the shared site model between content
//! loading and rendering.
//!
//! ## Built-in Plugins
//!
//! | Plugin | Purpose |
//! |--------|---------|
//! | [`InjectGlobals`] | Link every context to the designated global context |
//! | [`SortByDate`] | Order the global member collection reverse-chronologically |
//! | [`FormatDates`] | Rewrite `date` fields to display strings |
//!
//! ## Contract
//!
//! Each plugin receives the full site model by exclusive reference plus
//! the Link records derived from the descriptor's linking rules, and
//! signals completion through its `Result`. The [`Pipeline`] driver runs
//! plugins strictly in registration order and short-circuits on the
//! first failure; a failed run makes no partial-output promises.
//!
//! ## Ordering
//!
//! [`Pipeline::for_site`] registers the canonical order
//! InjectGlobals → SortByDate → FormatDates. The sorter parses raw
//! `date` values, so it must run before the formatter rewrites them to
//! strings; the driver fixes this by construction.

mod dates;
mod driver;
mod globals;
mod sort;

pub use dates::{FormatDates, DEFAULT_DATE_FORMAT};
pub use driver::{Pipeline, PipelineError};
pub use globals::InjectGlobals;
pub use sort::SortByDate;

use thiserror::Error;

use crate::domain::{ContextPath, DateError, Link, SiteModel};

#[derive(Debug, Error)]
pub enum PluginError {
    #[error("global context not found: {0}")]
    GlobalNotFound(ContextPath),

    #[error("context {0} is not linked to a global context")]
    NotLinked(ContextPath),

    #[error("context {path}: invalid date")]
    InvalidDate {
        path: ContextPath,
        #[source]
        source: DateError,
    },

    #[error("invalid date format pattern: '{0}'")]
    BadFormat(String),

    #[error("no links available to locate the global collection")]
    NoLinks,
}

/// One stage in the content-processing pipeline.
pub trait Plugin {
    /// Stage name, used in logs and error reports.
    fn name(&self) -> &str;

    /// Runs the stage against the shared model.
    fn run(&self, site: &mut SiteModel, links: &[Link]) -> Result<(), PluginError>;
}
