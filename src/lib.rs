//! Kiln - A JSON-metadata static site pipeline
//!
//! Kiln reads a site descriptor (`kiln.json`), loads per-context JSON
//! metadata into a shared model, and runs an ordered plugin pipeline
//! over it: global context injection, reverse-chronological sorting,
//! and date formatting. The processed model is written out for the
//! rendering stage.

pub mod domain;
pub mod storage;
pub mod plugin;
pub mod cli;

pub use domain::{Context, ContextPath, Link, SiteModel};
