//! # Storage Layer
//!
//! Everything that touches the site on disk before the pipeline runs.
//!
//! ## Inputs
//!
//! | Data | Format | Location |
//! |------|--------|----------|
//! | Descriptor | JSON | `<site>/kiln.json` |
//! | Contexts | JSON (one object per file) | `<metadata>/*.json` |
//! | Templates | text | `<theme>/templates/*.tpl` |
//!
//! ## Flow
//!
//! [`SiteDescriptor::load`] reads the descriptor,
//! [`BuildOptions::from_descriptor`] resolves it into concrete paths and
//! linking rules, and [`load_contexts`] builds the in-memory store plus
//! the Link records the pipeline consumes. Descriptor and content errors
//! are fatal before any plugin runs.
//!
//! ## Key Types
//!
//! - [`SiteDescriptor`] - The parsed `kiln.json`
//! - [`BuildOptions`] - Resolved template paths, globs, and rules
//! - [`LinkingRule`] - Maps context keys to their template

mod contexts;
mod descriptor;
mod options;

pub use contexts::{load_contexts, StoreError};
pub use descriptor::{DescriptorError, SiteDescriptor, DESCRIPTOR_FILE};
pub use options::{BuildOptions, LinkingRule};
