//! Domain models for kiln
//!
//! Contains the site content model without any I/O concerns.

mod context;
mod date;
mod path;
mod site;

pub use context::Context;
pub use date::{DateError, DateFields, MonthField, RawDate};
pub use path::{ContextPath, PathError};
pub use site::{GlobalLink, Link, SiteModel};
