//! Display formatting of `date` fields
//!
//! Rewrites every context's `date` to a string rendered with a chrono
//! strftime pattern. The rewrite is lossy: the formatted string need not
//! re-parse to the same instant, so the pipeline runs this stage at most
//! once, after sorting.

use chrono::format::{Item, StrftimeItems};
use std::fmt::Write;

use super::{Plugin, PluginError};
use crate::domain::{Link, RawDate, SiteModel};

/// Default pattern: weekday, month day year, 12-hour time.
pub const DEFAULT_DATE_FORMAT: &str = "%A, %B %-d %Y %-I:%M %p";

/// Rewrites raw `date` values as display strings.
#[derive(Debug, Clone)]
pub struct FormatDates {
    format: String,
}

impl FormatDates {
    /// Creates the plugin with the given strftime pattern.
    pub fn new(format: impl Into<String>) -> Self {
        Self {
            format: format.into(),
        }
    }

    /// Parses the pattern once, rejecting unknown specifiers.
    fn items(&self) -> Result<Vec<Item<'_>>, PluginError> {
        let items: Vec<Item<'_>> = StrftimeItems::new(&self.format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(PluginError::BadFormat(self.format.clone()));
        }
        Ok(items)
    }
}

impl Default for FormatDates {
    fn default() -> Self {
        Self::new(DEFAULT_DATE_FORMAT)
    }
}

impl Plugin for FormatDates {
    fn name(&self) -> &str {
        "format-dates"
    }

    fn run(&self, site: &mut SiteModel, _links: &[Link]) -> Result<(), PluginError> {
        let items = self.items()?;

        let mut formatted = Vec::new();
        for (path, record) in site.iter() {
            let Some(value) = record.date() else {
                continue;
            };

            let instant = RawDate::from_value(value)
                .and_then(|raw| raw.normalize())
                .map_err(|source| PluginError::InvalidDate {
                    path: path.clone(),
                    source,
                })?;

            let mut display = String::new();
            write!(display, "{}", instant.format_with_items(items.iter()))
                .map_err(|_| PluginError::BadFormat(self.format.clone()))?;
            formatted.push((path.clone(), display));
        }

        for (path, display) in formatted {
            if let Some(record) = site.get_mut(&path) {
                record.insert("date", display);
            }
        }

        Ok(())
    }
}
