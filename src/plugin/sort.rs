//! Reverse-chronological ordering of the global collection
//!
//! The sorter locates the global member list through the first Link
//! record, normalizes every member's raw `date`, and reorders the list
//! latest-first. It must run before date formatting: once `date` holds a
//! display string, raw-date comparison is no longer possible.

use super::{Plugin, PluginError};
use crate::domain::{ContextPath, DateError, Link, RawDate, SiteModel};

/// Orders the global member collection by descending date.
#[derive(Debug, Clone, Default)]
pub struct SortByDate;

impl SortByDate {
    pub fn new() -> Self {
        Self
    }

    /// Resolves the global path reachable from the first link.
    fn global_path(site: &SiteModel, links: &[Link]) -> Result<ContextPath, PluginError> {
        let first = links.first().ok_or(PluginError::NoLinks)?;
        let record = site
            .get(&first.context)
            .ok_or_else(|| PluginError::NotLinked(first.context.clone()))?;

        if let Some(global) = record.global() {
            return Ok(global.clone());
        }

        // The first link may point at the global context itself, which
        // carries no back-link of its own.
        match site.global() {
            Some(link) if link.path == first.context => Ok(link.path.clone()),
            _ => Err(PluginError::NotLinked(first.context.clone())),
        }
    }
}

impl Plugin for SortByDate {
    fn name(&self) -> &str {
        "sort-by-date"
    }

    fn run(&self, site: &mut SiteModel, links: &[Link]) -> Result<(), PluginError> {
        let global_path = Self::global_path(site, links)?;

        let members = match site.global() {
            Some(link) if link.path == global_path => link.members.clone(),
            _ => return Err(PluginError::GlobalNotFound(global_path)),
        };

        // Normalize every date up front so a parse failure surfaces as
        // InvalidDate naming the context, not as an arbitrary partial
        // order.
        let mut keyed = Vec::with_capacity(members.len());
        for path in members {
            let record = site
                .get(&path)
                .ok_or_else(|| PluginError::NotLinked(path.clone()))?;
            let value = record.date().ok_or_else(|| PluginError::InvalidDate {
                path: path.clone(),
                source: DateError::Missing,
            })?;
            let instant = RawDate::from_value(value)
                .and_then(|raw| raw.normalize())
                .map_err(|source| PluginError::InvalidDate {
                    path: path.clone(),
                    source,
                })?;
            keyed.push((instant, path));
        }

        // Stable sort: equal instants keep their relative order.
        keyed.sort_by(|a, b| b.0.cmp(&a.0));

        if let Some(link) = site.global_mut() {
            link.members = keyed.into_iter().map(|(_, path)| path).collect();
        }

        Ok(())
    }
}
