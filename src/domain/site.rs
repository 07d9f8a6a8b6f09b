//! The site model
//!
//! The model owns every context record, indexed by [`ContextPath`], plus
//! the designated global record's path and its ordered member list. The
//! upstream implementation expressed the same relationships as mutable
//! back-pointers (`_global` / `_contexts`) on the context objects
//! themselves; here the star topology is a single owned structure with
//! id-based lookup, which keeps the model cycle-free and serializable.

use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::context::Context;
use super::path::ContextPath;

/// The designated global context and its ordered member collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlobalLink {
    pub path: ContextPath,
    pub members: Vec<ContextPath>,
}

/// Pairs a context with the template that renders it.
#[derive(Debug, Clone, PartialEq)]
pub struct Link {
    pub context: ContextPath,
    pub template: PathBuf,
}

/// The full content model of one site build.
///
/// Records live in a `BTreeMap` so every traversal runs in sorted-key
/// order, making plugin effects deterministic within and across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SiteModel {
    #[serde(rename = "contexts")]
    records: BTreeMap<ContextPath, Context>,

    #[serde(skip_serializing_if = "Option::is_none")]
    global: Option<GlobalLink>,
}

impl SiteModel {
    /// Creates an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, returning the previous one under the same key.
    pub fn insert(&mut self, path: ContextPath, context: Context) -> Option<Context> {
        self.records.insert(path, context)
    }

    /// Looks up a record by path.
    pub fn get(&self, path: &ContextPath) -> Option<&Context> {
        self.records.get(path)
    }

    /// Looks up a record mutably.
    pub fn get_mut(&mut self, path: &ContextPath) -> Option<&mut Context> {
        self.records.get_mut(path)
    }

    /// Returns true if a record exists under the given path.
    pub fn contains(&self, path: &ContextPath) -> bool {
        self.records.contains_key(path)
    }

    /// Number of records in the store.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates record paths in sorted order.
    pub fn paths(&self) -> impl Iterator<Item = &ContextPath> {
        self.records.keys()
    }

    /// Iterates records in sorted-key order.
    pub fn iter(&self) -> impl Iterator<Item = (&ContextPath, &Context)> {
        self.records.iter()
    }

    /// Iterates records mutably in sorted-key order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&ContextPath, &mut Context)> {
        self.records.iter_mut()
    }

    /// Returns the global linkage established by injection, if any.
    pub fn global(&self) -> Option<&GlobalLink> {
        self.global.as_ref()
    }

    /// Returns the global linkage mutably.
    pub fn global_mut(&mut self) -> Option<&mut GlobalLink> {
        self.global.as_mut()
    }

    /// Records the global linkage.
    pub fn set_global(&mut self, link: GlobalLink) {
        self.global = Some(link);
    }
}
