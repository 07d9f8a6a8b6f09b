//! Content context records

use serde::Serialize;
use serde_json::{Map, Value};

use super::path::ContextPath;

/// One page's worth of content data.
///
/// The record wraps the raw JSON object loaded from a content file. The
/// `global` id is set by the inject-globals plugin and serialized as
/// `_global` in the render handoff.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Context {
    #[serde(flatten)]
    data: Map<String, Value>,

    #[serde(rename = "_global", skip_serializing_if = "Option::is_none")]
    global: Option<ContextPath>,
}

impl Context {
    /// Wraps a JSON object as a context record.
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data, global: None }
    }

    /// Gets a data value by key.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.data.get(key)
    }

    /// Sets a data value, returning the previous one if present.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.data.insert(key.into(), value.into())
    }

    /// Returns the underlying data object.
    pub fn data(&self) -> &Map<String, Value> {
        &self.data
    }

    /// Returns the global context this record is linked to, if any.
    pub fn global(&self) -> Option<&ContextPath> {
        self.global.as_ref()
    }

    /// Links this record to the designated global context.
    pub fn set_global(&mut self, global: ContextPath) {
        self.global = Some(global);
    }

    /// Returns the raw `date` value when present and non-null.
    pub fn date(&self) -> Option<&Value> {
        self.data.get("date").filter(|value| !value.is_null())
    }
}
