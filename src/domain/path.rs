//! Canonical context identifiers
//!
//! Every context in the site model is keyed by a `ContextPath`: a
//! `/`-separated path relative to the site root, normalized once at
//! construction. The descriptor's globals path and the store loader both
//! go through the same normalization, so lookups never have to guess
//! which base a key was produced under.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path};
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("path is empty after normalization: '{0}'")]
    Empty(String),

    #[error("path is not relative to the site root: '{0}'")]
    NotRelative(String),

    #[error("path escapes the site root: '{0}'")]
    EscapesRoot(String),
}

/// Normalized, `/`-separated path identifying one context.
///
/// Ordered so that sorted-key traversal of the store is deterministic
/// within and across runs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContextPath(String);

impl ContextPath {
    /// Normalizes a site-root-relative path into a canonical key.
    ///
    /// `./` segments are dropped and `..` segments are resolved
    /// lexically; a path that climbs out of the site root is rejected.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, PathError> {
        let path = path.as_ref();
        let mut segments: Vec<String> = Vec::new();

        for component in path.components() {
            match component {
                Component::Normal(part) => segments.push(part.to_string_lossy().into_owned()),
                Component::CurDir => {}
                Component::ParentDir => {
                    if segments.pop().is_none() {
                        return Err(PathError::EscapesRoot(path.display().to_string()));
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(PathError::NotRelative(path.display().to_string()));
                }
            }
        }

        if segments.is_empty() {
            return Err(PathError::Empty(path.display().to_string()));
        }

        Ok(Self(segments.join("/")))
    }

    /// Normalizes an on-disk path against the site root.
    pub fn relative_to(root: &Path, path: &Path) -> Result<Self, PathError> {
        let relative = path
            .strip_prefix(root)
            .map_err(|_| PathError::NotRelative(path.display().to_string()))?;

        Self::new(relative)
    }

    /// Returns the normalized path as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContextPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContextPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ContextPath {
    type Error = PathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ContextPath> for String {
    fn from(path: ContextPath) -> Self {
        path.0
    }
}
