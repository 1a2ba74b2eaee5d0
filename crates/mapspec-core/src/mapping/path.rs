//! Dot-delimited source paths
//!
//! A [`SourcePath`] is parsed once when a specification is compiled and then
//! walked against every source object. Resolution never fails: a missing
//! segment, or a null/scalar value in the middle of the walk, is absence and
//! resolves to `None`. A present `null` at the end of the walk resolves to
//! `Some(&Value::Null)`.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Reasons a source path is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("source path must not be empty")]
    Empty,

    #[error("source path '{path}' contains an empty segment")]
    EmptySegment { path: String },
}

/// A parsed `a.b.c` path into a source object
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourcePath {
    raw: String,
    segments: Vec<String>,
}

impl SourcePath {
    /// Parse a dot-delimited path
    ///
    /// Empty paths and empty segments (`"a..b"`, `".a"`, `"a."`) are rejected.
    pub fn parse(raw: &str) -> Result<Self, PathError> {
        if raw.is_empty() {
            return Err(PathError::Empty);
        }

        let segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment { path: raw.to_string() });
        }

        Ok(Self {
            raw: raw.to_string(),
            segments,
        })
    }

    /// The path as written in the specification
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Last segment; the destination name of a copy rule
    pub fn terminal(&self) -> &str {
        // parse() guarantees at least one segment
        self.segments.last().map(String::as_str).unwrap_or(&self.raw)
    }

    pub fn is_nested(&self) -> bool {
        self.segments.len() > 1
    }

    /// Read the value at this path
    ///
    /// Objects are walked by key. Arrays accept numeric segments as indices.
    pub fn resolve<'v>(&self, source: &'v Value) -> Option<&'v Value> {
        let mut current = source;
        for segment in &self.segments {
            current = match current {
                Value::Object(map) => map.get(segment)?,
                Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
                _ => return None,
            };
        }
        Some(current)
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
