//! Core types for the mapping engine
//!
//! This module defines the compiled rule representation, the callback
//! signatures accepted by transform and post-processing rules, and the
//! options bag handed to every callback.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use super::mapper::Mapper;
use super::path::SourcePath;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Value transform: `(source, value, options) -> value`
pub type TransformFn = Arc<dyn Fn(&Value, &Value, &MapOptions) -> Result<Value> + Send + Sync>;

/// Post-mapping hook: `(source, destination, options)`
pub type PostProcessFn =
    Arc<dyn Fn(&Value, &mut Map<String, Value>, &MapOptions) -> Result<()> + Send + Sync>;

/// Extra values made available to every callback of a single `map` call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapOptions(Map<String, Value>);

impl MapOptions {
    /// Create an empty options bag
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an option, returning the updated bag
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    /// Look up an option
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Look up a string option
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Borrow the underlying JSON object
    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for MapOptions {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl TryFrom<Value> for MapOptions {
    type Error = Error;

    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            Value::Null => Ok(Self::default()),
            other => Err(Error::InvalidOptions {
                message: format!("expected a JSON object, found {}", json_type_name(&other)),
            }),
        }
    }
}

/// Kind of a compiled rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RuleKind {
    Copy,
    Alias,
    Transform,
    PostProcess,
}

impl fmt::Display for RuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RuleKind::Copy => write!(f, "copy"),
            RuleKind::Alias => write!(f, "alias"),
            RuleKind::Transform => write!(f, "transform"),
            RuleKind::PostProcess => write!(f, "postProcess"),
        }
    }
}

/// What a transform rule does with the extracted value
#[derive(Clone)]
pub enum TransformAction {
    /// Call a transform function
    Function {
        /// Registry name, or `None` for an anonymous closure
        name: Option<String>,
        transform: TransformFn,
    },
    /// Run a nested mapper over the value
    Mapper(Mapper),
}

impl fmt::Debug for TransformAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransformAction::Function { name, .. } => f
                .debug_struct("Function")
                .field("name", &name.as_deref().unwrap_or("<closure>"))
                .finish(),
            TransformAction::Mapper(mapper) => f
                .debug_tuple("Mapper")
                .field(&format_args!("{} rules", mapper.len()))
                .finish(),
        }
    }
}

/// A compiled mapping rule
///
/// Rules are produced by the compiler, never mutated afterwards, and applied
/// in specification order.
#[derive(Clone)]
pub enum Rule {
    /// Copy the value at `source` to the field named after its last segment
    Copy {
        source: SourcePath,
    },
    /// Copy the value at `source` to `dest`
    Alias {
        source: SourcePath,
        dest: String,
    },
    /// Write `action(value at source)` to `dest`
    Transform {
        source: SourcePath,
        dest: String,
        action: TransformAction,
    },
    /// Run a hook over the finished destination
    PostProcess(PostProcessFn),
}

impl Rule {
    pub fn kind(&self) -> RuleKind {
        match self {
            Rule::Copy { .. } => RuleKind::Copy,
            Rule::Alias { .. } => RuleKind::Alias,
            Rule::Transform { .. } => RuleKind::Transform,
            Rule::PostProcess(_) => RuleKind::PostProcess,
        }
    }

    /// Source path read by a field rule
    pub fn source(&self) -> Option<&SourcePath> {
        match self {
            Rule::Copy { source } | Rule::Alias { source, .. } | Rule::Transform { source, .. } => {
                Some(source)
            }
            Rule::PostProcess(_) => None,
        }
    }

    /// Destination field written by a field rule
    pub fn dest_name(&self) -> Option<&str> {
        match self {
            Rule::Copy { source } => Some(source.terminal()),
            Rule::Alias { dest, .. } | Rule::Transform { dest, .. } => Some(dest),
            Rule::PostProcess(_) => None,
        }
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rule::Copy { source } => f.debug_struct("Copy").field("source", source).finish(),
            Rule::Alias { source, dest } => f
                .debug_struct("Alias")
                .field("source", source)
                .field("dest", dest)
                .finish(),
            Rule::Transform { source, dest, action } => f
                .debug_struct("Transform")
                .field("source", source)
                .field("dest", dest)
                .field("action", action)
                .finish(),
            Rule::PostProcess(_) => f.write_str("PostProcess(<fn>)"),
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
