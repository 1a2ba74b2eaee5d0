//! Raw specification elements
//!
//! A mapping specification is a heterogeneous list: plain field names,
//! single-key rename objects, rule objects carrying a transform or a nested
//! mapper, and post-processing functions. [`Descriptor`] holds one such
//! element before compilation; the compiler turns each into a [`Rule`].
//!
//! [`Rule`]: super::types::Rule
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use super::mapper::Mapper;
use super::types::{MapOptions, PostProcessFn, TransformFn};
use crate::Result;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// One element of a mapping specification
#[derive(Clone)]
pub enum Descriptor {
    /// Plain field name: copy rule
    Field(String),
    /// `{source: dest}`: alias rule
    Alias {
        source: String,
        dest: String,
    },
    /// `srcName`/`dstName` with a transform or nested mapper
    Rule(RuleDescriptor),
    /// Function run after all field rules
    PostProcess(PostProcessFn),
    /// Raw JSON element, classified at compile time
    Json(Value),
}

impl Descriptor {
    pub fn field(name: impl Into<String>) -> Self {
        Descriptor::Field(name.into())
    }

    pub fn alias(source: impl Into<String>, dest: impl Into<String>) -> Self {
        Descriptor::Alias {
            source: source.into(),
            dest: dest.into(),
        }
    }

    /// Wrap a closure as a post-processing step
    pub fn post_process<F>(f: F) -> Self
    where
        F: Fn(&Value, &mut Map<String, Value>, &MapOptions) -> Result<()> + Send + Sync + 'static,
    {
        Descriptor::PostProcess(Arc::new(f))
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Descriptor::Field(name) => f.debug_tuple("Field").field(name).finish(),
            Descriptor::Alias { source, dest } => f
                .debug_struct("Alias")
                .field("source", source)
                .field("dest", dest)
                .finish(),
            Descriptor::Rule(rule) => f.debug_tuple("Rule").field(rule).finish(),
            Descriptor::PostProcess(_) => f.write_str("PostProcess(<fn>)"),
            Descriptor::Json(value) => f.debug_tuple("Json").field(value).finish(),
        }
    }
}

impl From<&str> for Descriptor {
    fn from(name: &str) -> Self {
        Descriptor::Field(name.to_string())
    }
}

impl From<String> for Descriptor {
    fn from(name: String) -> Self {
        Descriptor::Field(name)
    }
}

impl From<(&str, &str)> for Descriptor {
    fn from((source, dest): (&str, &str)) -> Self {
        Descriptor::alias(source, dest)
    }
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        Descriptor::Json(value)
    }
}

impl From<RuleDescriptor> for Descriptor {
    fn from(rule: RuleDescriptor) -> Self {
        Descriptor::Rule(rule)
    }
}

/// Transform rule before compilation
///
/// Exactly one of `custom_transform`, `transform_name` or `mapper` must be set;
/// the compiler rejects anything else.
#[derive(Clone, Default)]
pub struct RuleDescriptor {
    pub src_name: String,
    pub dst_name: String,
    pub custom_transform: Option<TransformFn>,
    /// Name of a transform in the registry
    pub transform_name: Option<String>,
    pub mapper: Option<Mapper>,
}

impl fmt::Debug for RuleDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDescriptor")
            .field("src_name", &self.src_name)
            .field("dst_name", &self.dst_name)
            .field("custom_transform", &self.custom_transform.as_ref().map(|_| "<fn>"))
            .field("transform_name", &self.transform_name)
            .field("mapper", &self.mapper)
            .finish()
    }
}
