//! Builder for transform rules
//!
//! This module provides a fluent builder API for the `srcName`/`dstName`
//! rule shape, so callers don't have to fill a [`RuleDescriptor`] by hand.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use super::descriptor::{Descriptor, RuleDescriptor};
use super::mapper::Mapper;
use super::types::MapOptions;
use serde_json::Value;
use std::sync::Arc;

/// Builder for creating transform rules
pub struct RuleBuilder {
    rule: RuleDescriptor,
}

impl RuleBuilder {
    /// Create a new rule builder reading `src_name` and writing `dst_name`
    pub fn new(src_name: impl Into<String>, dst_name: impl Into<String>) -> Self {
        Self {
            rule: RuleDescriptor {
                src_name: src_name.into(),
                dst_name: dst_name.into(),
                ..RuleDescriptor::default()
            },
        }
    }

    /// Transform the extracted value with a closure
    pub fn custom_transform<F>(mut self, f: F) -> Self
    where
        F: Fn(&Value, &Value, &MapOptions) -> Result<Value> + Send + Sync + 'static,
    {
        self.rule.custom_transform = Some(Arc::new(f));
        self
    }

    /// Transform the extracted value with a registered transform
    pub fn transform_named(mut self, name: impl Into<String>) -> Self {
        self.rule.transform_name = Some(name.into());
        self
    }

    /// Map the extracted value with a nested mapper
    pub fn mapper(mut self, mapper: Mapper) -> Self {
        self.rule.mapper = Some(mapper);
        self
    }

    /// Finish the rule
    ///
    /// A rule with no action is rejected when the specification is compiled.
    /// A nested mapper takes precedence over a transform.
    pub fn build(self) -> Descriptor {
        Descriptor::Rule(self.rule)
    }
}

impl From<RuleBuilder> for Descriptor {
    fn from(builder: RuleBuilder) -> Self {
        builder.build()
    }
}
