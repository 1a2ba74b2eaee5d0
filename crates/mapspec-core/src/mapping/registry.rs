//! Named transforms and mappers for declarative specifications
//!
//! A JSON specification cannot carry functions, so its rule objects refer to
//! transforms and nested mappers by name. The registry resolves those names
//! when the specification is compiled.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use super::built_in;
use super::mapper::Mapper;
use super::types::{MapOptions, TransformFn};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Lookup table for `customTransform` and `mapper` names
#[derive(Clone, Default)]
pub struct TransformRegistry {
    transforms: HashMap<String, TransformFn>,
    mappers: HashMap<String, Mapper>,
}

impl TransformRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry preloaded with the [`built_in`] transforms
    pub fn with_built_ins() -> Self {
        let mut registry = Self::new();
        for name in built_in::NAMES {
            if let Some(transform) = built_in::get(name) {
                registry.transforms.insert((*name).to_string(), transform);
            }
        }
        registry
    }

    /// Register a transform, replacing any previous one with the same name
    pub fn register_transform<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&Value, &Value, &MapOptions) -> Result<Value> + Send + Sync + 'static,
    {
        self.transforms.insert(name.into(), Arc::new(f));
        self
    }

    /// Register a compiled mapper under a name
    pub fn register_mapper(&mut self, name: impl Into<String>, mapper: Mapper) -> &mut Self {
        self.mappers.insert(name.into(), mapper);
        self
    }

    pub fn transform(&self, name: &str) -> Result<TransformFn> {
        self.transforms
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownTransform { name: name.to_string() })
    }

    pub fn mapper(&self, name: &str) -> Result<Mapper> {
        self.mappers
            .get(name)
            .cloned()
            .ok_or_else(|| Error::UnknownMapper { name: name.to_string() })
    }

    pub fn has_transform(&self, name: &str) -> bool {
        self.transforms.contains_key(name)
    }

    pub fn has_mapper(&self, name: &str) -> bool {
        self.mappers.contains_key(name)
    }
}

impl fmt::Debug for TransformRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut transforms: Vec<_> = self.transforms.keys().collect();
        transforms.sort();
        let mut mappers: Vec<_> = self.mappers.keys().collect();
        mappers.sort();
        f.debug_struct("TransformRegistry")
            .field("transforms", &transforms)
            .field("mappers", &mappers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_built_ins_are_preloaded() {
        let registry = TransformRegistry::with_built_ins();
        assert!(registry.has_transform("uppercase"));
        assert!(registry.has_transform("to_number"));
        assert!(!TransformRegistry::new().has_transform("uppercase"));
    }

    #[test]
    fn test_register_and_resolve_transform() {
        let mut registry = TransformRegistry::new();
        registry.register_transform("double", |_src, value, _opts| {
            Ok(json!(value.as_i64().unwrap_or(0) * 2))
        });

        let double = registry.transform("double").unwrap();
        assert_eq!(double(&Value::Null, &json!(21), &MapOptions::default()).unwrap(), json!(42));
    }

    #[test]
    fn test_unknown_names() {
        let registry = TransformRegistry::new();
        let err = registry.transform("missing").err().unwrap();
        assert_eq!(err.to_string(), "Unknown transform 'missing'");
        assert!(matches!(registry.mapper("inner"), Err(Error::UnknownMapper { .. })));
    }

    #[test]
    fn test_register_mapper() {
        let mut registry = TransformRegistry::new();
        registry.register_mapper("inner", Mapper::new(["a"]).unwrap());
        assert!(registry.has_mapper("inner"));
        assert_eq!(registry.mapper("inner").unwrap().len(), 1);
    }
}
