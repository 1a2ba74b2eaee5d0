//! The mapper: a compiled specification applied to source values
//!
//! A [`Mapper`] is built once and reused. Mapping never touches the compiled
//! rules; each call allocates its own destination object and reads only from
//! its own source and options, so one mapper can serve any number of threads.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use crate::Result;
use super::compiler::Compiler;
use super::descriptor::Descriptor;
use super::registry::TransformRegistry;
use super::types::{MapOptions, Rule, TransformAction};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// A compiled mapping specification
///
/// Cloning is cheap: clones share the compiled rules, which is how one
/// mapper is embedded as a sub-mapper in several others.
#[derive(Clone)]
pub struct Mapper {
    rules: Arc<[Rule]>,
}

impl Mapper {
    /// Compile a specification, resolving transform names against the built-ins
    ///
    /// ```
    /// use mapspec_core::{Descriptor, Mapper, RuleBuilder};
    /// use serde_json::json;
    ///
    /// let mapper = Mapper::new(vec![
    ///     Descriptor::field("simpleA"),
    ///     Descriptor::alias("sub.deep", "shallow"),
    ///     RuleBuilder::new("name", "NAME").transform_named("uppercase").build(),
    /// ])?;
    ///
    /// let out = mapper.map(&json!({"simpleA": 1, "sub": {"deep": "beta"}, "name": "ada"}))?;
    /// assert_eq!(out, json!({"simpleA": 1, "shallow": "beta", "NAME": "ADA"}));
    /// # Ok::<(), mapspec_core::Error>(())
    /// ```
    pub fn new<I, D>(spec: I) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<Descriptor>,
    {
        Self::with_registry(spec, &TransformRegistry::with_built_ins())
    }

    /// Compile a specification against an explicit registry
    pub fn with_registry<I, D>(spec: I, registry: &TransformRegistry) -> Result<Self>
    where
        I: IntoIterator<Item = D>,
        D: Into<Descriptor>,
    {
        Compiler::new(registry).compile(spec).map(Self::from_rules)
    }

    /// Compile a declarative JSON specification using the built-in transforms
    pub fn from_json(spec: &Value) -> Result<Self> {
        Self::from_json_with(spec, &TransformRegistry::with_built_ins())
    }

    /// Compile a declarative JSON specification against an explicit registry
    pub fn from_json_with(spec: &Value, registry: &TransformRegistry) -> Result<Self> {
        let mapper = Compiler::new(registry).compile_json(spec).map(Self::from_rules)?;
        log::debug!("Loaded declarative specification with {} rules", mapper.len());
        Ok(mapper)
    }

    /// Parse and compile a declarative specification from JSON text
    pub fn from_json_str(spec: &str, registry: &TransformRegistry) -> Result<Self> {
        let value: Value = serde_json::from_str(spec)?;
        Self::from_json_with(&value, registry)
    }

    /// Wrap already compiled rules
    pub fn from_rules(rules: Vec<Rule>) -> Self {
        Self { rules: rules.into() }
    }

    /// A mapper with no rules; it maps every non-null object to `{}`
    pub fn empty() -> Self {
        Self::from_rules(Vec::new())
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Map a value with empty options
    pub fn map(&self, input: &Value) -> Result<Value> {
        self.map_with(input, &MapOptions::default())
    }

    /// Map a value, handing `options` to every callback
    ///
    /// An array maps element by element into an array of the same length;
    /// anything else maps to a single object, or to `null` for a `null` input.
    pub fn map_with(&self, input: &Value, options: &MapOptions) -> Result<Value> {
        match input {
            Value::Array(items) => items
                .iter()
                .map(|item| self.map_single(item, options))
                .collect::<Result<Vec<_>>>()
                .map(Value::Array),
            single => self.map_single(single, options),
        }
    }

    /// Map a single source object; `None` for a `null` source
    pub fn map_object(&self, source: &Value, options: &MapOptions) -> Result<Option<Map<String, Value>>> {
        if source.is_null() {
            return Ok(None);
        }
        self.apply(source, options).map(Some)
    }

    /// Map any serializable input into any deserializable output
    pub fn map_as<T, U>(&self, input: &T, options: &MapOptions) -> Result<U>
    where
        T: Serialize + ?Sized,
        U: DeserializeOwned,
    {
        let source = serde_json::to_value(input)?;
        let mapped = self.map_with(&source, options)?;
        Ok(serde_json::from_value(mapped)?)
    }

    fn map_single(&self, source: &Value, options: &MapOptions) -> Result<Value> {
        Ok(self
            .map_object(source, options)?
            .map_or(Value::Null, Value::Object))
    }

    /// Run field rules in order, then post-processing hooks in order
    fn apply(&self, source: &Value, options: &MapOptions) -> Result<Map<String, Value>> {
        let mut destination = Map::new();

        for rule in self.rules.iter() {
            match rule {
                Rule::Copy { source: path } => {
                    if let Some(value) = path.resolve(source) {
                        destination.insert(path.terminal().to_string(), value.clone());
                    } else {
                        log::trace!("Skipping copy of '{}': absent in source", path);
                    }
                }
                Rule::Alias { source: path, dest } => {
                    if let Some(value) = path.resolve(source) {
                        destination.insert(dest.clone(), value.clone());
                    } else {
                        log::trace!("Skipping alias '{}' -> '{}': absent in source", path, dest);
                    }
                }
                Rule::Transform { source: path, dest, action } => {
                    let Some(value) = path.resolve(source) else {
                        log::trace!("Skipping transform '{}' -> '{}': absent in source", path, dest);
                        continue;
                    };
                    let transformed = match action {
                        TransformAction::Function { transform, .. } => transform(source, value, options)?,
                        TransformAction::Mapper(mapper) => mapper.map_with(value, options)?,
                    };
                    destination.insert(dest.clone(), transformed);
                }
                Rule::PostProcess(_) => {}
            }
        }

        for rule in self.rules.iter() {
            if let Rule::PostProcess(hook) = rule {
                hook(source, &mut destination, options)?;
            }
        }

        Ok(destination)
    }
}

impl fmt::Debug for Mapper {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mapper").field("rules", &self.rules).finish()
    }
}

impl Default for Mapper {
    fn default() -> Self {
        Self::empty()
    }
}
