//! Specification compiler
//!
//! Turns the heterogeneous list of [`Descriptor`]s into the closed set of
//! [`Rule`]s the mapper executes. Classification happens once, here, and a
//! malformed element fails the whole compilation with the index of the
//! offending element.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use super::descriptor::{Descriptor, RuleDescriptor};
use super::mapper::Mapper;
use super::path::SourcePath;
use super::registry::TransformRegistry;
use super::types::{json_type_name, Rule, TransformAction};
use serde_json::{Map, Value};

const SRC_NAME: &str = "srcName";
const DST_NAME: &str = "dstName";
const CUSTOM_TRANSFORM: &str = "customTransform";
const MAPPER: &str = "mapper";
const RULE_KEYS: [&str; 4] = [SRC_NAME, DST_NAME, CUSTOM_TRANSFORM, MAPPER];

/// Compiles specifications against a transform registry
pub struct Compiler<'r> {
    registry: &'r TransformRegistry,
}

impl<'r> Compiler<'r> {
    pub fn new(registry: &'r TransformRegistry) -> Self {
        Self { registry }
    }

    /// Compile a whole specification, preserving element order
    pub fn compile<I, D>(&self, spec: I) -> Result<Vec<Rule>>
    where
        I: IntoIterator<Item = D>,
        D: Into<Descriptor>,
    {
        let rules = spec
            .into_iter()
            .enumerate()
            .map(|(index, descriptor)| self.compile_descriptor(index, descriptor.into()))
            .collect::<Result<Vec<_>>>()?;

        log::debug!("Compiled {} mapping rules", rules.len());
        Ok(rules)
    }

    /// Compile a declarative specification; it must be a JSON array
    pub fn compile_json(&self, spec: &Value) -> Result<Vec<Rule>> {
        match spec {
            Value::Array(elements) => self.compile(elements.iter().cloned()),
            other => Err(Error::InvalidSpecification {
                message: format!("expected an array of rules, found {}", json_type_name(other)),
            }),
        }
    }

    fn compile_descriptor(&self, index: usize, descriptor: Descriptor) -> Result<Rule> {
        match descriptor {
            Descriptor::PostProcess(f) => Ok(Rule::PostProcess(f)),
            Descriptor::Field(name) => Ok(Rule::Copy {
                source: parse_path(index, &name)?,
            }),
            Descriptor::Alias { source, dest } => Ok(Rule::Alias {
                source: parse_path(index, &source)?,
                dest: non_empty(index, "alias target", dest)?,
            }),
            Descriptor::Rule(rule) => self.compile_rule(index, rule),
            Descriptor::Json(value) => self.compile_json_element(index, value),
        }
    }

    fn compile_rule(&self, index: usize, rule: RuleDescriptor) -> Result<Rule> {
        let source = parse_path(index, &rule.src_name)?;
        let dest = non_empty(index, DST_NAME, rule.dst_name)?;

        // A sub-mapper takes precedence over any transform function.
        let action = match (rule.custom_transform, rule.transform_name, rule.mapper) {
            (_, _, Some(mapper)) => TransformAction::Mapper(mapper),
            (Some(transform), None, None) => TransformAction::Function { name: None, transform },
            (None, Some(name), None) => TransformAction::Function {
                transform: self.registry.transform(&name)?,
                name: Some(name),
            },
            (None, None, None) => {
                return Err(Error::configuration(
                    index,
                    format!("rule for '{}' needs a customTransform or a mapper", source),
                ))
            }
            (Some(_), Some(_), None) => {
                return Err(Error::configuration(
                    index,
                    format!("rule for '{}' has both a transform closure and a transform name", source),
                ))
            }
        };

        Ok(Rule::Transform { source, dest, action })
    }

    fn compile_json_element(&self, index: usize, value: Value) -> Result<Rule> {
        match value {
            Value::String(name) => Ok(Rule::Copy {
                source: parse_path(index, &name)?,
            }),
            Value::Object(map) if map.keys().any(|k| RULE_KEYS.contains(&k.as_str())) => {
                self.compile_json_rule(index, map)
            }
            Value::Object(map) => compile_json_alias(index, map),
            other => Err(Error::configuration(
                index,
                format!("unrecognized rule of type {}", json_type_name(&other)),
            )),
        }
    }

    fn compile_json_rule(&self, index: usize, mut map: Map<String, Value>) -> Result<Rule> {
        // A rule object mixed with any other key is ambiguous; don't guess.
        if let Some(extra) = map.keys().find(|k| !RULE_KEYS.contains(&k.as_str())) {
            return Err(Error::configuration(
                index,
                format!("rule object carries unexpected key '{}'", extra),
            ));
        }

        let src_name = required_string(index, &mut map, SRC_NAME)?;
        let source = parse_path(index, &src_name)?;
        let dest = non_empty(index, DST_NAME, required_string(index, &mut map, DST_NAME)?)?;

        let custom_transform = map.remove(CUSTOM_TRANSFORM);
        let action = match (map.remove(MAPPER), custom_transform) {
            // A sub-mapper takes precedence; the transform name is not resolved.
            (Some(Value::Array(nested)), _) => TransformAction::Mapper(Mapper::from_rules(self.compile(nested)?)),
            (Some(Value::String(name)), _) => TransformAction::Mapper(self.registry.mapper(&name)?),
            (Some(other), _) => {
                return Err(Error::configuration(
                    index,
                    format!(
                        "mapper must be a nested specification or a mapper name, found {}",
                        json_type_name(&other)
                    ),
                ))
            }
            (None, Some(Value::String(name))) => TransformAction::Function {
                transform: self.registry.transform(&name)?,
                name: Some(name),
            },
            (None, Some(other)) => {
                return Err(Error::configuration(
                    index,
                    format!("customTransform must be a transform name, found {}", json_type_name(&other)),
                ))
            }
            (None, None) => {
                return Err(Error::configuration(
                    index,
                    format!("rule for '{}' needs a customTransform or a mapper", source),
                ))
            }
        };

        Ok(Rule::Transform { source, dest, action })
    }
}

fn compile_json_alias(index: usize, map: Map<String, Value>) -> Result<Rule> {
    if map.len() != 1 {
        return Err(Error::configuration(
            index,
            format!(
                "alias object must have exactly one key, found {}; rule objects need srcName and dstName",
                map.len()
            ),
        ));
    }

    let Some((source, dest)) = map.into_iter().next() else {
        return Err(Error::configuration(index, "empty alias object"));
    };
    let Value::String(dest) = dest else {
        return Err(Error::configuration(
            index,
            format!("alias target for '{}' must be a string, found {}", source, json_type_name(&dest)),
        ));
    };

    Ok(Rule::Alias {
        source: parse_path(index, &source)?,
        dest: non_empty(index, "alias target", dest)?,
    })
}

fn parse_path(index: usize, raw: &str) -> Result<SourcePath> {
    SourcePath::parse(raw).map_err(|err| Error::configuration(index, err.to_string()))
}

fn non_empty(index: usize, what: &str, name: String) -> Result<String> {
    if name.is_empty() {
        Err(Error::configuration(index, format!("{} must not be empty", what)))
    } else {
        Ok(name)
    }
}

fn required_string(index: usize, map: &mut Map<String, Value>, key: &str) -> Result<String> {
    match map.remove(key) {
        Some(Value::String(s)) => Ok(s),
        Some(other) => Err(Error::configuration(
            index,
            format!("{} must be a string, found {}", key, json_type_name(&other)),
        )),
        None => Err(Error::configuration(index, format!("rule object is missing {}", key))),
    }
}
