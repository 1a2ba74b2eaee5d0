//! Built-in transforms for common operations
//!
//! These are the transforms a declarative (JSON) specification can name in
//! `customTransform` without registering anything: case changes, trimming
//! and scalar type conversions.
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

use crate::{Error, Result};
use super::types::{json_type_name, MapOptions, TransformFn};
use serde_json::Value;
use std::sync::Arc;

/// Names of all built-in transforms
pub const NAMES: &[&str] = &[
    "uppercase",
    "lowercase",
    "trim",
    "to_string",
    "to_number",
    "to_boolean",
];

/// Look up a built-in transform by name
pub fn get(name: &str) -> Option<TransformFn> {
    let transform: TransformFn = match name {
        "uppercase" => Arc::new(uppercase),
        "lowercase" => Arc::new(lowercase),
        "trim" => Arc::new(trim),
        "to_string" => Arc::new(to_string),
        "to_number" => Arc::new(to_number),
        "to_boolean" => Arc::new(to_boolean),
        _ => return None,
    };
    Some(transform)
}

fn expect_str<'v>(transform: &str, value: &'v Value) -> Result<&'v str> {
    value.as_str().ok_or_else(|| {
        Error::transform(transform, format!("expected a string, found {}", json_type_name(value)))
    })
}

/// Upper-case a string
pub fn uppercase(_source: &Value, value: &Value, _options: &MapOptions) -> Result<Value> {
    Ok(Value::String(expect_str("uppercase", value)?.to_uppercase()))
}

/// Lower-case a string
pub fn lowercase(_source: &Value, value: &Value, _options: &MapOptions) -> Result<Value> {
    Ok(Value::String(expect_str("lowercase", value)?.to_lowercase()))
}

/// Strip leading and trailing whitespace
pub fn trim(_source: &Value, value: &Value, _options: &MapOptions) -> Result<Value> {
    Ok(Value::String(expect_str("trim", value)?.trim().to_string()))
}

/// Render a scalar as a string
pub fn to_string(_source: &Value, value: &Value, _options: &MapOptions) -> Result<Value> {
    match value {
        Value::String(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::String(n.to_string())),
        Value::Bool(b) => Ok(Value::String(b.to_string())),
        other => Err(Error::transform(
            "to_string",
            format!("cannot convert {} to string", json_type_name(other)),
        )),
    }
}

/// Parse a numeric string (or a boolean) into a number
pub fn to_number(_source: &Value, value: &Value, _options: &MapOptions) -> Result<Value> {
    match value {
        Value::Number(_) => Ok(value.clone()),
        Value::Bool(b) => Ok(Value::from(u8::from(*b))),
        Value::String(s) => {
            let trimmed = s.trim();
            if let Ok(n) = trimmed.parse::<i64>() {
                return Ok(Value::from(n));
            }
            trimmed
                .parse::<f64>()
                .ok()
                .and_then(serde_json::Number::from_f64)
                .map(Value::Number)
                .ok_or_else(|| Error::transform("to_number", format!("'{}' is not a number", s)))
        }
        other => Err(Error::transform(
            "to_number",
            format!("cannot convert {} to number", json_type_name(other)),
        )),
    }
}

/// Interpret a string or number as a boolean
pub fn to_boolean(_source: &Value, value: &Value, _options: &MapOptions) -> Result<Value> {
    match value {
        Value::Bool(_) => Ok(value.clone()),
        Value::Number(n) => Ok(Value::Bool(n.as_f64().map_or(false, |f| f != 0.0))),
        Value::String(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(Value::Bool(true)),
            "false" | "no" | "0" | "off" | "" => Ok(Value::Bool(false)),
            _ => Err(Error::transform("to_boolean", format!("'{}' is not a boolean", s))),
        },
        other => Err(Error::transform(
            "to_boolean",
            format!("cannot convert {} to boolean", json_type_name(other)),
        )),
    }
}
