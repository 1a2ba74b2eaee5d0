//! Declarative object mapping
//!
//! A mapping specification is an ordered list of rules. It is compiled once
//! into a [`Mapper`], which then turns source objects (or arrays of them)
//! into freshly built destination objects.
//!
//! # Module Organization
//!
//! - [`types`] - Compiled rules, callback signatures and [`MapOptions`]
//! - [`path`] - Dot-delimited source paths and their resolution
//! - [`descriptor`] - Raw specification elements
//! - [`builder`] - Fluent builder for transform rules
//! - [`compiler`] - Classification of descriptors into rules
//! - [`registry`] - Named transforms and mappers for JSON specifications
//! - [`built_in`] - Transforms available without registration
//! - [`mapper`] - The apply loop and array dispatch
//!
//! # Examples
//!
//! ## Copies, renames and nested paths
//!
//! ```
//! use mapspec_core::Mapper;
//! use serde_json::json;
//!
//! let mapper = Mapper::from_json(&json!([
//!     "simpleA",
//!     {"oldName": "newName"},
//!     {"sub.deep": "shallow"}
//! ])).unwrap();
//!
//! let out = mapper.map(&json!({
//!     "simpleA": "alpha",
//!     "simpleB": "bravo",
//!     "oldName": "charlie",
//!     "sub": {"deep": "delta"}
//! })).unwrap();
//!
//! assert_eq!(out, json!({"simpleA": "alpha", "newName": "charlie", "shallow": "delta"}));
//! ```
//!
//! ## Callbacks and options
//!
//! ```
//! use mapspec_core::{Descriptor, MapOptions, Mapper, RuleBuilder};
//! use serde_json::{json, Value};
//!
//! let mapper = Mapper::new(vec![
//!     RuleBuilder::new("complexoldname", "complexnewname")
//!         .custom_transform(|_src, value, options| {
//!             let bread = options.get_str("breadVal").unwrap_or_default();
//!             Ok(Value::String(format!("{}{}", value.as_str().unwrap_or_default(), bread.to_uppercase())))
//!         })
//!         .build(),
//!     Descriptor::post_process(|_src, dst, options| {
//!         dst.insert("Custom".into(), options.get("fishVal").cloned().unwrap_or(Value::Null));
//!         Ok(())
//!     }),
//! ]).unwrap();
//!
//! let options = MapOptions::new().with("fishVal", "haddock").with("breadVal", "loaf");
//! let out = mapper.map_with(&json!({"complexoldname": "oldVal"}), &options).unwrap();
//!
//! assert_eq!(out, json!({"complexnewname": "oldValLOAF", "Custom": "haddock"}));
//! ```
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

pub mod types;
pub mod path;
pub mod descriptor;
pub mod builder;
pub mod compiler;
pub mod registry;
pub mod built_in;
pub mod mapper;

#[cfg(test)]
mod tests;


pub use types::{MapOptions, PostProcessFn, Rule, RuleKind, TransformAction, TransformFn};
pub use path::{PathError, SourcePath};
pub use descriptor::{Descriptor, RuleDescriptor};
pub use builder::RuleBuilder;
pub use compiler::Compiler;
pub use registry::TransformRegistry;
pub use mapper::Mapper;
