//! Mapspec Core - declarative object mapping over JSON values
//!
//! This crate turns a mapping specification (an ordered list of rules) into
//! a reusable [`Mapper`] that builds new destination objects from source
//! objects.
//!
//! # Main Components
//!
//! - **Error Handling**: One error enum using `thiserror`, with `anyhow` for callback errors
//! - **Specification**: Plain field names, renames, transform rules, nested mappers and
//!   post-processing hooks, supplied programmatically or as JSON
//! - **Mapper**: Applies compiled rules to an object, `null`, or an array of either
//!
//! # Example
//!
//! ```
//! use mapspec_core::{create_mapper, RuleBuilder};
//! use serde_json::json;
//!
//! # fn example() -> mapspec_core::Result<()> {
//! let address = create_mapper(vec![("street_name", "street")])?;
//! let person = create_mapper(vec![
//!     RuleBuilder::new("name", "fullName").transform_named("trim").build(),
//!     RuleBuilder::new("home", "address").mapper(address).build(),
//! ])?;
//!
//! let out = person.map(&json!([
//!     {"name": " Ada ", "home": {"street_name": "Elm"}},
//!     null
//! ]))?;
//! assert_eq!(out, json!([{"fullName": "Ada", "address": {"street": "Elm"}}, null]));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! Copyright (c) 2025 Mapspec Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod mapping;

// Re-export main types for convenience
pub use error::{Error, Result};
pub use mapping::{
    // Specification
    Descriptor, RuleBuilder, RuleDescriptor,

    // Compiled form
    Compiler, PathError, Rule, RuleKind, SourcePath, TransformAction,

    // Callbacks and configuration
    MapOptions, PostProcessFn, TransformFn, TransformRegistry,

    // Execution
    Mapper,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build a mapper from a specification
///
/// Fails with a configuration error if any element of the specification is
/// not a recognized rule shape.
pub fn create_mapper<I, D>(spec: I) -> Result<Mapper>
where
    I: IntoIterator<Item = D>,
    D: Into<Descriptor>,
{
    Mapper::new(spec)
}
