//! Error types for the mapspec core library
//!
//! Compile-time problems (a malformed specification, an unknown named
//! transform) and map-time failures raised by callbacks share one error
//! enum built with thiserror. Callbacks may also raise ad-hoc errors through
//! anyhow, which surface as [`Error::Callback`].

use thiserror::Error;

/// Main error type for mapspec operations
#[derive(Error, Debug)]
pub enum Error {
    /// A specification element could not be turned into a rule
    #[error("Configuration error at rule {index}: {message}")]
    Configuration {
        index: usize,
        message: String,
    },

    /// A declarative specification that is not a list of rules
    #[error("Invalid specification: {message}")]
    InvalidSpecification {
        message: String,
    },

    /// A `customTransform` name with no registered transform
    #[error("Unknown transform '{name}'")]
    UnknownTransform {
        name: String,
    },

    /// A `mapper` name with no registered mapper
    #[error("Unknown mapper '{name}'")]
    UnknownMapper {
        name: String,
    },

    /// Mapping options that are not a key-value object
    #[error("Invalid mapping options: {message}")]
    InvalidOptions {
        message: String,
    },

    /// A built-in transform rejected its input
    #[error("Transform '{transform}' failed: {message}")]
    Transform {
        transform: String,
        message: String,
    },

    /// Error raised by a user-supplied transform or post-processing callback
    #[error(transparent)]
    Callback(#[from] anyhow::Error),

    /// JSON serialization and deserialization errors
    #[error("JSON error: {message}")]
    Json {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using our Error type
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Build a configuration error for the specification element at `index`
    pub fn configuration(index: usize, message: impl Into<String>) -> Self {
        Error::Configuration {
            index,
            message: message.into(),
        }
    }

    /// Build a transform failure for a named transform
    pub fn transform(transform: impl Into<String>, message: impl Into<String>) -> Self {
        Error::Transform {
            transform: transform.into(),
            message: message.into(),
        }
    }

    /// True for errors raised while compiling a specification
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::Configuration { .. }
                | Error::InvalidSpecification { .. }
                | Error::UnknownTransform { .. }
                | Error::UnknownMapper { .. }
        )
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Json {
            message: err.to_string(),
            source: err,
        }
    }
}
