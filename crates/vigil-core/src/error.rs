//! Error types for configuration loading and schema validation.

use thiserror::Error;

/// Errors raised while loading the Vigil configuration file.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read config file: {0}")]
    Read(String),

    #[error("failed to parse config file: {0}")]
    Parse(String),
}

/// Violations reported by [`ConfigSchema::validate`](crate::ConfigSchema::validate).
///
/// These surface at registry construction time, never during a check.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SchemaError {
    #[error("service config must be a table")]
    NotAnObject,

    #[error("missing required config key `{0}`")]
    MissingKey(String),

    #[error("config key `{key}` expects a {expected} value")]
    WrongType { key: String, expected: &'static str },
}
