//! Checker construction errors.
//!
//! These are raised while building the registry, one service at a time;
//! a failing entry is logged and skipped, never fatal. Probe failures do
//! not appear here: they are `ServiceState` values.

use thiserror::Error;

pub type CheckerResult<T> = Result<T, CheckerError>;

#[derive(Debug, Error)]
pub enum CheckerError {
    #[error("unknown checker type `{0}`")]
    UnknownKind(String),

    #[error(transparent)]
    Schema(#[from] vigil_core::SchemaError),

    #[error("invalid value for config key `{key}`: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
