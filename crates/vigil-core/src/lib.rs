//! vigil-core — shared domain types for Vigil.
//!
//! Defines the service status model ([`ServiceState`], [`ServiceStatus`]),
//! the per-service and global configuration types loaded from `vigil.toml`,
//! and the declarative [`ConfigSchema`] checkers publish for their accepted
//! configuration keys.
//!
//! Everything here is plain data: probing, caching, and collection live in
//! the `vigil-checkers` and `vigil-engine` crates.

pub mod config;
pub mod error;
pub mod schema;
pub mod types;

pub use config::{Settings, VigilConfig};
pub use error::{CoreError, SchemaError};
pub use schema::{ConfigSchema, PropertySpec, PropertyType};
pub use types::{ServiceConfig, ServiceState, ServiceStatus};
