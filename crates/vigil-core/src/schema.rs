//! Declarative configuration schemas.
//!
//! Each checker variant publishes a [`ConfigSchema`] naming its accepted
//! keys, their primitive types, defaults, and which keys are required. The
//! schema is used for validation at registry construction time and exposed
//! over the API for self-documentation; it has no check-time behavior.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::SchemaError;

/// Primitive type of a configuration property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
}

impl PropertyType {
    fn matches(self, value: &Value) -> bool {
        match self {
            PropertyType::String => value.is_string(),
            PropertyType::Integer => value.is_i64() || value.is_u64(),
            PropertyType::Number => value.is_number(),
            PropertyType::Boolean => value.is_boolean(),
            PropertyType::Object => value.is_object(),
        }
    }

    fn name(self) -> &'static str {
        match self {
            PropertyType::String => "string",
            PropertyType::Integer => "integer",
            PropertyType::Number => "number",
            PropertyType::Boolean => "boolean",
            PropertyType::Object => "object",
        }
    }
}

/// One accepted configuration key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertySpec {
    #[serde(rename = "type")]
    pub kind: PropertyType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Accepted configuration keys for one checker variant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    pub properties: BTreeMap<String, PropertySpec>,
    pub required: Vec<String>,
}

impl ConfigSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a required property.
    pub fn required(mut self, name: &str, kind: PropertyType) -> Self {
        self.properties
            .insert(name.to_string(), PropertySpec { kind, default: None });
        self.required.push(name.to_string());
        self
    }

    /// Add an optional property with its default value.
    pub fn optional(mut self, name: &str, kind: PropertyType, default: Value) -> Self {
        self.properties.insert(
            name.to_string(),
            PropertySpec {
                kind,
                default: Some(default),
            },
        );
        self
    }

    /// Check a service config table against this schema.
    ///
    /// Required keys must be present and non-null; declared keys that are
    /// present must match their primitive type. Null values count as absent,
    /// and undeclared keys are ignored.
    pub fn validate(&self, config: &Value) -> Result<(), SchemaError> {
        let table = config.as_object().ok_or(SchemaError::NotAnObject)?;

        for key in &self.required {
            match table.get(key) {
                Some(value) if !value.is_null() => {}
                _ => return Err(SchemaError::MissingKey(key.clone())),
            }
        }

        for (key, spec) in &self.properties {
            if let Some(value) = table.get(key) {
                if !value.is_null() && !spec.kind.matches(value) {
                    return Err(SchemaError::WrongType {
                        key: key.clone(),
                        expected: spec.kind.name(),
                    });
                }
            }
        }

        Ok(())
    }
}
