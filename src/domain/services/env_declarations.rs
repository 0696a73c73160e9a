//! Env declaration parsing
//!
//! The manifest's `env:` list accepts two entry shapes:
//!
//! ```yaml
//! env:
//!   - API_URL              # declared, configured remotely
//!   - DB_PASSWORD: SHARED  # declared and mapped to the global variable SHARED
//! ```
//!
//! Parsing is total: anything that is neither shape is dropped.

use serde::Serialize;
use serde_yaml_ng::Value;

use crate::domain::entities::manifest::scalar_string;

/// Raw shape of one `env:` entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvDeclarationSource {
    /// `- NAME`
    Scalar(String),
    /// `- NAME: TARGET` (target absent when null, empty or false)
    Mapping(String, Option<String>),
}

impl EnvDeclarationSource {
    /// Classify a YAML entry. Returns `None` for malformed entries.
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(name) => Some(Self::Scalar(name.clone())),
            Value::Mapping(map) if map.len() == 1 => {
                let (key, target) = map.iter().next()?;
                let key = scalar_string(key)?;
                Some(Self::Mapping(key, mapping_target(target)))
            }
            _ => None,
        }
    }
}

impl From<EnvDeclarationSource> for EnvDeclaration {
    fn from(source: EnvDeclarationSource) -> Self {
        match source {
            EnvDeclarationSource::Scalar(key) => EnvDeclaration {
                key,
                mapped_to: None,
            },
            EnvDeclarationSource::Mapping(key, mapped_to) => EnvDeclaration { key, mapped_to },
        }
    }
}

fn mapping_target(value: &Value) -> Option<String> {
    match value {
        Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        other => scalar_string(other),
    }
}

/// A declared variable name and its optional global-key mapping
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EnvDeclaration {
    pub key: String,
    pub mapped_to: Option<String>,
}

impl EnvDeclaration {
    pub fn new(key: impl Into<String>, mapped_to: Option<&str>) -> Self {
        Self {
            key: key.into(),
            mapped_to: mapped_to.map(str::to_string),
        }
    }
}

/// Wire form of a declaration for the `sync-yaml` endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclarationPayload {
    pub env_name: String,
    pub yaml_default_global_key: Option<String>,
    pub source: &'static str,
}

impl From<&EnvDeclaration> for DeclarationPayload {
    fn from(decl: &EnvDeclaration) -> Self {
        Self {
            env_name: decl.key.clone(),
            yaml_default_global_key: decl.mapped_to.clone(),
            source: "yaml",
        }
    }
}

/// Parse an `env:` sequence, preserving order and keeping duplicates.
pub fn parse_env_declarations(entries: &[Value]) -> Vec<EnvDeclaration> {
    entries
        .iter()
        .filter_map(EnvDeclarationSource::from_value)
        .map(EnvDeclaration::from)
        .collect()
}
