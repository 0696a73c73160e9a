//! Environment variable entities
//!
//! Client-side projections of remote variable state, rebuilt on every
//! invocation. Fields use the platform's snake_case wire names.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::value_objects::ResourceId;

/// Where a global variable's staging value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StagingSource {
    InheritProduction,
    #[default]
    #[serde(other)]
    Value,
}

/// Where a global variable's dev value comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DevSource {
    InheritProduction,
    InheritStaging,
    #[default]
    #[serde(other)]
    Value,
}

impl StagingSource {
    pub fn is_inherited(&self) -> bool {
        !matches!(self, StagingSource::Value)
    }
}

impl DevSource {
    pub fn is_inherited(&self) -> bool {
        !matches!(self, DevSource::Value)
    }
}

/// Account-wide variable with one value per tier
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GlobalVariable {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: ResourceId,
    pub key: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_secret: bool,
    #[serde(default, deserialize_with = "lenient_string")]
    pub production_value: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub staging_value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub staging_source: StagingSource,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dev_value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dev_source: DevSource,
}

/// Origin of a project variable mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MappingSource {
    Yaml,
    Override,
    #[default]
    #[serde(other)]
    Manual,
}

impl MappingSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            MappingSource::Yaml => "yaml",
            MappingSource::Manual => "manual",
            MappingSource::Override => "override",
        }
    }
}

/// `source_type` value marking a mapping whose value is an OAuth-issued token
pub const OAUTH_SOURCE_TYPE: &str = "oauth_connection";

/// Binding of one variable name inside one project+tier
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProjectVariableMapping {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: ResourceId,
    pub env_name: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub value: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_secret: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub source: MappingSource,
    #[serde(default)]
    pub global_variable_key: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub is_yaml_declared: bool,
    #[serde(default)]
    pub source_type: Option<String>,
    #[serde(default)]
    pub oauth_connection_name: Option<String>,
    #[serde(default)]
    pub token_expires_at: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub resolved_value: Option<String>,
    #[serde(default)]
    pub oauth_warning: Option<String>,
}

impl ProjectVariableMapping {
    pub fn is_oauth(&self) -> bool {
        self.source_type.as_deref() == Some(OAUTH_SOURCE_TYPE)
    }

    /// Resolved value when the server supplied one, else the stored value.
    pub fn effective_value(&self) -> Option<&str> {
        self.resolved_value.as_deref().or(self.value.as_deref())
    }
}

/// Body of a global variable create call
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct NewGlobalVariable {
    pub key: String,
    pub production_value: String,
    pub is_secret: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub staging_source: Option<StagingSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dev_source: Option<DevSource>,
}

/// One literal value pushed from a local env file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnvValue {
    pub key: String,
    pub value: String,
    pub is_secret: bool,
}

/// Response of the bulk push endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub struct BulkPushSummary {
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
}

pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts strings, numbers and booleans; anything else becomes `None`.
pub(crate) fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => Some(s),
        Some(serde_json::Value::Number(n)) => Some(n.to_string()),
        Some(serde_json::Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}
