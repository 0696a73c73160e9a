//! Workflow manifest (`solidactions.yaml`)
//!
//! The manifest is parsed through a generic YAML value so that loosely shaped
//! entries (numbers as names, env entries that are either scalars or mappings)
//! never abort a deploy. Structural problems are reported by the validator.

use serde_yaml_ng::Value;

use crate::domain::services::env_declarations::{parse_env_declarations, EnvDeclaration};
use crate::error::SolidResult;

/// File name of the manifest at the project root
pub const MANIFEST_FILE: &str = "solidactions.yaml";

/// One entry of the `workflows:` list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowDeclaration {
    pub name: Option<String>,
    pub command: Option<String>,
    pub file: Option<String>,
    pub enabled: bool,
}

impl WorkflowDeclaration {
    fn from_value(value: &Value) -> Self {
        let field = |key: &str| value.get(key).and_then(scalar_string);
        Self {
            name: field("name"),
            command: field("command"),
            file: field("file"),
            enabled: value
                .get("enabled")
                .and_then(Value::as_bool)
                .unwrap_or(true),
        }
    }
}

/// Parsed manifest. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WorkflowManifest {
    /// `None` when the `workflows:` key is absent or not a list
    pub workflows: Option<Vec<WorkflowDeclaration>>,
    pub deploy_env: bool,
    pub env: Vec<EnvDeclaration>,
}

impl WorkflowManifest {
    /// Parse manifest text. Only YAML syntax errors fail.
    pub fn parse(content: &str) -> SolidResult<Self> {
        let root: Value = serde_yaml_ng::from_str(content)?;
        Ok(Self::from_value(&root))
    }

    pub fn from_value(root: &Value) -> Self {
        let workflows = root
            .get("workflows")
            .and_then(Value::as_sequence)
            .map(|seq| seq.iter().map(WorkflowDeclaration::from_value).collect());

        let env = root
            .get("env")
            .and_then(Value::as_sequence)
            .map(|seq| parse_env_declarations(seq))
            .unwrap_or_default();

        Self {
            workflows,
            // Only a literal `true` enables value push
            deploy_env: matches!(root.get("deployEnv"), Some(Value::Bool(true))),
            env,
        }
    }

    /// Declared variable names, first occurrence order, without duplicates.
    pub fn declared_keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = Vec::with_capacity(self.env.len());
        for decl in &self.env {
            if !keys.contains(&decl.key) {
                keys.push(decl.key.clone());
            }
        }
        keys
    }
}

/// Strings, numbers and booleans are accepted where a string is expected.
/// Empty strings count as absent.
pub(crate) fn scalar_string(value: &Value) -> Option<String> {
    let s = match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
