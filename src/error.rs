//! Error types for SolidActions
//!
//! Uses `thiserror` for library errors. Transient polling failures never
//! surface here; they are logged and retried by the pollers.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Result type alias for SolidActions operations
pub type SolidResult<T> = Result<T, SolidError>;

/// Main error type for SolidActions operations
#[derive(Error, Debug)]
pub enum SolidError {
    /// Local project validation failed (pre-network). Carries every problem found.
    #[error("validation failed:\n{}", format_list(.errors))]
    Validation { errors: Vec<String> },

    /// Invalid command input (bad JSON, empty key, unknown tier)
    #[error("{0}")]
    InvalidInput(String),

    /// No stored credentials
    #[error("Not initialized. Run \"solidactions init <api-key>\" first.")]
    NotInitialized,

    /// HTTP 401
    #[error("Authentication failed. Run \"solidactions init <api-key>\" to re-configure.")]
    Auth,

    /// HTTP 404, or a lookup that came back empty
    #[error("{resource} not found.{}", hint_suffix(.hint))]
    NotFound {
        resource: String,
        hint: Option<String>,
    },

    /// HTTP 422 - server-provided message surfaced verbatim
    #[error("Validation error: {message}")]
    RemoteValidation { message: String },

    /// Any other non-success HTTP status
    #[error("Failed: {status} {body}")]
    Remote { status: u16, body: String },

    /// The build poller hit its attempt cap. The job may still finish remotely.
    #[error("Timeout waiting for {what} after {}s. It might still finish.", .waited.as_secs())]
    Timeout { what: String, waited: Duration },

    /// The remote build reported `error`
    #[error("build failed for {slug}")]
    BuildFailed { slug: String },

    /// A workflow run ended in a non-success terminal status
    #[error("workflow run {id} ended with status '{status}'")]
    RunFailed { id: String, status: String },

    /// Client configuration could not be read or written
    #[error("config error at {path}: {message}")]
    Config { path: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Connection-level HTTP failure (no response)
    #[error("Connection failed: {0}")]
    Http(#[from] reqwest::Error),
}

impl SolidError {
    pub fn not_found(resource: impl Into<String>) -> Self {
        SolidError::NotFound {
            resource: resource.into(),
            hint: None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, SolidError::NotFound { .. })
    }

    /// Replace a generic 404 with a message naming the resource the caller asked for.
    pub fn or_not_found(self, resource: impl Into<String>, hint: Option<String>) -> Self {
        match self {
            SolidError::NotFound { .. } => SolidError::NotFound {
                resource: resource.into(),
                hint,
            },
            other => other,
        }
    }
}

fn format_list(errors: &[String]) -> String {
    errors
        .iter()
        .map(|e| format!("  ✗ {}", e))
        .collect::<Vec<_>>()
        .join("\n")
}

fn hint_suffix(hint: &Option<String>) -> String {
    match hint {
        Some(h) => format!("\n{}", h),
        None => String::new(),
    }
}
