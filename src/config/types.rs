//! Client configuration types

use serde::{Deserialize, Serialize};

/// Production platform host
pub const DEFAULT_HOST: &str = "https://solidactions.io";
/// Local development server host (`init --dev`)
pub const DEV_HOST: &str = "http://localhost:8000";

/// Host and credential used for every API call.
///
/// Loaded once per invocation and passed by reference to each use case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientConfig {
    pub host: String,
    #[serde(rename = "apiKey")]
    pub api_key: String,
}

/// On-disk shape. Older files stored the key under `token`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct StoredConfig {
    #[serde(default)]
    pub host: Option<String>,
    #[serde(default, rename = "apiKey")]
    pub api_key: Option<String>,
    #[serde(default)]
    pub token: Option<String>,
}

impl StoredConfig {
    pub(crate) fn into_config(self) -> Option<ClientConfig> {
        let api_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .or(self.token.filter(|t| !t.is_empty()))?;
        Some(ClientConfig {
            host: self
                .host
                .filter(|h| !h.is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            api_key,
        })
    }
}

impl ClientConfig {
    pub fn new(host: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            api_key: api_key.into(),
        }
    }

    /// Host without a trailing slash
    pub fn base_url(&self) -> &str {
        self.host.trim_end_matches('/')
    }

    /// First 8 and last 4 characters of the key
    pub fn masked_api_key(&self) -> String {
        mask_api_key(&self.api_key)
    }
}

/// Host for `init`: explicit host, else the dev server, else production.
pub fn select_host(host: Option<&str>, dev: bool) -> String {
    match host {
        Some(h) if !h.trim().is_empty() => h.trim().to_string(),
        _ if dev => DEV_HOST.to_string(),
        _ => DEFAULT_HOST.to_string(),
    }
}

pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let head: String = chars.iter().take(8).collect();
    let tail: String = chars[chars.len().saturating_sub(4)..].iter().collect();
    format!("{}...{}", head, tail)
}
