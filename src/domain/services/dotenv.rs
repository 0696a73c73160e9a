//! `.env` file reading, rendering and OAuth merging
//!
//! All functions here are pure text transformations. Reading and writing the
//! file itself is done by the callers through atomic writes.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::domain::entities::ProjectVariableMapping;
use crate::domain::value_objects::Tier;

/// Prefix of the banner line written above merged OAuth tokens
pub const OAUTH_BANNER_PREFIX: &str = "# OAuth tokens (updated ";
const OAUTH_COMMENT_PREFIX: &str = "# OAuth:";

/// OAuth metadata rendered as a comment above the variable
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct OAuthMeta {
    pub connection: Option<String>,
    pub expires_at: Option<String>,
}

/// One resolved variable to be written to a local file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PulledVariable {
    pub key: String,
    pub value: Option<String>,
    pub is_secret: bool,
    pub oauth: Option<OAuthMeta>,
}

impl From<&ProjectVariableMapping> for PulledVariable {
    fn from(mapping: &ProjectVariableMapping) -> Self {
        Self {
            key: mapping.env_name.clone(),
            value: mapping.effective_value().map(str::to_string),
            is_secret: mapping.is_secret,
            oauth: mapping.is_oauth().then(|| OAuthMeta {
                connection: mapping.oauth_connection_name.clone(),
                expires_at: mapping.token_expires_at.clone(),
            }),
        }
    }
}

/// Parse `.env` text. Blank and `#` lines are skipped, the last assignment of
/// a key wins, and one pair of matching surrounding quotes is stripped.
pub fn parse(content: &str) -> HashMap<String, String> {
    let mut values = HashMap::new();
    for line in content.split('\n') {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let Some((key, value)) = trimmed.split_once('=') else {
            continue;
        };
        values.insert(key.trim().to_string(), unquote(value.trim()).to_string());
    }
    values
}

fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Quote a value containing a space, either quote, a newline, `=` or `#`.
pub fn format_value(value: &str) -> String {
    let needs_quotes = value
        .chars()
        .any(|c| matches!(c, ' ' | '"' | '\'' | '\n' | '=' | '#'));
    if needs_quotes {
        format!("\"{}\"", value.replace('"', "\\\""))
    } else {
        value.to_string()
    }
}

/// Comment line describing where an OAuth token came from
pub fn oauth_comment(meta: &OAuthMeta) -> String {
    let connection = meta
        .connection
        .as_deref()
        .filter(|c| !c.is_empty())
        .unwrap_or("OAuth");
    match meta.expires_at.as_deref().filter(|e| !e.is_empty()) {
        Some(expires) => format!("# OAuth: {} (expires {})", connection, expires),
        None => format!("# OAuth: {} (short-lived, re-pull to refresh)", connection),
    }
}

pub fn iso_timestamp(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Result of rendering a full pull
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullPull {
    pub content: String,
    /// Variables written with a value
    pub written: usize,
    pub secrets: usize,
}

/// Render the complete file for a full pull. Variables without a value are
/// kept as commented placeholders.
pub fn render_full_pull(
    project: &str,
    tier: Tier,
    now: DateTime<Utc>,
    variables: &[PulledVariable],
) -> FullPull {
    let mut lines = vec![
        format!("# Environment variables for {} ({})", project, tier),
        format!(
            "# Generated by solidactions env:pull on {}",
            iso_timestamp(now)
        ),
        String::new(),
    ];
    let mut written = 0;
    let mut secrets = 0;

    for var in variables {
        let Some(value) = var.value.as_deref() else {
            lines.push(format!("# {}= (no value configured)", var.key));
            continue;
        };
        if let Some(meta) = &var.oauth {
            lines.push(oauth_comment(meta));
        }
        lines.push(format!("{}={}", var.key, format_value(value)));
        written += 1;
        if var.is_secret {
            secrets += 1;
        }
    }
    lines.push(String::new());

    FullPull {
        content: lines.join("\n"),
        written,
        secrets,
    }
}

/// Comment + assignment lines for OAuth variables that carry a value.
pub fn render_oauth_lines(variables: &[PulledVariable]) -> Vec<String> {
    let mut lines = Vec::new();
    for var in variables {
        let Some(value) = var.value.as_deref() else {
            continue;
        };
        lines.push(oauth_comment(&var.oauth.clone().unwrap_or_default()));
        lines.push(format!("{}={}", var.key, format_value(value)));
    }
    lines
}

/// Key assigned by a line of the form `NAME=...` (no leading whitespace).
pub fn assigned_key(line: &str) -> Option<&str> {
    let (key, _) = line.split_once('=')?;
    let mut chars = key.chars();
    let first = chars.next()?;
    if !(first.is_ascii_alphabetic() || first == '_') {
        return None;
    }
    if chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Some(key)
    } else {
        None
    }
}

/// Merge OAuth lines into existing file content without touching anything
/// else. `existing` is `None` when the file does not exist yet.
pub fn merge_oauth(
    existing: Option<&str>,
    keys: &HashSet<String>,
    oauth_lines: &[String],
    now: DateTime<Utc>,
) -> String {
    let Some(existing) = existing else {
        return format!("{}\n", oauth_lines.join("\n"));
    };

    let in_set = |line: &str| assigned_key(line).is_some_and(|k| keys.contains(k));
    let lines: Vec<&str> = existing.split('\n').collect();
    let mut kept: Vec<String> = Vec::with_capacity(lines.len() + oauth_lines.len() + 3);

    for (i, line) in lines.iter().enumerate() {
        if line.starts_with(OAUTH_COMMENT_PREFIX) {
            if let Some(next) = lines.get(i + 1) {
                if in_set(next) {
                    continue;
                }
            }
        }
        if in_set(line) || line.starts_with(OAUTH_BANNER_PREFIX) {
            continue;
        }
        kept.push((*line).to_string());
    }

    while kept.last().is_some_and(|l| l.trim().is_empty()) {
        kept.pop();
    }

    kept.push(String::new());
    kept.push(format!("{}{})", OAUTH_BANNER_PREFIX, iso_timestamp(now)));
    kept.extend(oauth_lines.iter().cloned());
    kept.push(String::new());
    kept.join("\n")
}
