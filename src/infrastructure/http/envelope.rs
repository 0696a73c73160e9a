//! Response envelopes
//!
//! Several endpoints answer either with a bare value or wrapped in an object.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::domain::entities::RunInfo;
use crate::domain::services::LogPayload;
use crate::error::SolidResult;

/// `[...]` or `{ "data": [...] }`
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListEnvelope<T> {
    Bare(Vec<T>),
    Wrapped {
        #[serde(default = "Vec::new")]
        data: Vec<T>,
    },
}

impl<T> ListEnvelope<T> {
    pub(crate) fn into_vec(self) -> Vec<T> {
        match self {
            ListEnvelope::Bare(items) | ListEnvelope::Wrapped { data: items } => items,
        }
    }
}

/// `{ "run": {...} }` or the run itself
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum RunEnvelope {
    Wrapped { run: RunInfo },
    Bare(RunInfo),
}

impl RunEnvelope {
    pub(crate) fn into_run(self) -> RunInfo {
        match self {
            RunEnvelope::Wrapped { run } | RunEnvelope::Bare(run) => run,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct LogsEnvelope {
    #[serde(default)]
    pub logs: Option<LogPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum BuildLogEnvelope {
    Wrapped {
        #[serde(default)]
        build_log: Option<String>,
    },
    Raw(String),
}

/// Decode a list body; empty or `null` bodies are empty lists.
pub(crate) fn decode_list<T: DeserializeOwned>(body: &str) -> SolidResult<Vec<T>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }
    let envelope: Option<ListEnvelope<T>> = serde_json::from_str(body)?;
    Ok(envelope.map(ListEnvelope::into_vec).unwrap_or_default())
}

/// Build log from `{build_log}`, a JSON string, or a plain-text body.
pub(crate) fn decode_build_log(body: &str) -> Option<String> {
    let log = match serde_json::from_str::<BuildLogEnvelope>(body) {
        Ok(BuildLogEnvelope::Wrapped { build_log }) => build_log,
        Ok(BuildLogEnvelope::Raw(text)) => Some(text),
        Err(_) => Some(body.to_string()),
    };
    log.filter(|l| !l.is_empty())
}
