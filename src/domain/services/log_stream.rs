//! Incremental log streaming
//!
//! The same endpoint may return logs either as one growing string or as a
//! growing list of entries. Both are diffed against a cursor holding the
//! length already emitted, never against the previous response, so an
//! identical response emits nothing.

use serde::{Deserialize, Serialize};

/// One structured log entry
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub stream: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl LogEntry {
    /// `message`, falling back to `content`
    pub fn text(&self) -> &str {
        self.message
            .as_deref()
            .filter(|m| !m.is_empty())
            .or(self.content.as_deref())
            .unwrap_or("")
    }

    pub fn is_stderr(&self) -> bool {
        self.stream.as_deref() == Some("stderr")
    }
}

/// Log content in either of its two wire shapes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LogPayload {
    Raw(String),
    Entries(Vec<LogEntry>),
}

impl Default for LogPayload {
    fn default() -> Self {
        LogPayload::Raw(String::new())
    }
}

impl LogPayload {
    /// Bytes for raw text, entry count for structured logs
    pub fn len(&self) -> usize {
        match self {
            LogPayload::Raw(text) => text.len(),
            LogPayload::Entries(entries) => entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Everything past `offset`
    pub fn suffix(&self, offset: usize) -> LogPayload {
        match self {
            LogPayload::Raw(text) => {
                let start = ceil_char_boundary(text, offset);
                LogPayload::Raw(text[start..].to_string())
            }
            LogPayload::Entries(entries) => {
                LogPayload::Entries(entries.get(offset..).unwrap_or_default().to_vec())
            }
        }
    }
}

fn ceil_char_boundary(text: &str, offset: usize) -> usize {
    let mut i = offset.min(text.len());
    while !text.is_char_boundary(i) {
        i += 1;
    }
    i
}

/// Length of log content already emitted. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LogCursor {
    offset: usize,
}

impl LogCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Return the unseen part of `payload` and move past it. `None` when the
    /// payload is not longer than what was already emitted.
    pub fn advance(&mut self, payload: &LogPayload) -> Option<LogPayload> {
        let len = payload.len();
        if len <= self.offset {
            return None;
        }
        let fresh = payload.suffix(self.offset);
        self.offset = len;
        Some(fresh)
    }
}
