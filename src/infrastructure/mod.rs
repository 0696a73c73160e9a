//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `http/` - Platform API client
//! - `archive/` - Deploy bundle creation and extraction
//! - `events/` - NDJSON event sinks
//! - `fs/` - Home directory resolution and atomic writes

pub mod archive;
pub mod events;
pub mod fs;
pub mod http;
pub mod prompt;

pub use events::JsonEventSink;
pub use http::HttpPlatformApi;
pub use prompt::{DialoguerConfirmer, ThreadSleeper};
