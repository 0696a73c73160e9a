//! Terminal presentation: theme, capability detection, views and sinks

pub mod context;
pub mod error;
pub mod format;
pub mod json;
pub mod primitives;
pub mod sinks;
pub mod terminal;
pub mod theme;
pub mod views;
