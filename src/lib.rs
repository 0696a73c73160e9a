//! SolidActions - command-line client for the SolidActions workflow platform
//!
//! Deploys workflow projects (validate, bundle, upload, follow the remote
//! build) and keeps environment variables in sync between local `.env`
//! files and the platform's tiered variable store.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;

// Re-exports for convenience
pub use config::ClientConfig;
pub use domain::value_objects::Tier;
pub use error::{SolidError, SolidResult};
