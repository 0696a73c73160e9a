//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod confirm;
pub mod deploy_events;
pub mod platform_api;
pub mod run_events;
pub mod sleeper;

pub use confirm::{Confirmer, FixedAnswer};
pub use deploy_events::{DeployEvent, DeployEventSink, NoopEventSink};
pub use platform_api::{MappingQuery, PlatformApi};
pub use run_events::{NoopRunSink, RunEvent, RunEventSink};
pub use sleeper::{NoSleep, Sleeper};
