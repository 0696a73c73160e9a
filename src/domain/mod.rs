//! Domain Layer
//!
//! Pure logic of the SolidActions client, with no I/O of its own.
//!
//! ## Structure
//!
//! - `entities/` - Manifest, variables, and remote resource projections
//! - `value_objects/` - Immutable value types (Tier, ResourceId)
//! - `services/` - Resolution, `.env` handling, polling state machines
//! - `ports/` - Interface definitions for infrastructure
//!
//! All network, filesystem and timer access goes through the ports.

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
