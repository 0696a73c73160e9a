//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod resource_id;
mod tier;

pub use resource_id::ResourceId;
pub use tier::Tier;
