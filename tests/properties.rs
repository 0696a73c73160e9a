//! Property tests for solidactions.
//!
//! Properties use randomized input generation to protect invariants such as
//! "inheritance only flows downward" and "logs are never emitted twice".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/env_resolution.rs"]
mod env_resolution;

#[path = "properties/env_declarations.rs"]
mod env_declarations;

#[path = "properties/log_cursor.rs"]
mod log_cursor;

#[path = "properties/dotenv.rs"]
mod dotenv;
