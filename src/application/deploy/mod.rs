//! Deploy Module
//!
//! Orchestrates a deployment: validate, resolve or create the tier's project,
//! bundle and upload the source, follow the build, then synchronize env.
//!
//! ## Structure
//!
//! - `options` - Configuration types (`DeployOptions`)
//! - `result` - Result types (`DeployResult`)
//! - `use_case` - Core use case logic (`DeployUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use solidactions::application::deploy::{DeployOptions, DeployUseCase};
//!
//! let use_case = DeployUseCase::new(&api, &ThreadSleeper);
//! let result = use_case.execute_with_events(&DeployOptions::new("shop", "."), &sink)?;
//! ```

mod options;
mod result;
mod use_case;

pub use options::DeployOptions;
pub use result::DeployResult;
pub use use_case::DeployUseCase;
