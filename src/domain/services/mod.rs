//! Domain Services
//!
//! Pure logic: declaration parsing, tier resolution, `.env` handling and the
//! polling state machines.

pub mod build_poll;
pub mod dotenv;
pub mod env_declarations;
pub mod env_push;
pub mod env_resolver;
pub mod log_stream;
pub mod run_poll;

pub use build_poll::{BuildOutcome, BuildPoll, BuildTick, BUILD_POLL_INTERVAL, BUILD_POLL_MAX_ATTEMPTS};
pub use dotenv::{OAuthMeta, PulledVariable};
pub use env_declarations::{DeclarationPayload, EnvDeclaration, EnvDeclarationSource};
pub use env_push::{is_secret_name, plan_env_push, EnvPushPlan};
pub use env_resolver::{resolve, ResolvedValue};
pub use log_stream::{LogCursor, LogEntry, LogPayload};
pub use run_poll::{RunObservation, RunOutcome, RunPoll, RunPollSettings, RunTick};
