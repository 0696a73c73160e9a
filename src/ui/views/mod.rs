pub mod env;
pub mod runs;
pub mod schedules;
pub mod variables;
pub mod webhooks;
