//! Console renderings of deploy and run progress

mod deploy;
mod run;

pub use deploy::ConsoleDeploySink;
pub use run::{ConsoleRunSink, RunView};
