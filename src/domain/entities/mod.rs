//! Domain Entities
//!
//! Transient client-side projections of local and remote state.

pub mod manifest;
pub mod remote;
pub mod variables;

pub use manifest::{WorkflowDeclaration, WorkflowManifest, MANIFEST_FILE};
pub use remote::{
    NewProject, NewSchedule, ProjectInfo, RunInfo, RunStatus, Schedule, Webhook, WorkflowRef,
};
pub use variables::{
    BulkPushSummary, DevSource, EnvValue, GlobalVariable, MappingSource, NewGlobalVariable,
    ProjectVariableMapping, StagingSource, OAUTH_SOURCE_TYPE,
};
