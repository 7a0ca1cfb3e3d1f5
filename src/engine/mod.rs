//! Workflow engine: validation, assertion, and hook execution.
//!
//! The engine never re-implements guard evaluation; it delegates every
//! decision to the [`TransitionValidator`](crate::validation::TransitionValidator)
//! and only sequences lifecycle hooks around an accepted move.

mod config;
mod workflow;

pub use config::{CandidatePolicy, EngineConfig};
pub use workflow::{create_workflow, WorkflowEngine};
