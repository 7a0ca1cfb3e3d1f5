//! Declarative workflow definition model.
//!
//! This module contains the pure data describing a workflow:
//! - State identifiers and state definitions with entry/exit hooks
//! - Transition definitions with guards and a transition hook
//! - The complete workflow definition and its integrity check
//!
//! Nothing here executes a transition; guards and hooks are stored as
//! callback references and only run when the validator or engine invokes them.

mod action;
mod context;
mod definition;
mod guard;
mod state;
mod transition;

pub use action::{Action, ActionResult};
pub use context::TransitionContext;
pub use definition::{DefinitionIssue, WorkflowDefinition};
pub use guard::{Guard, GuardOutcome, GuardResult};
pub use state::{StateDefinition, StateId};
pub use transition::{SourceStates, TransitionDefinition};

/// Error type for caller-owned guard and hook failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;
