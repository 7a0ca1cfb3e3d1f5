//! Build errors for workflow, state, and transition builders.

use thiserror::Error;

/// Errors that can occur when building workflow definitions.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Initial state not specified. Call .initial(state) before .build()")]
    MissingInitialState,

    #[error("No states declared. Add at least one state")]
    NoStates,

    #[error("State '{0}' declared more than once")]
    DuplicateState(String),

    #[error("Transition source state not specified. Call .from(state) or .from_any(states)")]
    MissingFromState,

    #[error("Transition target state not specified. Call .to(state)")]
    MissingToState,

    #[error("Transition source set is empty")]
    EmptySourceSet,
}
