//! Error taxonomy for workflow operations.
//!
//! Business rejections are not errors: they come back as a
//! [`ValidationResult`](crate::validation::ValidationResult) with
//! `allowed == false`. The variants below signal programmer or configuration
//! mistakes, assertion failures, and failures raised by guards or hooks.

use crate::core::{BoxError, DefinitionIssue};
use std::fmt;
use thiserror::Error;

/// Which lifecycle hook was running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookKind {
    OnLeave,
    OnTransition,
    OnEnter,
}

impl fmt::Display for HookKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OnLeave => f.write_str("on_leave"),
            Self::OnTransition => f.write_str("on_transition"),
            Self::OnEnter => f.write_str("on_enter"),
        }
    }
}

/// Base error kind for every workflow failure.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Invalid transition from '{from}' to '{to}': {reason}")]
    InvalidTransition {
        from: String,
        to: String,
        reason: String,
        errors: Vec<String>,
    },

    #[error("State '{state}' not found in workflow definition")]
    StateNotFound { state: String },

    #[error("Guard failed for transition from '{from}' to '{to}': {}", .reasons.join(", "))]
    GuardFailed {
        from: String,
        to: String,
        reasons: Vec<String>,
    },

    #[error("Guard errored while validating '{from}' -> '{to}': {source}")]
    GuardError {
        from: String,
        to: String,
        source: BoxError,
    },

    #[error("{hook} hook failed during '{from}' -> '{to}': {source}")]
    HookFailed {
        hook: HookKind,
        from: String,
        to: String,
        source: BoxError,
    },

    #[error("Invalid workflow definition: {} issue(s), first: {}", .issues.len(), first_issue(.issues))]
    InvalidDefinition { issues: Vec<DefinitionIssue> },

    #[error("Invalid engine configuration: {0}")]
    Config(#[from] serde_json::Error),
}

fn first_issue(issues: &[DefinitionIssue]) -> String {
    issues
        .first()
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

impl WorkflowError {
    pub(crate) fn invalid_transition(
        from: &str,
        to: &str,
        reason: impl Into<String>,
        errors: Vec<String>,
    ) -> Self {
        Self::InvalidTransition {
            from: from.to_string(),
            to: to.to_string(),
            reason: reason.into(),
            errors,
        }
    }

    pub(crate) fn state_not_found(state: &str) -> Self {
        Self::StateNotFound {
            state: state.to_string(),
        }
    }
}
