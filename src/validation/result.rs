//! Outcome of validating one attempted move.

use crate::core::TransitionDefinition;
use crate::error::WorkflowError;
use std::fmt;

/// Reason reported when guards of the evaluated candidate rejected the move.
pub const GUARDS_FAILED: &str = "Guards failed";

pub(crate) fn no_transition_reason(from: &str, to: &str) -> String {
    format!("No transition defined from {from} to {to}")
}

/// Decision for a `(from, to, context)` triple.
///
/// The fields are private so the result is always structurally complete:
/// `matched_transition` is present if and only if the move is allowed.
/// `errors` lists every guard-rejection reason of the attempt, not just the
/// first.
pub struct ValidationResult<'w, C> {
    allowed: bool,
    reason: Option<String>,
    errors: Vec<String>,
    matched: Option<&'w TransitionDefinition<C>>,
}

impl<'w, C> ValidationResult<'w, C> {
    /// The move is legal through `transition`.
    pub fn allow(transition: &'w TransitionDefinition<C>) -> Self {
        Self {
            allowed: true,
            reason: None,
            errors: Vec::new(),
            matched: Some(transition),
        }
    }

    /// The move is rejected.
    pub fn reject(reason: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            errors,
            matched: None,
        }
    }

    /// No declared transition leads from `from` to `to`.
    pub fn no_transition(from: &str, to: &str) -> Self {
        Self::reject(no_transition_reason(from, to), Vec::new())
    }

    /// Whether the move is legal.
    pub fn is_allowed(&self) -> bool {
        self.allowed
    }

    /// Why the move was rejected; `None` when allowed.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }

    /// Every guard-rejection message of the attempt, in evaluation order.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// The winning definition; `Some` only when allowed.
    pub fn matched_transition(&self) -> Option<&'w TransitionDefinition<C>> {
        self.matched
    }

    /// Best available explanation of a rejection: the reason, falling back to
    /// the joined guard errors.
    pub fn explanation(&self) -> Option<String> {
        self.reason.clone().or_else(|| {
            if self.errors.is_empty() {
                None
            } else {
                Some(self.errors.join(", "))
            }
        })
    }

    /// Convert into the matched transition, or an `InvalidTransition` error.
    pub fn into_result(
        self,
        from: &str,
        to: &str,
    ) -> Result<&'w TransitionDefinition<C>, WorkflowError> {
        match self.matched {
            Some(transition) if self.allowed => Ok(transition),
            _ => {
                let reason = self
                    .explanation()
                    .unwrap_or_else(|| "transition rejected".to_string());
                Err(WorkflowError::invalid_transition(
                    from,
                    to,
                    reason,
                    self.errors,
                ))
            }
        }
    }
}

impl<C> Clone for ValidationResult<'_, C> {
    fn clone(&self) -> Self {
        Self {
            allowed: self.allowed,
            reason: self.reason.clone(),
            errors: self.errors.clone(),
            matched: self.matched,
        }
    }
}

/// Equal when the decisions match and both point at the same definition.
impl<C> PartialEq for ValidationResult<'_, C> {
    fn eq(&self, other: &Self) -> bool {
        let same_match = match (self.matched, other.matched) {
            (Some(a), Some(b)) => std::ptr::eq(a, b),
            (None, None) => true,
            _ => false,
        };
        self.allowed == other.allowed
            && self.reason == other.reason
            && self.errors == other.errors
            && same_match
    }
}

impl<C> fmt::Debug for ValidationResult<'_, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationResult")
            .field("allowed", &self.allowed)
            .field("reason", &self.reason)
            .field("errors", &self.errors)
            .field("matched_transition", &self.matched)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allowed_result_carries_match() {
        let transition: TransitionDefinition<()> = TransitionDefinition::new("A", "B");
        let result = ValidationResult::allow(&transition);

        assert!(result.is_allowed());
        assert!(result.reason().is_none());
        assert!(result.errors().is_empty());
        assert!(std::ptr::eq(result.matched_transition().unwrap(), &transition));
    }

    #[test]
    fn rejected_result_has_no_match() {
        let result: ValidationResult<'_, ()> =
            ValidationResult::reject(GUARDS_FAILED, vec!["too small".into()]);

        assert!(!result.is_allowed());
        assert_eq!(result.reason(), Some("Guards failed"));
        assert_eq!(result.errors(), ["too small".to_string()]);
        assert!(result.matched_transition().is_none());
    }

    #[test]
    fn no_transition_reason_names_both_states() {
        let result: ValidationResult<'_, ()> = ValidationResult::no_transition("CREATED", "SUCCESS");

        assert_eq!(
            result.reason(),
            Some("No transition defined from CREATED to SUCCESS")
        );
    }

    #[test]
    fn into_result_converts_rejection() {
        let result: ValidationResult<'_, ()> =
            ValidationResult::reject(GUARDS_FAILED, vec!["a".into(), "b".into()]);

        match result.into_result("X", "Y") {
            Err(WorkflowError::InvalidTransition {
                from,
                to,
                reason,
                errors,
            }) => {
                assert_eq!(from, "X");
                assert_eq!(to, "Y");
                assert_eq!(reason, "Guards failed");
                assert_eq!(errors, vec!["a".to_string(), "b".to_string()]);
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn equality_compares_definition_identity() {
        let first: TransitionDefinition<()> = TransitionDefinition::new("A", "B");
        let second = first.clone();

        assert_eq!(ValidationResult::allow(&first), ValidationResult::allow(&first));
        assert_ne!(ValidationResult::allow(&first), ValidationResult::allow(&second));
    }
}
