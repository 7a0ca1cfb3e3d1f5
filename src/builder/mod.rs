//! Builder API for ergonomic workflow construction.
//!
//! This module provides fluent builders for states, transitions, and whole
//! workflow definitions, plus shorthand constructors for the common cases.

pub mod error;
pub mod state;
pub mod transition;
pub mod workflow;

pub use error::BuildError;
pub use state::StateBuilder;
pub use transition::TransitionBuilder;
pub use workflow::WorkflowBuilder;

use crate::core::{Guard, TransitionContext, TransitionDefinition};

/// Create an unguarded transition.
///
/// # Example
///
/// ```
/// use flowgate::builder::simple_transition;
///
/// let transition = simple_transition::<()>("CREATED", "PROCESSING");
/// assert!(transition.matches("CREATED", "PROCESSING"));
/// ```
pub fn simple_transition<C>(from: &str, to: &str) -> TransitionDefinition<C> {
    TransitionDefinition::new(from, to)
}

/// Create a transition with a single boolean guard.
///
/// # Example
///
/// ```
/// use flowgate::builder::guarded_transition;
///
/// let transition = guarded_transition::<u32, _>("PENDING", "PAID", |ctx| *ctx.context > 0);
/// assert_eq!(transition.guards.len(), 1);
/// ```
pub fn guarded_transition<C, F>(from: &str, to: &str, guard: F) -> TransitionDefinition<C>
where
    C: 'static,
    F: Fn(TransitionContext<'_, C>) -> bool + Send + Sync + 'static,
{
    let mut transition = TransitionDefinition::new(from, to);
    transition.guards.push(Guard::new(guard));
    transition
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_transition_builds() {
        let transition = simple_transition::<()>("A", "B");

        assert_eq!(transition.to, "B");
        assert!(transition.guards.is_empty());
        assert!(transition.leaves("A"));
    }

    #[tokio::test]
    async fn guarded_transition_respects_guard() {
        let transition = guarded_transition::<i64, _>("A", "B", |ctx| *ctx.context >= 0);

        let positive = TransitionContext::new("A", "B", &5i64);
        let negative = TransitionContext::new("A", "B", &-5i64);

        assert!(transition.guards[0].evaluate(positive).await.unwrap().is_allowed());
        assert!(!transition.guards[0].evaluate(negative).await.unwrap().is_allowed());
    }
}
