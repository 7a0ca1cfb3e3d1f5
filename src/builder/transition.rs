//! Builder for constructing transition definitions.

use crate::builder::error::BuildError;
use crate::core::{Action, Guard, SourceStates, StateId, TransitionContext, TransitionDefinition};

/// Builder for constructing transitions with a fluent API.
pub struct TransitionBuilder<C> {
    from: Option<SourceStates>,
    to: Option<StateId>,
    guards: Vec<Guard<C>>,
    on_transition: Option<Action<C>>,
    label: Option<String>,
}

impl<C: 'static> TransitionBuilder<C> {
    /// Create a new transition builder.
    pub fn new() -> Self {
        Self {
            from: None,
            to: None,
            guards: Vec::new(),
            on_transition: None,
            label: None,
        }
    }

    /// Set a single source state (required unless `from_any` is used).
    pub fn from(mut self, state: impl Into<StateId>) -> Self {
        self.from = Some(SourceStates::One(state.into()));
        self
    }

    /// Set several source states collapsing to the same target.
    pub fn from_any<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<StateId>,
    {
        self.from = Some(SourceStates::Many(
            states.into_iter().map(Into::into).collect(),
        ));
        self
    }

    /// Set the target state (required).
    pub fn to(mut self, state: impl Into<StateId>) -> Self {
        self.to = Some(state.into());
        self
    }

    /// Append a guard. Guards run in the order they are added.
    pub fn guard(mut self, guard: Guard<C>) -> Self {
        self.guards.push(guard);
        self
    }

    /// Append a synchronous boolean guard.
    pub fn when<F>(self, predicate: F) -> Self
    where
        F: Fn(TransitionContext<'_, C>) -> bool + Send + Sync + 'static,
    {
        self.guard(Guard::new(predicate))
    }

    /// Set the transition hook (optional).
    pub fn on_transition(mut self, action: Action<C>) -> Self {
        self.on_transition = Some(action);
        self
    }

    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Build the transition.
    pub fn build(self) -> Result<TransitionDefinition<C>, BuildError> {
        let from = self.from.ok_or(BuildError::MissingFromState)?;
        let to = self.to.ok_or(BuildError::MissingToState)?;
        if from.is_empty() {
            return Err(BuildError::EmptySourceSet);
        }

        Ok(TransitionDefinition {
            from,
            to,
            guards: self.guards,
            on_transition: self.on_transition,
            label: self.label,
        })
    }
}

impl<C: 'static> Default for TransitionBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}
