//! Builder for state definitions.

use crate::core::{Action, StateDefinition, StateId, TransitionContext};
use futures::future::BoxFuture;
use serde_json::Value;

/// Builder for a single state with a fluent API.
pub struct StateBuilder<C> {
    state: StateDefinition<C>,
}

impl<C: 'static> StateBuilder<C> {
    /// Start a state named `name` with no hooks.
    pub fn new(name: impl Into<StateId>) -> Self {
        Self {
            state: StateDefinition::new(name),
        }
    }

    /// Set a human-readable description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.state.description = Some(description.into());
        self
    }

    /// Mark the state terminal (advisory only).
    pub fn terminal(mut self) -> Self {
        self.state.is_terminal = true;
        self
    }

    /// Set the entry hook.
    pub fn on_enter(mut self, action: Action<C>) -> Self {
        self.state.on_enter = Some(action);
        self
    }

    /// Set the exit hook.
    pub fn on_leave(mut self, action: Action<C>) -> Self {
        self.state.on_leave = Some(action);
        self
    }

    /// Set a suspending entry hook from a closure.
    pub fn on_enter_async<F>(self, action: F) -> Self
    where
        F: for<'a> Fn(TransitionContext<'a, C>) -> BoxFuture<'a, crate::core::ActionResult>
            + Send
            + Sync
            + 'static,
    {
        self.on_enter(Action::from_async(action))
    }

    /// Set a suspending exit hook from a closure.
    pub fn on_leave_async<F>(self, action: F) -> Self
    where
        F: for<'a> Fn(TransitionContext<'a, C>) -> BoxFuture<'a, crate::core::ActionResult>
            + Send
            + Sync
            + 'static,
    {
        self.on_leave(Action::from_async(action))
    }

    /// Attach a metadata entry.
    pub fn meta(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.state.meta.insert(key.into(), value.into());
        self
    }

    /// Finish the state. Never fails.
    pub fn build(self) -> StateDefinition<C> {
        self.state
    }
}
