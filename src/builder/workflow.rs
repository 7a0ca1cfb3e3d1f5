//! Builder for constructing workflow definitions.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::builder::transition::TransitionBuilder;
use crate::core::{StateDefinition, StateId, TransitionDefinition, WorkflowDefinition};
use std::collections::BTreeMap;

/// Builder for constructing workflow definitions with a fluent API.
///
/// `build` only checks that the builder was used completely; it does not look
/// for dangling state references. Use [`WorkflowDefinition::verify`] or a
/// strict engine for that.
pub struct WorkflowBuilder<C> {
    name: String,
    initial: Option<StateId>,
    states: Vec<StateDefinition<C>>,
    transitions: Vec<TransitionDefinition<C>>,
}

impl<C: 'static> WorkflowBuilder<C> {
    /// Create a new builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            initial: None,
            states: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Set the initial state (required).
    pub fn initial(mut self, state: impl Into<StateId>) -> Self {
        self.initial = Some(state.into());
        self
    }

    /// Add a state using a builder.
    pub fn state(self, builder: StateBuilder<C>) -> Self {
        self.add_state(builder.build())
    }

    /// Add a pre-built state.
    pub fn add_state(mut self, state: StateDefinition<C>) -> Self {
        self.states.push(state);
        self
    }

    /// Add a transition using a builder.
    /// Returns an error if the builder fails validation.
    pub fn transition(mut self, builder: TransitionBuilder<C>) -> Result<Self, BuildError> {
        let transition = builder.build()?;
        self.transitions.push(transition);
        Ok(self)
    }

    /// Add a pre-built transition.
    pub fn add_transition(mut self, transition: TransitionDefinition<C>) -> Self {
        self.transitions.push(transition);
        self
    }

    /// Add multiple transitions at once.
    pub fn transitions(mut self, transitions: Vec<TransitionDefinition<C>>) -> Self {
        self.transitions.extend(transitions);
        self
    }

    /// Build the workflow definition.
    /// Returns an error if required fields are missing or a state repeats.
    pub fn build(self) -> Result<WorkflowDefinition<C>, BuildError> {
        let initial_state = self.initial.ok_or(BuildError::MissingInitialState)?;

        if self.states.is_empty() {
            return Err(BuildError::NoStates);
        }

        let mut states = BTreeMap::new();
        for state in self.states {
            if states.contains_key(&state.name) {
                return Err(BuildError::DuplicateState(state.name.into_inner()));
            }
            states.insert(state.name.clone(), state);
        }

        Ok(WorkflowDefinition {
            name: self.name,
            initial_state,
            states,
            transitions: self.transitions,
        })
    }
}
