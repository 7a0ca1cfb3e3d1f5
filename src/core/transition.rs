//! Declared transitions between states.

use super::action::Action;
use super::guard::Guard;
use super::state::StateId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source side of a transition: one state or several states collapsing to the
/// same target.
///
/// Both shapes are only ever consulted through [`SourceStates::contains`], so
/// a single state behaves exactly like a one-element set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SourceStates {
    One(StateId),
    Many(Vec<StateId>),
}

impl SourceStates {
    /// Membership test by exact label match.
    pub fn contains(&self, state: &str) -> bool {
        self.as_slice().iter().any(|s| s.as_str() == state)
    }

    pub fn as_slice(&self) -> &[StateId] {
        match self {
            Self::One(state) => std::slice::from_ref(state),
            Self::Many(states) => states,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &StateId> {
        self.as_slice().iter()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }
}

impl From<&str> for SourceStates {
    fn from(state: &str) -> Self {
        Self::One(state.into())
    }
}

impl From<String> for SourceStates {
    fn from(state: String) -> Self {
        Self::One(state.into())
    }
}

impl From<StateId> for SourceStates {
    fn from(state: StateId) -> Self {
        Self::One(state)
    }
}

impl From<Vec<StateId>> for SourceStates {
    fn from(states: Vec<StateId>) -> Self {
        Self::Many(states)
    }
}

impl<const N: usize> From<[&str; N]> for SourceStates {
    fn from(states: [&str; N]) -> Self {
        Self::Many(states.iter().map(|s| StateId::from(*s)).collect())
    }
}

/// A legal move, gated by guards, with an optional transition hook.
pub struct TransitionDefinition<C> {
    pub from: SourceStates,
    pub to: StateId,
    /// Evaluated in declaration order; all must pass
    pub guards: Vec<Guard<C>>,
    pub on_transition: Option<Action<C>>,
    /// Human-readable label, e.g. for a UI button
    pub label: Option<String>,
}

impl<C> TransitionDefinition<C> {
    /// Create an unguarded transition without hooks.
    pub fn new(from: impl Into<SourceStates>, to: impl Into<StateId>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
            guards: Vec::new(),
            on_transition: None,
            label: None,
        }
    }

    /// Whether this definition leaves `from` (any target).
    pub fn leaves(&self, from: &str) -> bool {
        self.from.contains(from)
    }

    /// Whether this definition is a candidate for the move `from -> to`.
    pub fn matches(&self, from: &str, to: &str) -> bool {
        self.to.as_str() == to && self.leaves(from)
    }
}

impl<C> Clone for TransitionDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            from: self.from.clone(),
            to: self.to.clone(),
            guards: self.guards.clone(),
            on_transition: self.on_transition.clone(),
            label: self.label.clone(),
        }
    }
}

impl<C> fmt::Debug for TransitionDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionDefinition")
            .field("from", &self.from)
            .field("to", &self.to)
            .field("guards", &self.guards.len())
            .field("on_transition", &self.on_transition.is_some())
            .field("label", &self.label)
            .finish()
    }
}
