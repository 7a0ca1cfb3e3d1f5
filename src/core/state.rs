//! State identifiers and state definitions.
//!
//! A state is named by an opaque, caller-defined label. Labels compare by
//! exact, case-sensitive string equality; no normalization is applied.

use super::action::Action;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::borrow::Borrow;
use std::fmt;

/// Opaque label naming a state.
///
/// # Example
///
/// ```rust
/// use flowgate::core::StateId;
///
/// let paid = StateId::from("PAID");
///
/// assert_eq!(paid, "PAID");
/// assert_ne!(paid, "paid");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StateId(String);

impl StateId {
    /// Create an identifier from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Borrow the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the identifier, returning the owned name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for StateId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for StateId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for StateId {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for StateId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&StateId> for StateId {
    fn from(id: &StateId) -> Self {
        id.clone()
    }
}

impl PartialEq<str> for StateId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for StateId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Declarative description of one state and its lifecycle hooks.
///
/// `name` must equal the key the state is registered under in the owning
/// [`WorkflowDefinition`](super::WorkflowDefinition). `is_terminal` is advisory
/// metadata: the engine does not reject outgoing transitions from a terminal
/// state any differently than from other states.
pub struct StateDefinition<C> {
    pub name: StateId,
    pub description: Option<String>,
    pub is_terminal: bool,
    /// Runs after the transition hook when this state is entered
    pub on_enter: Option<Action<C>>,
    /// Runs first when this state is left
    pub on_leave: Option<Action<C>>,
    pub meta: Map<String, Value>,
}

impl<C> StateDefinition<C> {
    /// Create a plain state with no hooks or metadata.
    pub fn new(name: impl Into<StateId>) -> Self {
        Self {
            name: name.into(),
            description: None,
            is_terminal: false,
            on_enter: None,
            on_leave: None,
            meta: Map::new(),
        }
    }
}

impl<C> Clone for StateDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            description: self.description.clone(),
            is_terminal: self.is_terminal,
            on_enter: self.on_enter.clone(),
            on_leave: self.on_leave.clone(),
            meta: self.meta.clone(),
        }
    }
}

impl<C> fmt::Debug for StateDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateDefinition")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("is_terminal", &self.is_terminal)
            .field("on_enter", &self.on_enter.is_some())
            .field("on_leave", &self.on_leave.is_some())
            .field("meta", &self.meta)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[test]
    fn state_id_equality_is_case_sensitive() {
        let id = StateId::from("PENDING");

        assert_eq!(id, "PENDING");
        assert_ne!(id, "pending");
        assert_ne!(id, StateId::from("PENDING "));
    }

    #[test]
    fn state_id_lookups_work_with_str_keys() {
        let mut map = BTreeMap::new();
        map.insert(StateId::from("PAID"), 1);

        assert_eq!(map.get("PAID"), Some(&1));
        assert_eq!(map.get("Paid"), None);
    }

    #[test]
    fn state_id_serializes_as_plain_string() {
        let id = StateId::from("REFUNDED");
        let json = serde_json::to_string(&id).unwrap();

        assert_eq!(json, "\"REFUNDED\"");
        let back: StateId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn new_state_has_no_hooks() {
        let state: StateDefinition<()> = StateDefinition::new("CREATED");

        assert_eq!(state.name, "CREATED");
        assert!(!state.is_terminal);
        assert!(state.on_enter.is_none());
        assert!(state.on_leave.is_none());
        assert!(state.meta.is_empty());
    }

    #[test]
    fn debug_output_reports_hook_presence() {
        let mut state: StateDefinition<()> = StateDefinition::new("A");
        state.on_enter = Some(Action::new(|_ctx| {}));

        let debug = format!("{state:?}");
        assert!(debug.contains("on_enter: true"));
        assert!(debug.contains("on_leave: false"));
    }
}
