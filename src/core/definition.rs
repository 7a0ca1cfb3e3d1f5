//! Complete workflow definitions and their opt-in integrity check.

use super::state::{StateDefinition, StateId};
use super::transition::TransitionDefinition;
use std::collections::BTreeMap;
use std::fmt;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// A named, closed set of states and the transitions permitted between them.
///
/// Construction performs no integrity checking. Dangling references are
/// tolerated until a validation touches them; call [`WorkflowDefinition::verify`]
/// for an eager check.
pub struct WorkflowDefinition<C> {
    pub name: String,
    pub initial_state: StateId,
    pub states: BTreeMap<StateId, StateDefinition<C>>,
    /// Declaration order matters: it decides which candidate is evaluated first
    pub transitions: Vec<TransitionDefinition<C>>,
}

/// Structural problem found in a workflow definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefinitionIssue {
    #[error("Initial state '{state}' is not a declared state")]
    UnknownInitialState { state: StateId },

    #[error("State registered under '{key}' is named '{name}'")]
    NameMismatch { key: StateId, name: StateId },

    #[error("Transition #{index} has no source states")]
    EmptySourceSet { index: usize },

    #[error("Transition #{index} leaves undeclared state '{state}'")]
    DanglingSource { index: usize, state: StateId },

    #[error("Transition #{index} enters undeclared state '{state}'")]
    DanglingTarget { index: usize, state: StateId },

    #[error("Transition #{duplicate} repeats '{from}' -> '{to}' already declared by #{first}")]
    DuplicateTransition {
        first: usize,
        duplicate: usize,
        from: StateId,
        to: StateId,
    },
}

type IssueCheck = Validation<(), NonEmptyVec<DefinitionIssue>>;

fn require(ok: bool, issue: impl FnOnce() -> DefinitionIssue) -> IssueCheck {
    if ok {
        Validation::success(())
    } else {
        Validation::fail(issue())
    }
}

impl<C> WorkflowDefinition<C> {
    pub fn new(name: impl Into<String>, initial_state: impl Into<StateId>) -> Self {
        Self {
            name: name.into(),
            initial_state: initial_state.into(),
            states: BTreeMap::new(),
            transitions: Vec::new(),
        }
    }

    pub fn state(&self, name: &str) -> Option<&StateDefinition<C>> {
        self.states.get(name)
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    /// Check the definition's structure, collecting ALL issues.
    ///
    /// Reports an unknown initial state, states whose name differs from their
    /// key, transitions with an empty source set, dangling source/target
    /// references, and transitions repeating an earlier `(from, to)` pair.
    pub fn verify(&self) -> Result<(), Vec<DefinitionIssue>> {
        let mut checks: Vec<IssueCheck> = Vec::new();

        checks.push(require(self.has_state(self.initial_state.as_str()), || {
            DefinitionIssue::UnknownInitialState {
                state: self.initial_state.clone(),
            }
        }));

        for (key, state) in &self.states {
            checks.push(require(key == &state.name, || DefinitionIssue::NameMismatch {
                key: key.clone(),
                name: state.name.clone(),
            }));
        }

        let mut seen: BTreeMap<(&StateId, &StateId), usize> = BTreeMap::new();
        for (index, transition) in self.transitions.iter().enumerate() {
            checks.push(require(!transition.from.is_empty(), || {
                DefinitionIssue::EmptySourceSet { index }
            }));
            checks.push(require(self.has_state(transition.to.as_str()), || {
                DefinitionIssue::DanglingTarget {
                    index,
                    state: transition.to.clone(),
                }
            }));

            for source in transition.from.iter() {
                checks.push(require(self.has_state(source.as_str()), || {
                    DefinitionIssue::DanglingSource {
                        index,
                        state: source.clone(),
                    }
                }));

                let first = *seen.entry((source, &transition.to)).or_insert(index);
                checks.push(require(first == index, || {
                    DefinitionIssue::DuplicateTransition {
                        first,
                        duplicate: index,
                        from: source.clone(),
                        to: transition.to.clone(),
                    }
                }));
            }
        }

        match Validation::all_vec(checks).map(|_| ()) {
            Validation::Success(()) => Ok(()),
            Validation::Failure(issues) => Err(issues.iter().cloned().collect()),
        }
    }
}

impl<C> Clone for WorkflowDefinition<C> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            initial_state: self.initial_state.clone(),
            states: self.states.clone(),
            transitions: self.transitions.clone(),
        }
    }
}

impl<C> fmt::Debug for WorkflowDefinition<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WorkflowDefinition")
            .field("name", &self.name)
            .field("initial_state", &self.initial_state)
            .field("states", &self.states)
            .field("transitions", &self.transitions)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_states(names: &[&str]) -> WorkflowDefinition<()> {
        let mut definition = WorkflowDefinition::new("test", "A");
        for name in names {
            definition
                .states
                .insert(StateId::from(*name), StateDefinition::new(*name));
        }
        definition
    }

    #[test]
    fn well_formed_definition_verifies() {
        let mut definition = with_states(&["A", "B", "C"]);
        definition
            .transitions
            .push(TransitionDefinition::new("A", "B"));
        definition
            .transitions
            .push(TransitionDefinition::new(["A", "B"], "C"));

        assert_eq!(definition.verify(), Ok(()));
    }

    #[test]
    fn verify_accumulates_every_issue() {
        let mut definition = with_states(&["B"]);
        definition
            .transitions
            .push(TransitionDefinition::new("B", "MISSING"));
        definition
            .transitions
            .push(TransitionDefinition::new("GHOST", "B"));

        let issues = definition.verify().unwrap_err();

        assert_eq!(issues.len(), 3);
        assert!(issues.contains(&DefinitionIssue::UnknownInitialState {
            state: "A".into()
        }));
        assert!(issues.contains(&DefinitionIssue::DanglingTarget {
            index: 0,
            state: "MISSING".into()
        }));
        assert!(issues.contains(&DefinitionIssue::DanglingSource {
            index: 1,
            state: "GHOST".into()
        }));
    }

    #[test]
    fn verify_flags_duplicates_and_name_mismatch() {
        let mut definition = with_states(&["A", "B"]);
        definition
            .states
            .insert("C".into(), StateDefinition::new("not-c"));
        definition
            .transitions
            .push(TransitionDefinition::new("A", "B"));
        definition
            .transitions
            .push(TransitionDefinition::new(["B", "A"], "B"));

        let issues = definition.verify().unwrap_err();

        assert!(issues.contains(&DefinitionIssue::NameMismatch {
            key: "C".into(),
            name: "not-c".into()
        }));
        assert!(issues.contains(&DefinitionIssue::DuplicateTransition {
            first: 0,
            duplicate: 1,
            from: "A".into(),
            to: "B".into()
        }));
    }

    #[test]
    fn empty_source_set_is_reported() {
        let mut definition = with_states(&["A"]);
        definition
            .transitions
            .push(TransitionDefinition::new(Vec::<StateId>::new(), "A"));

        let issues = definition.verify().unwrap_err();
        assert_eq!(issues, vec![DefinitionIssue::EmptySourceSet { index: 0 }]);
    }

    #[test]
    fn state_lookup_by_str() {
        let definition = with_states(&["A"]);

        assert!(definition.state("A").is_some());
        assert!(definition.state("a").is_none());
    }
}
