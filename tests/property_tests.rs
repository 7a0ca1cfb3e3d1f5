//! Property-based tests for the validator and engine.
//!
//! These tests use proptest to verify properties hold across
//! many randomly generated workflow definitions.

use flowgate::core::{Guard, GuardOutcome, StateDefinition, TransitionDefinition, WorkflowDefinition};
use flowgate::{create_workflow, WorkflowEngine, WorkflowError};
use futures::executor::block_on;
use proptest::prelude::*;
use std::collections::BTreeSet;

const STATES: [&str; 5] = ["A", "B", "C", "D", "E"];

#[derive(Debug, Clone)]
struct Budget {
    limit: u32,
}

prop_compose! {
    fn arbitrary_state()(index in 0..STATES.len()) -> &'static str {
        STATES[index]
    }
}

prop_compose! {
    /// Edges with an optional threshold guard on each.
    fn arbitrary_edges()(
        edges in prop::collection::vec(
            (arbitrary_state(), arbitrary_state(), prop::option::of(0u32..100)),
            0..12,
        )
    ) -> Vec<(&'static str, &'static str, Option<u32>)> {
        edges
    }
}

fn definition(
    initial: &str,
    edges: &[(&'static str, &'static str, Option<u32>)],
) -> WorkflowDefinition<Budget> {
    let mut definition = WorkflowDefinition::new("generated", initial);
    for name in STATES {
        definition.states.insert(name.into(), StateDefinition::new(name));
    }
    for &(from, to, threshold) in edges {
        let mut transition = TransitionDefinition::new(from, to);
        if let Some(threshold) = threshold {
            transition.guards.push(Guard::<Budget>::check(move |ctx| {
                if ctx.context.limit >= threshold {
                    GuardOutcome::allow()
                } else {
                    GuardOutcome::deny(format!("limit below {threshold}"))
                }
            }));
        }
        definition.transitions.push(transition);
    }
    definition
}

fn engine(
    initial: &str,
    edges: &[(&'static str, &'static str, Option<u32>)],
) -> WorkflowEngine<Budget> {
    create_workflow(definition(initial, edges))
}

proptest! {
    #[test]
    fn initial_state_is_the_declared_one(initial in arbitrary_state(), edges in arbitrary_edges()) {
        let engine = engine(initial, &edges);
        prop_assert_eq!(engine.initial_state().as_str(), initial);
    }

    #[test]
    fn undeclared_pairs_are_always_rejected(
        edges in arbitrary_edges(),
        from in arbitrary_state(),
        to in arbitrary_state(),
        limit in 0u32..200,
    ) {
        prop_assume!(!edges.iter().any(|&(f, t, _)| f == from && t == to));
        let engine = engine("A", &edges);
        let budget = Budget { limit };

        let result = block_on(engine.validate(from, to, &budget)).unwrap();
        prop_assert!(!result.is_allowed());
        prop_assert!(result.errors().is_empty());
        let expected = format!("No transition defined from {from} to {to}");
        prop_assert_eq!(result.reason(), Some(expected.as_str()));

        let asserted = block_on(engine.assert_transition(from, to, &budget));
        let is_invalid = matches!(asserted, Err(WorkflowError::InvalidTransition { .. }));
        prop_assert!(is_invalid);
    }

    #[test]
    fn validation_is_idempotent(
        edges in arbitrary_edges(),
        from in arbitrary_state(),
        to in arbitrary_state(),
        limit in 0u32..200,
    ) {
        let engine = engine("A", &edges);
        let budget = Budget { limit };

        let first = block_on(engine.validate(from, to, &budget)).unwrap();
        let second = block_on(engine.validate(from, to, &budget)).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn allowed_result_always_carries_a_match(
        edges in arbitrary_edges(),
        from in arbitrary_state(),
        to in arbitrary_state(),
        limit in 0u32..200,
    ) {
        let engine = engine("A", &edges);
        let result = block_on(engine.validate(from, to, &Budget { limit })).unwrap();

        prop_assert_eq!(result.is_allowed(), result.matched_transition().is_some());
        if let Some(matched) = result.matched_transition() {
            prop_assert!(matched.matches(from, to));
        }
    }

    #[test]
    fn allowed_targets_are_declared_and_unique(
        edges in arbitrary_edges(),
        from in arbitrary_state(),
        limit in 0u32..200,
    ) {
        let engine = engine("A", &edges);
        let allowed = block_on(engine.allowed_transitions(from, &Budget { limit })).unwrap();

        let unique: BTreeSet<_> = allowed.iter().collect();
        prop_assert_eq!(unique.len(), allowed.len());

        for target in &allowed {
            let declared = edges
                .iter()
                .any(|&(f, t, threshold)| {
                    f == from && t == target.as_str() && threshold.map_or(true, |th| limit >= th)
                });
            prop_assert!(declared, "{} is not reachable from {}", target, from);
        }
    }

    #[test]
    fn unguarded_edges_are_always_allowed(
        from in arbitrary_state(),
        to in arbitrary_state(),
        limit in 0u32..200,
    ) {
        let engine = engine("A", &[(from, to, None)]);
        let result = block_on(engine.validate(from, to, &Budget { limit })).unwrap();
        prop_assert!(result.is_allowed());
    }
}
