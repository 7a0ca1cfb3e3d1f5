//! Flowgate: a declarative workflow transition engine
//!
//! Flowgate answers "is moving from state A to state B legal under this
//! runtime context?", executes accepted moves with ordered lifecycle hooks,
//! and enumerates the states reachable next. The engine is stateless: callers
//! track the current state and supply it on every call.
//!
//! # Core Concepts
//!
//! - **Definition**: Immutable description of states, transitions, guards, and hooks
//! - **Guards**: Possibly-suspending predicates gating a transition
//! - **Validator**: Pure decision over candidate transitions and their guards
//! - **Engine**: Assertion semantics and `on_leave -> on_transition -> on_enter` hooks
//!
//! # Example
//!
//! ```rust
//! use flowgate::builder::{StateBuilder, TransitionBuilder, WorkflowBuilder};
//! use flowgate::core::{Guard, GuardOutcome};
//! use flowgate::create_workflow;
//!
//! struct Order {
//!     amount: u64,
//!     paid: u64,
//! }
//!
//! let definition = WorkflowBuilder::<Order>::new("checkout")
//!     .initial("PROCESSING")
//!     .state(StateBuilder::new("PROCESSING"))
//!     .state(StateBuilder::new("SUCCESS").terminal())
//!     .transition(
//!         TransitionBuilder::<Order>::new()
//!             .from("PROCESSING")
//!             .to("SUCCESS")
//!             .guard(Guard::<Order>::check(|ctx| {
//!                 if ctx.context.paid < ctx.context.amount {
//!                     GuardOutcome::deny("Insufficient payment amount")
//!                 } else {
//!                     GuardOutcome::allow()
//!                 }
//!             })),
//!     )
//!     .unwrap()
//!     .build()
//!     .unwrap();
//!
//! let engine = create_workflow(definition);
//! let order = Order { amount: 100, paid: 50 };
//!
//! let result = futures::executor::block_on(engine.validate("PROCESSING", "SUCCESS", &order)).unwrap();
//! assert!(!result.is_allowed());
//! assert_eq!(result.errors(), ["Insufficient payment amount".to_string()]);
//! ```

pub mod builder;
pub mod core;
pub mod engine;
pub mod error;
pub mod validation;

// Re-export commonly used types
pub use crate::core::{
    Action, Guard, GuardOutcome, SourceStates, StateDefinition, StateId, TransitionContext,
    TransitionDefinition, WorkflowDefinition,
};
pub use engine::{create_workflow, CandidatePolicy, EngineConfig, WorkflowEngine};
pub use error::WorkflowError;
pub use validation::{TransitionValidator, ValidationResult};
