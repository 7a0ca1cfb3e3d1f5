//! Guard predicates for controlling state transitions.
//!
//! Guards decide whether a declared transition may run under the runtime
//! context of one attempt. A guard may answer synchronously or suspend (for
//! example to query a database), and may carry a human-readable reason when
//! it rejects. Guards should be free of side effects: the validator runs them
//! every time a transition is validated or enumerated.

use super::context::TransitionContext;
use super::BoxError;
use futures::future::{self, BoxFuture};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// Answer produced by a guard.
///
/// `Allow` passes; `Deny` fails, optionally explaining why. The explanation
/// ends up in [`ValidationResult::errors`](crate::validation::ValidationResult::errors).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum GuardOutcome {
    Allow,
    Deny { reason: Option<String> },
}

impl GuardOutcome {
    /// Let the transition through.
    pub fn allow() -> Self {
        Self::Allow
    }

    /// Reject with a reason that will be reported to the caller.
    pub fn deny(reason: impl Into<String>) -> Self {
        Self::Deny {
            reason: Some(reason.into()),
        }
    }

    /// Reject without contributing a message.
    pub fn deny_silently() -> Self {
        Self::Deny { reason: None }
    }

    /// Whether the guard passed.
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allow)
    }

    /// Rejection message, if the guard denied with one.
    pub fn reason(&self) -> Option<&str> {
        match self {
            Self::Allow => None,
            Self::Deny { reason } => reason.as_deref(),
        }
    }
}

impl From<bool> for GuardOutcome {
    fn from(allowed: bool) -> Self {
        if allowed {
            Self::Allow
        } else {
            Self::Deny { reason: None }
        }
    }
}

/// Result of evaluating a guard. `Err` means the guard itself broke, which is
/// fatal for the validation call rather than a business rejection.
pub type GuardResult = Result<GuardOutcome, BoxError>;

type GuardFn<C> =
    dyn for<'a> Fn(TransitionContext<'a, C>) -> BoxFuture<'a, GuardResult> + Send + Sync;

/// Predicate gating a transition.
///
/// Guards are cheap to clone; clones share the same predicate.
///
/// # Example
///
/// ```rust
/// use flowgate::core::{Guard, GuardOutcome, TransitionContext};
///
/// struct Payment {
///     amount: u64,
///     paid: u64,
/// }
///
/// let fully_paid = Guard::<Payment>::check(|ctx| {
///     if ctx.context.paid < ctx.context.amount {
///         GuardOutcome::deny("Insufficient payment amount")
///     } else {
///         GuardOutcome::allow()
///     }
/// });
///
/// let payment = Payment { amount: 100, paid: 50 };
/// let ctx = TransitionContext::new("PROCESSING", "SUCCESS", &payment);
/// let outcome = futures::executor::block_on(fully_paid.evaluate(ctx)).unwrap();
///
/// assert_eq!(outcome.reason(), Some("Insufficient payment amount"));
/// ```
pub struct Guard<C> {
    predicate: Arc<GuardFn<C>>,
    description: Option<String>,
}

impl<C: 'static> Guard<C> {
    /// Create a guard from a synchronous boolean predicate.
    ///
    /// A `false` answer rejects without a reason.
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(TransitionContext<'_, C>) -> bool + Send + Sync + 'static,
    {
        Self::try_check(move |ctx| Ok(GuardOutcome::from(predicate(ctx))))
    }

    /// Create a guard from a synchronous predicate that can explain a rejection.
    pub fn check<F>(predicate: F) -> Self
    where
        F: Fn(TransitionContext<'_, C>) -> GuardOutcome + Send + Sync + 'static,
    {
        Self::try_check(move |ctx| Ok(predicate(ctx)))
    }

    /// Create a guard from a synchronous predicate that may itself fail.
    pub fn try_check<F>(predicate: F) -> Self
    where
        F: Fn(TransitionContext<'_, C>) -> GuardResult + Send + Sync + 'static,
    {
        Self::from_async(move |ctx| Box::pin(future::ready(predicate(ctx))))
    }

    /// Create a guard whose evaluation suspends.
    ///
    /// The returned future may borrow from the context.
    pub fn from_async<F>(predicate: F) -> Self
    where
        F: for<'a> Fn(TransitionContext<'a, C>) -> BoxFuture<'a, GuardResult>
            + Send
            + Sync
            + 'static,
    {
        Guard {
            predicate: Arc::new(predicate),
            description: None,
        }
    }
}

impl<C> Guard<C> {
    /// Attach a description used in logs.
    pub fn describe(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Human-readable label, if one was given.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Evaluate the guard against one attempt's context.
    pub fn evaluate<'a>(&'a self, ctx: TransitionContext<'a, C>) -> BoxFuture<'a, GuardResult> {
        (self.predicate)(ctx)
    }
}

impl<C> Clone for Guard<C> {
    fn clone(&self) -> Self {
        Self {
            predicate: Arc::clone(&self.predicate),
            description: self.description.clone(),
        }
    }
}

impl<C> fmt::Debug for Guard<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
