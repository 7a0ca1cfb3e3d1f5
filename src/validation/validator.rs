//! Pure decision function over declared transitions and their guards.

use super::result::{no_transition_reason, ValidationResult, GUARDS_FAILED};
use crate::core::{GuardOutcome, StateId, TransitionContext, TransitionDefinition, WorkflowDefinition};
use crate::engine::CandidatePolicy;
use crate::error::WorkflowError;
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use tracing::{debug, warn};

/// A single guard rejection, in declaration order within its transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GuardRejection {
    pub position: usize,
    pub reason: Option<String>,
}

type GuardCheck = Validation<(), NonEmptyVec<GuardRejection>>;

/// Decides whether a move is legal. Never runs hooks.
///
/// Guards run sequentially: guard *i+1* starts only after guard *i* resolves.
/// Every guard of an evaluated candidate runs, so a rejection reports all
/// violated rules at once. A guard returning `Err` aborts the call with
/// [`WorkflowError::GuardError`].
pub struct TransitionValidator<'w, C> {
    definition: &'w WorkflowDefinition<C>,
    policy: CandidatePolicy,
}

impl<'w, C> TransitionValidator<'w, C> {
    pub fn new(definition: &'w WorkflowDefinition<C>) -> Self {
        Self::with_policy(definition, CandidatePolicy::default())
    }

    pub fn with_policy(definition: &'w WorkflowDefinition<C>, policy: CandidatePolicy) -> Self {
        Self { definition, policy }
    }

    /// Candidate transitions for `from -> to`, in declaration order.
    pub fn candidates<'s>(
        &'s self,
        from: &'s str,
        to: &'s str,
    ) -> impl Iterator<Item = (usize, &'w TransitionDefinition<C>)> + 's {
        self.definition
            .transitions
            .iter()
            .enumerate()
            .filter(move |(_, transition)| transition.matches(from, to))
    }

    /// Validate the move `from -> to` under `context`.
    pub async fn validate_transition(
        &self,
        from: &str,
        to: &str,
        context: &C,
    ) -> Result<ValidationResult<'w, C>, WorkflowError> {
        let ctx = TransitionContext::new(from, to, context);
        let mut evaluated = 0usize;
        let mut errors = Vec::new();

        for (index, candidate) in self.candidates(from, to) {
            evaluated += 1;
            self.warn_dangling(index, from, to);

            match self.evaluate_guards(candidate, ctx).await? {
                Validation::Success(()) => {
                    debug!(
                        workflow = %self.definition.name,
                        from, to, index, "transition allowed"
                    );
                    return Ok(ValidationResult::allow(candidate));
                }
                Validation::Failure(rejections) => {
                    errors.extend(rejections.iter().filter_map(|r| r.reason.clone()));
                    debug!(
                        workflow = %self.definition.name,
                        from, to, index,
                        rejected = rejections.len(),
                        "guards rejected candidate"
                    );
                    if self.policy == CandidatePolicy::FirstDeclared {
                        break;
                    }
                }
            }
        }

        if evaluated == 0 {
            debug!(workflow = %self.definition.name, from, to, "no candidate transition");
            return Ok(ValidationResult::no_transition(from, to));
        }

        Ok(ValidationResult::reject(GUARDS_FAILED, errors))
    }

    /// Fail-fast variant: stops at the first rejecting guard.
    ///
    /// Returns the matched transition, [`WorkflowError::GuardFailed`] carrying
    /// the first rejection reason of each evaluated candidate, or
    /// [`WorkflowError::InvalidTransition`] when no candidate exists.
    pub async fn validate_fail_fast(
        &self,
        from: &str,
        to: &str,
        context: &C,
    ) -> Result<&'w TransitionDefinition<C>, WorkflowError> {
        let ctx = TransitionContext::new(from, to, context);
        let mut evaluated = 0usize;
        let mut reasons = Vec::new();

        for (index, candidate) in self.candidates(from, to) {
            evaluated += 1;
            self.warn_dangling(index, from, to);

            match self.first_rejection(candidate, ctx).await? {
                None => return Ok(candidate),
                Some(rejection) => {
                    reasons.extend(rejection.reason);
                    if self.policy == CandidatePolicy::FirstDeclared {
                        break;
                    }
                }
            }
        }

        if evaluated == 0 {
            return Err(WorkflowError::invalid_transition(
                from,
                to,
                no_transition_reason(from, to),
                Vec::new(),
            ));
        }

        Err(WorkflowError::GuardFailed {
            from: from.to_string(),
            to: to.to_string(),
            reasons,
        })
    }

    /// Targets reachable from `from` through a candidate whose guards all
    /// pass, de-duplicated in order of first successful appearance.
    ///
    /// An empty list is a valid answer, not an error.
    pub async fn allowed_transitions(
        &self,
        from: &str,
        context: &C,
    ) -> Result<Vec<StateId>, WorkflowError> {
        let mut allowed: Vec<StateId> = Vec::new();

        for transition in self.definition.transitions.iter().filter(|t| t.leaves(from)) {
            let ctx = TransitionContext::new(from, transition.to.as_str(), context);
            let passed = self.evaluate_guards(transition, ctx).await?.is_success();
            if passed && !allowed.contains(&transition.to) {
                allowed.push(transition.to.clone());
            }
        }

        debug!(
            workflow = %self.definition.name,
            from,
            allowed = allowed.len(),
            "enumerated allowed transitions"
        );
        Ok(allowed)
    }

    /// Run every guard of `transition`, accumulating all rejections.
    pub async fn evaluate_guards(
        &self,
        transition: &TransitionDefinition<C>,
        ctx: TransitionContext<'_, C>,
    ) -> Result<GuardCheck, WorkflowError> {
        let mut checks: Vec<GuardCheck> = Vec::with_capacity(transition.guards.len());

        for (position, guard) in transition.guards.iter().enumerate() {
            let outcome = guard
                .evaluate(ctx)
                .await
                .map_err(|source| WorkflowError::GuardError {
                    from: ctx.from.to_string(),
                    to: ctx.to.to_string(),
                    source,
                })?;

            checks.push(match outcome {
                GuardOutcome::Allow => Validation::success(()),
                GuardOutcome::Deny { reason } => {
                    debug!(
                        guard = guard.description().unwrap_or("anonymous"),
                        position,
                        reason = reason.as_deref().unwrap_or(""),
                        "guard rejected"
                    );
                    Validation::fail(GuardRejection { position, reason })
                }
            });
        }

        Ok(Validation::all_vec(checks).map(|_| ()))
    }

    async fn first_rejection(
        &self,
        transition: &TransitionDefinition<C>,
        ctx: TransitionContext<'_, C>,
    ) -> Result<Option<GuardRejection>, WorkflowError> {
        for (position, guard) in transition.guards.iter().enumerate() {
            let outcome = guard
                .evaluate(ctx)
                .await
                .map_err(|source| WorkflowError::GuardError {
                    from: ctx.from.to_string(),
                    to: ctx.to.to_string(),
                    source,
                })?;

            if let GuardOutcome::Deny { reason } = outcome {
                return Ok(Some(GuardRejection { position, reason }));
            }
        }
        Ok(None)
    }

    fn warn_dangling(&self, index: usize, from: &str, to: &str) {
        for state in [from, to] {
            if !self.definition.has_state(state) {
                warn!(
                    workflow = %self.definition.name,
                    index,
                    state,
                    "transition references undeclared state"
                );
            }
        }
    }
}
