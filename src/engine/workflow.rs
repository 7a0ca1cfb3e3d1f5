//! Stateless workflow engine.

use super::config::EngineConfig;
use crate::core::{Action, StateDefinition, StateId, TransitionContext, TransitionDefinition, WorkflowDefinition};
use crate::error::{HookKind, WorkflowError};
use crate::validation::{TransitionValidator, ValidationResult};
use tracing::{info, warn};

/// Façade over the validator that adds assertion semantics and hook execution.
///
/// The engine holds no per-instance state: the caller tracks the current
/// state and supplies `from` on every call. One engine can serve any number
/// of independent workflow instances concurrently.
///
/// # Example
///
/// ```rust
/// use flowgate::builder::{TransitionBuilder, WorkflowBuilder, StateBuilder};
/// use flowgate::engine::WorkflowEngine;
///
/// futures::executor::block_on(async {
///     let definition = WorkflowBuilder::<()>::new("door")
///         .initial("CLOSED")
///         .state(StateBuilder::new("CLOSED"))
///         .state(StateBuilder::new("OPEN"))
///         .transition(TransitionBuilder::new().from("CLOSED").to("OPEN"))
///         .unwrap()
///         .build()
///         .unwrap();
///
///     let engine = WorkflowEngine::new(definition);
///
///     assert_eq!(engine.initial_state(), "CLOSED");
///     engine.transition("CLOSED", "OPEN", &()).await.unwrap();
///     assert!(engine.transition("OPEN", "CLOSED", &()).await.is_err());
/// });
/// ```
pub struct WorkflowEngine<C> {
    definition: WorkflowDefinition<C>,
    config: EngineConfig,
}

impl<C> WorkflowEngine<C> {
    /// Create an engine over `definition` without checking its integrity.
    pub fn new(definition: WorkflowDefinition<C>) -> Self {
        Self {
            definition,
            config: EngineConfig::default(),
        }
    }

    /// Create an engine, verifying the definition first when the config asks
    /// for it.
    pub fn with_config(
        definition: WorkflowDefinition<C>,
        config: EngineConfig,
    ) -> Result<Self, WorkflowError> {
        if config.verify_definition {
            definition
                .verify()
                .map_err(|issues| WorkflowError::InvalidDefinition { issues })?;
        }
        Ok(Self { definition, config })
    }

    /// Create an engine over a definition that must pass [`WorkflowDefinition::verify`].
    pub fn strict(definition: WorkflowDefinition<C>) -> Result<Self, WorkflowError> {
        Self::with_config(definition, EngineConfig::new().verify_definition(true))
    }

    pub fn initial_state(&self) -> &StateId {
        &self.definition.initial_state
    }

    /// The stored definition. Not cloned.
    pub fn definition(&self) -> &WorkflowDefinition<C> {
        &self.definition
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Look up a declared state.
    pub fn state(&self, name: &str) -> Result<&StateDefinition<C>, WorkflowError> {
        self.definition
            .state(name)
            .ok_or_else(|| WorkflowError::state_not_found(name))
    }

    /// Advisory terminal flag of a declared state.
    pub fn is_terminal(&self, name: &str) -> Result<bool, WorkflowError> {
        Ok(self.state(name)?.is_terminal)
    }

    fn validator(&self) -> TransitionValidator<'_, C> {
        TransitionValidator::with_policy(&self.definition, self.config.candidate_policy)
    }

    /// Decide whether `from -> to` is legal under `context`.
    pub async fn validate(
        &self,
        from: &str,
        to: &str,
        context: &C,
    ) -> Result<ValidationResult<'_, C>, WorkflowError> {
        self.validator().validate_transition(from, to, context).await
    }

    /// Like [`validate`](Self::validate), but a rejection becomes
    /// [`WorkflowError::InvalidTransition`].
    pub async fn assert_transition(
        &self,
        from: &str,
        to: &str,
        context: &C,
    ) -> Result<(), WorkflowError> {
        self.validate(from, to, context)
            .await?
            .into_result(from, to)
            .map(|_| ())
    }

    /// Fail-fast validation raising [`WorkflowError::GuardFailed`] on the first
    /// guard rejection instead of collecting every reason.
    pub async fn validate_strict(
        &self,
        from: &str,
        to: &str,
        context: &C,
    ) -> Result<&TransitionDefinition<C>, WorkflowError> {
        self.validator().validate_fail_fast(from, to, context).await
    }

    /// Execute `from -> to`.
    ///
    /// The move is freshly validated, then hooks run strictly in the order
    /// `on_leave` of the source, `on_transition` of the matched definition,
    /// `on_enter` of the target. Each hook completes before the next starts;
    /// absent hooks are skipped. A failing hook stops the sequence and its
    /// error is returned; earlier hooks are not undone.
    pub async fn transition(&self, from: &str, to: &str, context: &C) -> Result<(), WorkflowError> {
        let matched = match self.validate(from, to, context).await?.into_result(from, to) {
            Ok(matched) => matched,
            Err(err) => {
                warn!(workflow = %self.definition.name, from, to, error = %err, "transition rejected");
                return Err(err);
            }
        };

        let source = self.state(from)?;
        let target = self.state(to)?;
        let ctx = TransitionContext::new(from, to, context);

        run_hook(HookKind::OnLeave, source.on_leave.as_ref(), ctx).await?;
        run_hook(HookKind::OnTransition, matched.on_transition.as_ref(), ctx).await?;
        run_hook(HookKind::OnEnter, target.on_enter.as_ref(), ctx).await?;

        info!(
            workflow = %self.definition.name,
            from,
            to,
            label = matched.label.as_deref().unwrap_or(""),
            "transition completed"
        );
        Ok(())
    }

    /// Targets reachable from `from` under `context`.
    pub async fn allowed_transitions(
        &self,
        from: &str,
        context: &C,
    ) -> Result<Vec<StateId>, WorkflowError> {
        self.validator().allowed_transitions(from, context).await
    }
}

async fn run_hook<C>(
    hook: HookKind,
    action: Option<&Action<C>>,
    ctx: TransitionContext<'_, C>,
) -> Result<(), WorkflowError> {
    let Some(action) = action else {
        return Ok(());
    };

    action.run(ctx).await.map_err(|source| WorkflowError::HookFailed {
        hook,
        from: ctx.from.to_string(),
        to: ctx.to.to_string(),
        source,
    })
}

/// Create a workflow engine over `definition`.
pub fn create_workflow<C>(definition: WorkflowDefinition<C>) -> WorkflowEngine<C> {
    WorkflowEngine::new(definition)
}
