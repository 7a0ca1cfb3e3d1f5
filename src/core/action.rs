//! Side-effecting hooks bound to state entry/exit or to a transition.

use super::context::TransitionContext;
use super::BoxError;
use futures::future::{self, BoxFuture};
use std::fmt;
use std::sync::Arc;

/// Result of running a hook; the success value is ignored.
pub type ActionResult = Result<(), BoxError>;

type ActionFn<C> =
    dyn for<'a> Fn(TransitionContext<'a, C>) -> BoxFuture<'a, ActionResult> + Send + Sync;

/// Hook executed around an accepted transition.
///
/// Hooks are caller-owned side effects. A hook that fails aborts the remaining
/// hooks of the attempt and the error propagates to the caller; nothing is
/// rolled back.
pub struct Action<C> {
    run: Arc<ActionFn<C>>,
}

impl<C: 'static> Action<C> {
    /// Create a hook from an infallible synchronous function.
    pub fn new<F>(action: F) -> Self
    where
        F: Fn(TransitionContext<'_, C>) + Send + Sync + 'static,
    {
        Self::try_new(move |ctx| {
            action(ctx);
            Ok(())
        })
    }

    /// Create a hook from a synchronous function that may fail.
    pub fn try_new<F>(action: F) -> Self
    where
        F: Fn(TransitionContext<'_, C>) -> ActionResult + Send + Sync + 'static,
    {
        Self::from_async(move |ctx| Box::pin(future::ready(action(ctx))))
    }

    /// Create a hook whose execution suspends.
    pub fn from_async<F>(action: F) -> Self
    where
        F: for<'a> Fn(TransitionContext<'a, C>) -> BoxFuture<'a, ActionResult>
            + Send
            + Sync
            + 'static,
    {
        Action {
            run: Arc::new(action),
        }
    }
}

impl<C> Action<C> {
    pub fn run<'a>(&'a self, ctx: TransitionContext<'a, C>) -> BoxFuture<'a, ActionResult> {
        (self.run)(ctx)
    }
}

impl<C> Clone for Action<C> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<C> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn sync_action_runs_once_per_call() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let action = Action::<()>::new(move |_ctx| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        action.run(TransitionContext::new("A", "B", &())).await.unwrap();
        action.run(TransitionContext::new("A", "B", &())).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn async_action_sees_context() {
        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let action = Action::<u32>::from_async(move |ctx| {
            let sink = Arc::clone(&sink);
            Box::pin(async move {
                tokio::task::yield_now().await;
                sink.lock().unwrap().push((ctx.from.to_string(), *ctx.context));
                Ok(())
            })
        });

        action.run(TransitionContext::new("A", "B", &7)).await.unwrap();

        assert_eq!(*seen.lock().unwrap(), vec![("A".to_string(), 7)]);
    }

    #[tokio::test]
    async fn failing_action_returns_error() {
        let action = Action::<()>::try_new(|_ctx| Err("mailer down".into()));

        let err = action
            .run(TransitionContext::new("A", "B", &()))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "mailer down");
    }
}
