//! Per-attempt view handed to guards and hooks.

/// Context passed to every guard and hook of a single transition attempt.
///
/// The view only borrows: `context` is the caller's business payload and the
/// engine never mutates or retains it. The same value is handed to every guard
/// and hook of one attempt.
///
/// # Example
///
/// ```rust
/// use flowgate::core::TransitionContext;
///
/// struct Order {
///     amount: u64,
/// }
///
/// let order = Order { amount: 100 };
/// let ctx = TransitionContext {
///     from: "CREATED",
///     to: "PROCESSING",
///     context: &order,
/// };
///
/// assert_eq!(ctx.context.amount, 100);
/// ```
#[derive(Debug)]
pub struct TransitionContext<'a, C> {
    /// State being left
    pub from: &'a str,
    /// State being entered
    pub to: &'a str,
    /// Caller-supplied business data
    pub context: &'a C,
}

impl<'a, C> TransitionContext<'a, C> {
    pub fn new(from: &'a str, to: &'a str, context: &'a C) -> Self {
        Self { from, to, context }
    }
}

impl<C> Clone for TransitionContext<'_, C> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<C> Copy for TransitionContext<'_, C> {}
