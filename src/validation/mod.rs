//! Transition validation.
//!
//! The validator is a pure decision function from `(from, to, context)` to a
//! [`ValidationResult`]. Business rejections are expressed through the result
//! and never raised; only a guard that itself fails turns into an error.

mod result;
mod validator;

pub use result::{ValidationResult, GUARDS_FAILED};
pub use validator::{GuardRejection, TransitionValidator};
