//! # chainerr-outcome
//!
//! Run an operation, get back exactly one of a value or a [`ChainedError`].
//!
//! ## Core Concepts
//! - **attempt**: Wraps a synchronous operation, returns an [`Outcome`] right away
//! - **attempt_async**: Wraps an operation returning a future, returns a [`PendingOutcome`]
//! - **Normalize**: How a raw failure (io error, string, panic payload...) becomes a `ChainedError`
//!
//! ```rust
//! use chainerr_outcome::{attempt, err};
//!
//! let outcome = attempt(|| std::fs::read_to_string("/definitely/not/here"));
//! let (value, error) = outcome.into_pair();
//! assert!(value.is_none());
//!
//! let wrapped = err("failed to read settings", error.unwrap()).with_value("path", "/definitely/not/here");
//! assert!(wrapped.fmt_err(None).starts_with("failed to read settings -> "));
//! ```

mod attempt;
mod normalize;
mod outcome;

pub use attempt::{attempt, attempt_async};
pub use normalize::{from_panic, Normalize, OPAQUE_PANIC};
pub use outcome::{Outcome, PendingOutcome};

// Re-export the error types so callers need a single dependency
pub use chainerr_error::{
    err, Cause, Chain, ChainedError, GenericError, Link, Result, StringCause, DEFAULT_ERROR_NAME,
    SEPARATOR, UNKNOWN_ERROR,
};
