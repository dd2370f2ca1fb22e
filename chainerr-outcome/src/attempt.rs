//! Running operations and normalizing their failures

use crate::normalize::{from_panic, Normalize};
use crate::{ChainedError, Outcome, PendingOutcome};
use futures_util::FutureExt;
use std::future::Future;
use std::panic::{self, AssertUnwindSafe};

/// Run a synchronous operation and capture how it ended.
///
/// An `Err` or a panic from `f` lands in the error slot as a
/// [`ChainedError`]; nothing is re-raised. `f` is called exactly once.
///
/// Panics are caught with `catch_unwind`, so the process panic hook still
/// runs first: with the default hook a "thread ... panicked" line reaches
/// stderr even though the panic ends up in the outcome. Install a hook
/// with `std::panic::set_hook` to silence or redirect it. Under
/// `panic = "abort"` nothing is caught.
///
/// ```rust
/// use chainerr_outcome::attempt;
///
/// let (value, error) = attempt(|| "42".parse::<u32>()).into_pair();
/// assert_eq!(value, Some(42));
/// assert!(error.is_none());
///
/// let (value, error) = attempt(|| "x".parse::<u32>()).into_pair();
/// assert!(value.is_none());
/// assert_eq!(error.unwrap().fmt_err(None), "invalid digit found in string");
/// ```
pub fn attempt<T, E, F>(f: F) -> Outcome<T>
where
    F: FnOnce() -> Result<T, E>,
    E: Normalize,
{
    match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Outcome::ok(value),
        Ok(Err(e)) => failed(e.normalize()),
        Err(payload) => failed(from_panic(payload)),
    }
}

/// Run an asynchronous operation and capture how it ended.
///
/// If calling `f` panics before a future is produced, the returned
/// [`PendingOutcome`] is already resolved. Otherwise it settles with the
/// future: `Ok` fills the value slot, `Err` or a panic while polling fills
/// the error slot. Panics go through the panic hook as described on
/// [`attempt`].
pub fn attempt_async<'a, T, E, F, Fut>(f: F) -> PendingOutcome<'a, T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T, E>> + Send + 'a,
    T: Send + 'a,
    E: Normalize + 'a,
{
    let fut = match panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(fut) => fut,
        Err(payload) => return PendingOutcome::resolved(failed(from_panic(payload))),
    };

    PendingOutcome::pending(async move {
        match AssertUnwindSafe(fut).catch_unwind().await {
            Ok(Ok(value)) => Outcome::ok(value),
            Ok(Err(e)) => failed(e.normalize()),
            Err(payload) => failed(from_panic(payload)),
        }
    })
}

fn failed<T>(error: ChainedError) -> Outcome<T> {
    tracing::debug!(error = %error.fmt_err(None), "operation failed");
    Outcome::err(error)
}
