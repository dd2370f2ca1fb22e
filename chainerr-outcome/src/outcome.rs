//! The two-slot Outcome and its pending counterpart

use crate::ChainedError;
use futures_util::future::{self, BoxFuture, Ready};
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

/// Result of running an operation: a value or an error, never both.
///
/// `into_pair` gives the `(value, error)` view where exactly one slot is
/// `Some`.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome<T> {
    inner: Result<T, ChainedError>,
}

impl<T> Outcome<T> {
    /// A successful outcome
    pub fn ok(value: T) -> Self {
        Self { inner: Ok(value) }
    }

    /// A failed outcome
    pub fn err(error: ChainedError) -> Self {
        Self { inner: Err(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.inner.is_ok()
    }

    pub fn is_err(&self) -> bool {
        self.inner.is_err()
    }

    /// The value slot
    pub fn value(&self) -> Option<&T> {
        self.inner.as_ref().ok()
    }

    /// The error slot
    pub fn error(&self) -> Option<&ChainedError> {
        self.inner.as_ref().err()
    }

    /// Split into `(value, error)`
    pub fn into_pair(self) -> (Option<T>, Option<ChainedError>) {
        match self.inner {
            Ok(value) => (Some(value), None),
            Err(error) => (None, Some(error)),
        }
    }

    pub fn into_result(self) -> Result<T, ChainedError> {
        self.inner
    }
}

impl<T> From<Outcome<T>> for Result<T, ChainedError> {
    fn from(outcome: Outcome<T>) -> Self {
        outcome.inner
    }
}

/// An outcome that becomes available once the wrapped future settles.
///
/// When the operation failed before handing back a future, the outcome is
/// already resolved and the first poll completes without waiting.
pub struct PendingOutcome<'a, T> {
    state: State<'a, T>,
}

enum State<'a, T> {
    Resolved(Ready<Outcome<T>>),
    Pending(BoxFuture<'a, Outcome<T>>),
}

impl<'a, T> PendingOutcome<'a, T> {
    pub(crate) fn resolved(outcome: Outcome<T>) -> Self {
        Self {
            state: State::Resolved(future::ready(outcome)),
        }
    }

    pub(crate) fn pending(fut: impl Future<Output = Outcome<T>> + Send + 'a) -> Self {
        Self {
            state: State::Pending(Box::pin(fut)),
        }
    }

    /// Check if the outcome was known without running the future
    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }
}

impl<T> Future for PendingOutcome<'_, T> {
    type Output = Outcome<T>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        match &mut self.get_mut().state {
            State::Resolved(ready) => Pin::new(ready).poll(cx),
            State::Pending(fut) => fut.as_mut().poll(cx),
        }
    }
}

impl<T> fmt::Debug for PendingOutcome<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = if self.is_resolved() { "resolved" } else { "pending" };
        f.debug_struct("PendingOutcome").field("state", &state).finish()
    }
}
