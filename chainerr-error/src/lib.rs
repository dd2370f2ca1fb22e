//! # chainerr-error
//!
//! A chainable, annotatable error type.
//!
//! ## Design Philosophy
//!
//! - **Message**: Each layer says what it was doing, nothing more
//! - **Cause**: Another chained error, a plain error or a raw string
//! - **Context**: Key-value annotations, looked up across the whole chain
//! - **Formatting**: One line, outermost first, e.g. `"load user -> query failed -> timeout"`
//!
//! ## Usage
//!
//! ```rust
//! use chainerr_error::{err, ChainedError};
//!
//! fn query() -> Result<(), ChainedError> {
//!     Err(err("query failed", "connection reset").with_value("table", "users"))
//! }
//!
//! fn load_user(id: u64) -> Result<(), ChainedError> {
//!     query().map_err(|e| err("failed to load user", e).with_value("user_id", id))
//! }
//!
//! let e = load_user(7).unwrap_err();
//! assert_eq!(e.fmt_err(None), "failed to load user -> query failed -> connection reset");
//! assert_eq!(e.get_as::<String>("table").as_deref(), Some("users"));
//! ```
//!
//! ## Principles
//!
//! - Re-wrapping adds a message layer, it never rewrites the layers below
//! - Annotations from deeper errors win over the same key added later
//! - Blank messages are skipped; a chain with nothing to say is `"Unknown error"`

mod cause;
mod chain;
mod error;

pub use cause::{Cause, GenericError, StringCause, DEFAULT_ERROR_NAME};
pub use chain::{Chain, Link};
pub use error::ChainedError;

/// Separator between the segments of a formatted chain
pub const SEPARATOR: &str = " -> ";

/// What a chain formats to when every segment is blank
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Result type alias using ChainedError
pub type Result<T> = std::result::Result<T, ChainedError>;

/// Create a chained error, optionally wrapping a cause.
///
/// Pass `()` (or `""`, or `None`) when there is no cause.
pub fn err(message: impl Into<String>, cause: impl Into<Cause>) -> ChainedError {
    ChainedError::with_cause(message, cause)
}
