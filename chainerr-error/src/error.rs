//! The ChainedError type

use crate::chain::{is_blank, Chain};
use crate::{Cause, Link, SEPARATOR, UNKNOWN_ERROR};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;

/// An error with a message, an optional cause and an annotation store.
///
/// This error type provides:
/// - `message`: Human-readable description, may be empty
/// - `cause`: What caused it (another chained error, a plain error, a string)
/// - `context`: Key-value annotations, queryable across the whole chain
///
/// # Example
///
/// ```rust
/// use chainerr_error::{err, ChainedError, GenericError};
/// use serde_json::json;
///
/// let io = GenericError::new("connection reset");
/// let query = err("query failed", io).with_value("table", "users");
/// let load = err("failed to load user", query).with_value("user_id", 42);
///
/// assert_eq!(
///     load.fmt_err(None),
///     "failed to load user -> query failed -> connection reset"
/// );
/// assert_eq!(load.get("table"), Some(&json!("users")));
/// assert_eq!(load.get_as::<u64>("user_id"), Some(42));
/// ```
#[derive(Clone, PartialEq, Default)]
pub struct ChainedError {
    message: String,
    cause: Cause,
    context: Option<HashMap<String, Value>>,
}

impl ChainedError {
    /// Name identifying chained errors. Never used as a prefix when formatting.
    pub const NAME: &'static str = "ChainedError";

    /// Create a new error with the given message and no cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            cause: Cause::None,
            context: None,
        }
    }

    /// Create a new error wrapping a cause
    pub fn with_cause(message: impl Into<String>, cause: impl Into<Cause>) -> Self {
        Self {
            message: message.into(),
            cause: cause.into(),
            context: None,
        }
    }

    // =========================================================================
    // Getters
    // =========================================================================

    pub fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the direct cause
    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Get this error's own annotations, `None` until the first write
    pub fn context(&self) -> Option<&HashMap<String, Value>> {
        self.context.as_ref()
    }

    /// Iterate the cause chain, starting with this error
    pub fn chain(&self) -> Chain<'_> {
        Chain::new(Link::Chained(self))
    }

    // =========================================================================
    // Annotations
    // =========================================================================

    /// Merge annotations into this error's own store (chainable).
    ///
    /// Existing keys are overwritten. Stores of errors further down the
    /// chain are left alone.
    pub fn with_context<I, K, V>(mut self, partial: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.add_context(partial);
        self
    }

    /// Same as [`with_context`](Self::with_context), in place
    pub fn add_context<I, K, V>(&mut self, partial: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let store = self.context.get_or_insert_with(HashMap::new);
        for (key, value) in partial {
            store.insert(key.into(), value.into());
        }
        self
    }

    /// Add a single annotation
    pub fn with_value(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.with_context([(key.into(), value.into())])
    }

    /// Look up an annotation anywhere in the chain.
    ///
    /// When several errors in the chain carry `key`, the deepest one wins:
    /// re-wrapping never shadows what the original failure recorded.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.chain()
            .filter_map(|link| link.context())
            .filter_map(|store| store.get(key))
            .last()
    }

    /// Look up an annotation and deserialize it.
    ///
    /// Returns `None` when the key is missing or the value is not a `T`.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        self.get(key).and_then(|value| T::deserialize(value).ok())
    }

    // =========================================================================
    // Formatting
    // =========================================================================

    /// Render the whole chain as one line, e.g. `"prepend -> top -> cause"`.
    ///
    /// Blank messages are skipped. Plain errors with a non-default name are
    /// shown as `"<name>: <message>"`. When nothing is left the result is
    /// `"Unknown error"`.
    pub fn fmt_err(&self, prepend: Option<&str>) -> String {
        let segments: Vec<_> = prepend
            .filter(|p| !is_blank(p))
            .map(Cow::Borrowed)
            .into_iter()
            .chain(self.chain().filter_map(|link| link.segment()))
            .collect();

        if segments.is_empty() {
            return UNKNOWN_ERROR.to_string();
        }
        segments.join(SEPARATOR)
    }
}

// =============================================================================
// Display - own message only, the chain is reachable through source()
// =============================================================================

impl fmt::Display for ChainedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

// =============================================================================
// Debug - verbose, multi-line format for debugging
// =============================================================================

impl fmt::Debug for ChainedError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: {}", Self::NAME, self.message)?;

        if let Some(context) = self.context.as_ref().filter(|c| !c.is_empty()) {
            let mut entries: Vec<_> = context.iter().collect();
            entries.sort_by(|a, b| a.0.cmp(b.0));

            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in entries {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        let causes: Vec<_> = self.chain().skip(1).collect();
        if !causes.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Caused by:")?;
            for (depth, link) in causes.iter().enumerate() {
                let text = link.segment().unwrap_or_default();
                writeln!(f, "        {}: {}", depth, text)?;
            }
        }

        Ok(())
    }
}

// =============================================================================
// std::error::Error implementation
// =============================================================================

impl std::error::Error for ChainedError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_error()
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<std::io::Error> for ChainedError {
    fn from(err: std::io::Error) -> Self {
        ChainedError::new(err.to_string())
    }
}

impl From<&str> for ChainedError {
    fn from(message: &str) -> Self {
        ChainedError::new(message)
    }
}

impl From<String> for ChainedError {
    fn from(message: String) -> Self {
        ChainedError::new(message)
    }
}
