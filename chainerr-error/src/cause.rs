//! Causes that can sit underneath a ChainedError

use crate::{ChainedError, Link};
use std::fmt;

/// Name carried by a [`GenericError`] unless a custom one is set.
///
/// Formatting only prefixes a generic error's message with its name when the
/// name differs from this one.
pub const DEFAULT_ERROR_NAME: &str = "Error";

/// What a [`ChainedError`] (or a [`GenericError`]) was caused by.
///
/// Any "empty" input converts to [`Cause::None`]: an empty string, `None` and
/// `()` all mean "no cause" and end chain traversal.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cause {
    /// Another chained error; the chain continues through its own cause
    Chained(Box<ChainedError>),

    /// A plain error, which may carry its own single native cause
    Generic(GenericError),

    /// A raw string. Always terminal.
    Str(StringCause),

    /// No cause
    #[default]
    None,
}

impl Cause {
    /// Check if there is no cause
    pub fn is_none(&self) -> bool {
        matches!(self, Cause::None)
    }

    /// Check if there is a cause
    pub fn is_some(&self) -> bool {
        !self.is_none()
    }

    /// The chain link this cause starts, if any.
    pub fn link(&self) -> Option<Link<'_>> {
        match self {
            Cause::Chained(err) => Some(Link::Chained(err)),
            Cause::Generic(err) => Some(Link::Generic(err)),
            Cause::Str(s) if !s.as_str().is_empty() => Some(Link::Str(s.as_str())),
            Cause::Str(_) | Cause::None => None,
        }
    }

    /// View the cause as a std error, for `source()` chains.
    pub fn as_error(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Cause::Chained(err) => Some(&**err),
            Cause::Generic(err) => Some(err),
            Cause::Str(s) => Some(s),
            Cause::None => None,
        }
    }

    /// Capture a std error, keeping every `source()` below it.
    ///
    /// Errors that already are one of this crate's types are cloned as they
    /// are instead of being flattened into a [`GenericError`].
    pub fn from_std(err: &(dyn std::error::Error + 'static)) -> Self {
        if let Some(chained) = err.downcast_ref::<ChainedError>() {
            return Cause::Chained(Box::new(chained.clone()));
        }
        if let Some(generic) = err.downcast_ref::<GenericError>() {
            return Cause::Generic(generic.clone());
        }
        if let Some(s) = err.downcast_ref::<StringCause>() {
            return Cause::from(s.as_str());
        }
        Cause::Generic(GenericError::from_std(err))
    }
}

// =============================================================================
// Conversions
// =============================================================================

impl From<ChainedError> for Cause {
    fn from(err: ChainedError) -> Self {
        Cause::Chained(Box::new(err))
    }
}

impl From<Box<ChainedError>> for Cause {
    fn from(err: Box<ChainedError>) -> Self {
        Cause::Chained(err)
    }
}

impl From<GenericError> for Cause {
    fn from(err: GenericError) -> Self {
        Cause::Generic(err)
    }
}

impl From<String> for Cause {
    fn from(s: String) -> Self {
        if s.is_empty() {
            Cause::None
        } else {
            Cause::Str(StringCause(s))
        }
    }
}

impl From<&str> for Cause {
    fn from(s: &str) -> Self {
        Cause::from(s.to_string())
    }
}

impl From<()> for Cause {
    fn from(_: ()) -> Self {
        Cause::None
    }
}

impl<C: Into<Cause>> From<Option<C>> for Cause {
    fn from(cause: Option<C>) -> Self {
        cause.map_or(Cause::None, Into::into)
    }
}

impl From<std::io::Error> for Cause {
    fn from(err: std::io::Error) -> Self {
        Cause::from_std(&err)
    }
}

impl From<Box<dyn std::error::Error + Send + Sync>> for Cause {
    fn from(err: Box<dyn std::error::Error + Send + Sync>) -> Self {
        Cause::from_std(&*err)
    }
}

impl From<anyhow::Error> for Cause {
    fn from(err: anyhow::Error) -> Self {
        Cause::from_std(&*err)
    }
}

// =============================================================================
// GenericError
// =============================================================================

/// A plain, non-chained error: a name, a message and one native cause.
///
/// ```rust
/// use chainerr_error::{err, GenericError};
///
/// let deep = GenericError::new("Deep");
/// let middle = GenericError::new("Middle").with_cause(deep);
/// assert_eq!(err("Base", middle).fmt_err(None), "Base -> Middle -> Deep");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GenericError {
    name: String,
    message: String,
    cause: Box<Cause>,
}

impl GenericError {
    /// Create a generic error with the default name and no cause
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            name: DEFAULT_ERROR_NAME.to_string(),
            message: message.into(),
            cause: Box::new(Cause::None),
        }
    }

    /// Set a custom name, rendered as `"<name>: <message>"`
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the native cause
    pub fn with_cause(mut self, cause: impl Into<Cause>) -> Self {
        self.cause = Box::new(cause.into());
        self
    }

    /// Capture a std error as a generic one.
    ///
    /// The message is the error's `Display` output, the cause is built from
    /// its `source()`.
    pub fn from_std(err: &(dyn std::error::Error + 'static)) -> Self {
        let cause = err.source().map(Cause::from_std).unwrap_or_default();
        Self::new(err.to_string()).with_cause(cause)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn cause(&self) -> &Cause {
        &self.cause
    }

    /// Check if the name is [`DEFAULT_ERROR_NAME`]
    pub fn has_default_name(&self) -> bool {
        self.name == DEFAULT_ERROR_NAME
    }
}

impl fmt::Display for GenericError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.has_default_name() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{}: {}", self.name, self.message)
        }
    }
}

impl std::error::Error for GenericError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.cause.as_error()
    }
}

// =============================================================================
// StringCause
// =============================================================================

/// A raw string used as a cause. Built through `Cause::from`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringCause(String);

impl StringCause {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StringCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for StringCause {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err;

    #[test]
    fn test_empty_inputs_are_no_cause() {
        assert!(Cause::from("").is_none());
        assert!(Cause::from(String::new()).is_none());
        assert!(Cause::from(()).is_none());
        assert!(Cause::from(None::<GenericError>).is_none());
        assert!(Cause::from(Some("x")).is_some());
    }

    #[test]
    fn test_generic_display() {
        assert_eq!(GenericError::new("boom").to_string(), "boom");
        assert_eq!(
            GenericError::new("boom").with_name("TypeError").to_string(),
            "TypeError: boom"
        );
    }

    #[test]
    fn test_from_std_keeps_sources() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let outer = std::io::Error::new(std::io::ErrorKind::Other, inner);

        let generic = GenericError::from_std(&outer);
        assert_eq!(generic.message(), "no such file");
        assert!(generic.has_default_name());

        let err: Box<dyn std::error::Error + Send + Sync> =
            Box::new(GenericError::new("outer").with_cause(GenericError::new("inner")));
        match Cause::from(err) {
            Cause::Generic(g) => {
                assert_eq!(g.message(), "outer");
                assert!(matches!(g.cause(), Cause::Generic(inner) if inner.message() == "inner"));
            }
            other => panic!("unexpected cause: {:?}", other),
        }
    }

    #[test]
    fn test_from_anyhow() {
        let chained = ChainedError::new("chained");
        let cause = Cause::from(anyhow::Error::new(chained.clone()));
        assert_eq!(cause, Cause::Chained(Box::new(chained)));

        let layered = anyhow::Error::new(err("query failed", "timeout")).context("loading user");
        let top = err("top", Cause::from(layered));
        assert_eq!(top.fmt_err(None), "top -> loading user -> query failed -> timeout");

        let wrapped = anyhow::anyhow!("root").context("outer");
        match Cause::from(wrapped) {
            Cause::Generic(g) => {
                assert_eq!(g.message(), "outer");
                assert!(matches!(g.cause(), Cause::Generic(inner) if inner.message() == "root"));
            }
            other => panic!("unexpected cause: {:?}", other),
        }
    }

    #[test]
    fn test_chained_inside_io_error_is_not_repeated() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, err("a", "b"));
        assert_eq!(err("top", io).fmt_err(None), "top -> a -> b");
    }

    #[test]
    fn test_as_error_source() {
        use std::error::Error as _;

        let generic = GenericError::new("top").with_cause("bottom");
        let source = generic.source().map(|s| s.to_string());
        assert_eq!(source.as_deref(), Some("bottom"));
        assert!(Cause::None.as_error().is_none());
    }
}
