//! Turning arbitrary failures into a ChainedError

use crate::{ChainedError, GenericError, StringCause};
use std::any::Any;
use std::convert::Infallible;

/// Message used for panic payloads that are neither strings nor errors
pub const OPAQUE_PANIC: &str = "Box<dyn Any>";

/// Conversion of a failure value into a [`ChainedError`].
///
/// A `ChainedError` passes through unchanged. Anything else becomes a new
/// chained error whose message is the failure's own message, with no cause.
///
/// Implemented for the std error types, strings, `anyhow::Error` and boxed
/// `dyn Error`. A crate's own error type either gets boxed or implements
/// the trait itself:
///
/// ```rust
/// use chainerr_outcome::{attempt, ChainedError, Normalize};
/// use std::fmt;
///
/// #[derive(Debug)]
/// struct QuotaExceeded(u32);
///
/// impl fmt::Display for QuotaExceeded {
///     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
///         write!(f, "quota of {} exceeded", self.0)
///     }
/// }
///
/// impl Normalize for QuotaExceeded {
///     fn normalize(self) -> ChainedError {
///         ChainedError::new(self.to_string()).with_value("quota", self.0)
///     }
/// }
///
/// let outcome = attempt(|| Err::<(), _>(QuotaExceeded(100)));
/// let error = outcome.error().unwrap();
/// assert_eq!(error.fmt_err(None), "quota of 100 exceeded");
/// assert_eq!(error.get_as::<u32>("quota"), Some(100));
/// ```
pub trait Normalize {
    fn normalize(self) -> ChainedError;
}

impl Normalize for ChainedError {
    fn normalize(self) -> ChainedError {
        self
    }
}

impl Normalize for Box<ChainedError> {
    fn normalize(self) -> ChainedError {
        *self
    }
}

impl Normalize for GenericError {
    fn normalize(self) -> ChainedError {
        ChainedError::new(self.message())
    }
}

impl Normalize for StringCause {
    fn normalize(self) -> ChainedError {
        ChainedError::new(self.as_str())
    }
}

impl Normalize for String {
    fn normalize(self) -> ChainedError {
        ChainedError::new(self)
    }
}

impl Normalize for &str {
    fn normalize(self) -> ChainedError {
        ChainedError::new(self)
    }
}

impl Normalize for Infallible {
    fn normalize(self) -> ChainedError {
        match self {}
    }
}

impl Normalize for anyhow::Error {
    fn normalize(self) -> ChainedError {
        // downcast() also matches below context layers; only the outermost error counts
        let outer: &(dyn std::error::Error + 'static) = &*self;
        match outer.downcast_ref::<ChainedError>() {
            Some(chained) => chained.clone(),
            None => ChainedError::new(self.to_string()),
        }
    }
}

impl Normalize for Box<dyn std::error::Error + Send + Sync> {
    fn normalize(self) -> ChainedError {
        match self.downcast::<ChainedError>() {
            Ok(chained) => *chained,
            Err(err) => ChainedError::new(err.to_string()),
        }
    }
}

impl Normalize for Box<dyn std::error::Error + Send> {
    fn normalize(self) -> ChainedError {
        match self.downcast::<ChainedError>() {
            Ok(chained) => *chained,
            Err(err) => ChainedError::new(err.to_string()),
        }
    }
}

impl Normalize for Box<dyn std::error::Error> {
    fn normalize(self) -> ChainedError {
        match self.downcast::<ChainedError>() {
            Ok(chained) => *chained,
            Err(err) => ChainedError::new(err.to_string()),
        }
    }
}

macro_rules! normalize_by_message {
    ($($ty:ty),* $(,)?) => {
        $(
            impl Normalize for $ty {
                fn normalize(self) -> ChainedError {
                    ChainedError::new(self.to_string())
                }
            }
        )*
    };
}

normalize_by_message!(
    std::io::Error,
    std::fmt::Error,
    std::num::ParseIntError,
    std::num::ParseFloatError,
    std::num::TryFromIntError,
    std::str::ParseBoolError,
    std::str::Utf8Error,
    std::string::FromUtf8Error,
    std::net::AddrParseError,
    serde_json::Error,
);

/// Normalize a panic payload.
///
/// String payloads (what `panic!` produces) keep their text; a
/// `ChainedError` raised with `std::panic::panic_any` passes through.
pub fn from_panic(payload: Box<dyn Any + Send>) -> ChainedError {
    let payload = match payload.downcast::<ChainedError>() {
        Ok(chained) => return *chained,
        Err(payload) => payload,
    };
    let payload = match payload.downcast::<String>() {
        Ok(message) => return ChainedError::new(*message),
        Err(payload) => payload,
    };
    match payload.downcast::<&'static str>() {
        Ok(message) => ChainedError::new(*message),
        Err(_) => ChainedError::new(OPAQUE_PANIC),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chained_passes_through() {
        let original = crate::err("outer", "inner").with_value("k", "v");
        assert_eq!(original.clone().normalize(), original);

        let boxed: Box<dyn std::error::Error + Send + Sync> = Box::new(original.clone());
        assert_eq!(boxed.normalize(), original);

        let any = anyhow::Error::new(original.clone());
        assert_eq!(any.normalize(), original);
    }

    #[test]
    fn test_error_like_uses_message() {
        let io = std::io::Error::new(std::io::ErrorKind::TimedOut, "read timed out");
        let e = io.normalize();
        assert_eq!(e.fmt_err(None), "read timed out");
        assert!(e.cause().is_none());

        let named = GenericError::new("bad value")
            .with_name("ValidationError")
            .with_cause("ignored");
        let e = named.normalize();
        assert_eq!(e.fmt_err(None), "bad value");
        assert!(e.cause().is_none());

        let parse = "x".parse::<i32>().unwrap_err();
        assert_eq!(parse.normalize().message(), "invalid digit found in string");
    }

    #[test]
    fn test_strings_use_themselves() {
        assert_eq!("plain".normalize().fmt_err(None), "plain");
        assert_eq!(String::from("owned").normalize().fmt_err(None), "owned");
        assert_eq!("".normalize().fmt_err(None), "Unknown error");
    }

    #[test]
    fn test_anyhow_uses_outer_message() {
        let e = anyhow::anyhow!("root").context("outer").normalize();
        assert_eq!(e.message(), "outer");
        assert!(e.cause().is_none());
    }

    #[test]
    fn test_anyhow_context_over_chained_keeps_outer_message() {
        let layered = anyhow::Error::new(crate::err("query failed", "timeout")).context("loading user");
        let e = layered.normalize();
        assert_eq!(e.fmt_err(None), "loading user");
        assert!(e.cause().is_none());
    }

    #[test]
    fn test_boxed_send_error() {
        let boxed: Box<dyn std::error::Error + Send> =
            Box::new(std::io::Error::new(std::io::ErrorKind::Other, "send only"));
        assert_eq!(boxed.normalize().message(), "send only");
    }

    #[test]
    fn test_own_error_type() {
        #[derive(Debug)]
        struct Rejected(&'static str);

        impl Normalize for Rejected {
            fn normalize(self) -> ChainedError {
                ChainedError::new(format!("rejected: {}", self.0)).with_value("reason", self.0)
            }
        }

        let outcome = crate::attempt(|| Err::<(), _>(Rejected("duplicate")));
        let error = outcome.error().cloned().unwrap();
        assert_eq!(error.fmt_err(None), "rejected: duplicate");
        assert_eq!(error.get_as::<String>("reason").as_deref(), Some("duplicate"));
    }

    #[test]
    fn test_from_panic_payloads() {
        assert_eq!(from_panic(Box::new("static")).message(), "static");
        assert_eq!(from_panic(Box::new(String::from("owned"))).message(), "owned");
        assert_eq!(from_panic(Box::new(42_u8)).message(), OPAQUE_PANIC);

        let chained = ChainedError::new("raised").with_value("k", 1);
        assert_eq!(from_panic(Box::new(chained.clone())), chained);
    }
}
