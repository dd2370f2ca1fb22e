//! Walking a cause chain

use crate::{ChainedError, GenericError};
use serde_json::Value;
use std::borrow::Cow;
use std::collections::HashMap;

/// One node of a cause chain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Link<'a> {
    Chained(&'a ChainedError),
    Generic(&'a GenericError),
    Str(&'a str),
}

impl<'a> Link<'a> {
    /// The text this node contributes to a formatted chain.
    ///
    /// Chained errors contribute their bare message, generic errors are
    /// prefixed with their name unless it is the default one, strings
    /// contribute themselves. Blank text contributes nothing.
    pub fn segment(&self) -> Option<Cow<'a, str>> {
        let segment = match *self {
            Link::Chained(err) => Cow::Borrowed(err.message()),
            Link::Generic(err) => {
                if is_blank(err.message()) {
                    return None;
                }
                if err.has_default_name() {
                    Cow::Borrowed(err.message())
                } else {
                    Cow::Owned(format!("{}: {}", err.name(), err.message()))
                }
            }
            Link::Str(s) => Cow::Borrowed(s),
        };

        if is_blank(&segment) {
            None
        } else {
            Some(segment)
        }
    }

    /// The annotation store of this node. Only chained errors carry one.
    pub fn context(&self) -> Option<&'a HashMap<String, Value>> {
        match *self {
            Link::Chained(err) => err.context(),
            Link::Generic(_) | Link::Str(_) => None,
        }
    }

    /// The node below this one, if any
    pub fn next(&self) -> Option<Link<'a>> {
        match *self {
            Link::Chained(err) => err.cause().link(),
            Link::Generic(err) => err.cause().link(),
            Link::Str(_) => None,
        }
    }
}

/// Iterator over a cause chain, from the outermost error to the deepest cause.
///
/// Created by [`ChainedError::chain`].
#[derive(Debug, Clone)]
pub struct Chain<'a> {
    next: Option<Link<'a>>,
}

impl<'a> Chain<'a> {
    pub(crate) fn new(head: Link<'a>) -> Self {
        Self { next: Some(head) }
    }
}

impl<'a> Iterator for Chain<'a> {
    type Item = Link<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next.take()?;
        self.next = current.next();
        Some(current)
    }
}

pub(crate) fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err;

    #[test]
    fn test_chain_order() {
        let root = err(
            "top",
            err("middle", GenericError::new("generic").with_cause("text")),
        );

        let kinds: Vec<&str> = root
            .chain()
            .map(|link| match link {
                Link::Chained(_) => "chained",
                Link::Generic(_) => "generic",
                Link::Str(_) => "str",
            })
            .collect();

        assert_eq!(kinds, vec!["chained", "chained", "generic", "str"]);
    }

    #[test]
    fn test_segments() {
        let named = GenericError::new("bad input").with_name("ValidationError");
        assert_eq!(
            Link::Generic(&named).segment().as_deref(),
            Some("ValidationError: bad input")
        );

        let blank = GenericError::new("   ").with_name("ValidationError");
        assert_eq!(Link::Generic(&blank).segment(), None);

        assert_eq!(Link::Str("  ").segment(), None);
        assert_eq!(Link::Str("text").segment().as_deref(), Some("text"));
    }

    #[test]
    fn test_only_chained_links_have_context() {
        let e = err("top", "bottom").with_value("k", 1);
        let contexts: Vec<bool> = e.chain().map(|l| l.context().is_some()).collect();
        assert_eq!(contexts, vec![true, false]);
    }
}
