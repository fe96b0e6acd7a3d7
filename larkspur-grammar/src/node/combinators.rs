//! Grouping, alternation and repetition constructors.

use std::fmt;

use super::{Node, Renderable, collect};
use crate::{Error, Result};

/// Postfix repetition operator applied to a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Repetition {
    /// `*`
    ZeroOrMore,
    /// `+`
    OneOrMore,
    /// `?`
    ZeroOrOne,
}

impl Repetition {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::ZeroOrMore => "*",
            Self::OneOrMore => "+",
            Self::ZeroOrOne => "?",
        }
    }

    pub(crate) fn name(&self) -> &'static str {
        match self {
            Self::ZeroOrMore => "Some",
            Self::OneOrMore => "Many",
            Self::ZeroOrOne => "Maybe",
        }
    }
}

/// Bound of a [`Node::repeat`] repetition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bound {
    /// Exact count, `~ 4`.
    Exactly(i64),
    /// Inclusive range, `~ 1..4`.
    Between(i64, i64),
}

impl Bound {
    /// Check the bound allows at least one occurrence.
    pub fn validate(self) -> Result<Self> {
        let valid = match self {
            Self::Exactly(n) => n > 0,
            Self::Between(min, max) => min >= 0 && max > 0 && min <= max,
        };
        if valid {
            Ok(self)
        } else {
            Err(Error::invalid_bound(self))
        }
    }
}

impl fmt::Display for Bound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Exactly(n) => write!(f, "{}", n),
            Self::Between(min, max) => write!(f, "{}..{}", min, max),
        }
    }
}

macro_rules! impl_bound_from {
    ($($int:ty),*) => {
        $(
            impl From<$int> for Bound {
                fn from(n: $int) -> Self {
                    Bound::Exactly(n as i64)
                }
            }

            impl From<[$int; 1]> for Bound {
                fn from([n]: [$int; 1]) -> Self {
                    Bound::Exactly(n as i64)
                }
            }

            impl From<[$int; 2]> for Bound {
                fn from([min, max]: [$int; 2]) -> Self {
                    Bound::Between(min as i64, max as i64)
                }
            }

            impl From<($int, $int)> for Bound {
                fn from((min, max): ($int, $int)) -> Self {
                    Bound::Between(min as i64, max as i64)
                }
            }
        )*
    };
}

impl_bound_from!(i32, i64, u32, usize);

impl Node {
    /// Concatenation in parentheses, `(a b)`.
    pub fn group<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::Group(collect(children))
    }

    /// Zero-or-one concatenation in brackets, `[a b]`.
    pub fn optional<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::Optional(collect(children))
    }

    /// Alternation, `a | b`.
    ///
    /// Not parenthesized: inside a concatenation use [`Node::option_grouped`].
    pub fn option<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::Choice(collect(children))
    }

    /// Alternation wrapped in a group, `(a | b)`.
    pub fn option_grouped<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::Group(vec![Node::option(children).into()])
    }

    /// Zero or more, `(a b)*`.
    pub fn some<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::Repetition(Repetition::ZeroOrMore, collect(children))
    }

    /// One or more, `(a b)+`.
    pub fn many<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::Repetition(Repetition::OneOrMore, collect(children))
    }

    /// Zero or one, `(a b)?`.
    pub fn maybe<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::Repetition(Repetition::ZeroOrOne, collect(children))
    }

    /// `item` followed by zero or more `sep item`, `(item (sep item)*)`.
    pub fn some_separated(sep: impl Into<Renderable>, item: impl Into<Renderable>) -> Self {
        let item = item.into();
        Node::Group(vec![
            item.clone(),
            Node::Repetition(Repetition::ZeroOrMore, vec![sep.into(), item]).into(),
        ])
    }

    /// `item` followed by one or more `sep item`, `(item (sep item)+)`.
    pub fn many_separated(sep: impl Into<Renderable>, item: impl Into<Renderable>) -> Self {
        let item = item.into();
        Node::Group(vec![
            item.clone(),
            Node::Repetition(Repetition::OneOrMore, vec![sep.into(), item]).into(),
        ])
    }

    /// Bounded repetition, `(content) ~ 4` or `(content) ~ 1..4`.
    ///
    /// Fails with [`Error::InvalidBound`] for a bound allowing no occurrence.
    pub fn repeat(content: impl Into<Renderable>, bound: impl Into<Bound>) -> Result<Self> {
        let bound = bound.into().validate()?;
        Ok(Node::Repeat(Box::new(content.into()), bound))
    }

    /// Alias of [`Node::some`].
    pub fn star<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::some(children)
    }

    /// Alias of [`Node::many`].
    pub fn plus<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::many(children)
    }

    /// Alias of [`Node::maybe`].
    pub fn question_mark<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::maybe(children)
    }

    /// Alias of [`Node::group`].
    pub fn parens<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::group(children)
    }

    /// Alias of [`Node::optional`].
    pub fn brackets<I>(children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Node::optional(children)
    }
}
