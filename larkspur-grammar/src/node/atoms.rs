//! Atomic nodes: literals, regular expressions and ranges.

use std::fmt;

use larkspur_core::quote_literal;

use super::Node;

/// A quoted string literal with optional flags, e.g. `"select"i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Literal {
    value: String,
    flags: String,
}

impl Literal {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            flags: String::new(),
        }
    }

    /// Return a copy with `flags` appended to the existing flags.
    pub fn flag(&self, flags: &str) -> Self {
        Self {
            value: self.value.clone(),
            flags: format!("{}{}", self.flags, flags),
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", quote_literal(&self.value), self.flags)
    }
}

/// A regular expression literal, e.g. `/[0-9]+/i`.
///
/// The pattern is emitted verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegExp {
    pattern: String,
    flags: String,
}

impl RegExp {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            flags: String::new(),
        }
    }

    /// Return a copy with `flags` appended to the existing flags.
    pub fn flag(&self, flags: &str) -> Self {
        Self {
            pattern: self.pattern.clone(),
            flags: format!("{}{}", self.flags, flags),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn flags(&self) -> &str {
        &self.flags
    }
}

impl fmt::Display for RegExp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}/{}", self.pattern, self.flags)
    }
}

/// One end of a [`Range`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeEnd {
    /// Rendered as digits, `1`.
    Number(i64),
    /// Rendered as a quoted literal, `"a"`.
    Char(char),
}

impl fmt::Display for RangeEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{}", n),
            Self::Char(c) => f.write_str(&quote_literal(&c.to_string())),
        }
    }
}

/// A range, `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Range {
    pub start: RangeEnd,
    pub end: RangeEnd,
}

impl Range {
    /// Numeric range, `1..4`.
    pub fn numeric(start: i64, end: i64) -> Self {
        Self {
            start: RangeEnd::Number(start),
            end: RangeEnd::Number(end),
        }
    }

    /// Character range, `"a".."z"`.
    pub fn chars(start: char, end: char) -> Self {
        Self {
            start: RangeEnd::Char(start),
            end: RangeEnd::Char(end),
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl Node {
    /// A quoted literal, `"value"`.
    pub fn literal(value: impl Into<String>) -> Self {
        Node::Literal(Literal::new(value))
    }

    /// A regular expression, `/pattern/`.
    pub fn regexp(pattern: impl Into<String>) -> Self {
        Node::RegExp(RegExp::new(pattern))
    }

    /// Text emitted verbatim, without quoting or escaping.
    pub fn prerendered(text: impl Into<String>) -> Self {
        Node::Prerendered(text.into())
    }

    /// A node that renders nothing.
    pub fn empty() -> Self {
        Node::Prerendered(String::new())
    }

    /// Numeric range, `start..end`.
    pub fn range(start: i64, end: i64) -> Self {
        Node::Range(Range::numeric(start, end))
    }

    /// Character range, `"a".."z"`.
    pub fn char_range(start: char, end: char) -> Self {
        Node::Range(Range::chars(start, end))
    }
}
