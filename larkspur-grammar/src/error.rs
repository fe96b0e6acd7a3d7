use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

/// Result type for grammar construction and generation.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// The namespace a definition lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Namespace {
    Rule,
    Terminal,
    Template,
    Directive,
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Rule => "rule",
            Self::Terminal => "terminal",
            Self::Template => "template",
            Self::Directive => "directive",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("invalid {namespace} name '{name}'")]
    #[diagnostic(
        code(larkspur::invalid_name),
        help(
            "{reason}. Rule names use [a-z0-9_], terminal names use [A-Z0-9_], neither may start with a digit."
        )
    )]
    InvalidName {
        name: String,
        namespace: Namespace,
        reason: String,
    },

    #[error("{namespace} '{name}' already exists")]
    #[diagnostic(
        code(larkspur::duplicate_name),
        help("pass `replace` in the definition options to overwrite '{name}'")
    )]
    DuplicateName { name: String, namespace: Namespace },

    #[error("no definition by the name '{name}'")]
    #[diagnostic(code(larkspur::unknown_definition))]
    UnknownDefinition { name: String },

    #[error("{message}")]
    #[diagnostic(code(larkspur::invalid_operation))]
    InvalidOperation { message: String },

    #[error("invalid repetition bound {bound}")]
    #[diagnostic(
        code(larkspur::invalid_bound),
        help("a bounded repetition needs a positive count, e.g. `4` or `1..4`")
    )]
    InvalidBound { bound: String },

    #[error("missing context key '{key}'")]
    #[diagnostic(
        code(larkspur::missing_context),
        help("pass '{key}' in the generation context, e.g. `--set {key}=...`")
    )]
    MissingContext { key: String },

    #[error("{message}")]
    #[diagnostic(code(larkspur::resolve_error))]
    Resolve { message: String },
}

impl Error {
    /// Create an invalid name error
    pub fn invalid_name(
        name: impl Into<String>,
        namespace: Namespace,
        reason: impl Into<String>,
    ) -> Self {
        Error::InvalidName {
            name: name.into(),
            namespace,
            reason: reason.into(),
        }
    }

    /// Create a duplicate name error
    pub fn duplicate_name(name: impl Into<String>, namespace: Namespace) -> Self {
        Error::DuplicateName {
            name: name.into(),
            namespace,
        }
    }

    /// Create an unknown definition error
    pub fn unknown_definition(name: impl Into<String>) -> Self {
        Error::UnknownDefinition { name: name.into() }
    }

    /// Create an invalid operation error
    pub fn invalid_operation(message: impl Into<String>) -> Self {
        Error::InvalidOperation {
            message: message.into(),
        }
    }

    /// Create an invalid bound error
    pub fn invalid_bound(bound: impl fmt::Display) -> Self {
        Error::InvalidBound {
            bound: bound.to_string(),
        }
    }

    /// Create a missing context key error, for use in variable resolvers
    pub fn missing_context(key: impl Into<String>) -> Self {
        Error::MissingContext { key: key.into() }
    }

    /// Create a resolver error with a custom message
    pub fn resolve(message: impl Into<String>) -> Self {
        Error::Resolve {
            message: message.into(),
        }
    }
}
