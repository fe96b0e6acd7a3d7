use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{path}'")]
    #[diagnostic(help("create a larkspur.toml or pass its path with --config"))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse grammar manifest")]
    #[diagnostic(code(larkspur::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid definition '{name}'")]
    Definition {
        #[source_code]
        src: NamedSource<String>,
        #[label("defined here")]
        span: Option<SourceSpan>,
        name: String,
        #[source]
        #[diagnostic_source]
        source: larkspur_grammar::Error,
    },

    #[error("failed to render grammar")]
    Render {
        #[source]
        #[diagnostic_source]
        source: larkspur_grammar::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(larkspur::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },
}

impl Error {
    /// Create a parse error from a toml error with source context
    pub fn parse(source: toml::de::Error, src: &str, filename: &str) -> Box<Self> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: NamedSource::new(filename, src.to_string()),
            span,
            source,
        })
    }

    /// Create a definition error pointing at the offending name
    pub fn definition(
        name: impl Into<String>,
        source: larkspur_grammar::Error,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Definition {
            src: NamedSource::new(filename, src.to_string()),
            span,
            name: name.into(),
            source,
        })
    }

    /// Create a validation error with an optional span
    pub fn validation(
        message: impl Into<String>,
        src: &str,
        filename: &str,
        span: Option<SourceSpan>,
    ) -> Box<Self> {
        Box::new(Error::Validation {
            src: NamedSource::new(filename, src.to_string()),
            span,
            message: message.into(),
        })
    }

    /// The grammar error behind a definition or render error, if any.
    pub fn grammar_error(&self) -> Option<&larkspur_grammar::Error> {
        match self {
            Error::Definition { source, .. } | Error::Render { source } => Some(source),
            _ => None,
        }
    }
}
