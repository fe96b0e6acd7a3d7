//! Source-aware error construction while building a grammar from a manifest.

use miette::SourceSpan;

use crate::Error;

/// Source content and filename of the manifest being built.
#[derive(Debug, Clone, Copy)]
pub struct ParseContext<'a> {
    src: &'a str,
    filename: &'a str,
}

impl<'a> ParseContext<'a> {
    pub fn new(src: &'a str, filename: &'a str) -> Self {
        Self { src, filename }
    }

    pub fn src(&self) -> &'a str {
        self.src
    }

    pub fn filename(&self) -> &'a str {
        self.filename
    }

    /// Find the span of a definition name in the source.
    pub fn find_span(&self, name: &str) -> Option<SourceSpan> {
        find_name_span(self.src, name)
    }

    /// Wrap a grammar error raised while building the definition `name`.
    pub fn definition_error(&self, name: &str, source: larkspur_grammar::Error) -> Box<Error> {
        Error::definition(name, source, self.src, self.filename, self.find_span(name))
    }

    /// A validation error labelled at the definition `name`.
    pub fn validation_error(&self, name: &str, message: impl Into<String>) -> Box<Error> {
        Error::validation(message, self.src, self.filename, self.find_span(name))
    }
}

/// Find the span of a definition name in the TOML source.
/// Searches for `name = "..."` first, then any quoted occurrence.
pub(crate) fn find_name_span(src: &str, name: &str) -> Option<SourceSpan> {
    let patterns = [
        format!("name = \"{}\"", name),
        format!("name=\"{}\"", name),
        format!("name = '{}'", name),
    ];

    for pattern in &patterns {
        if let Some(pos) = src.find(pattern.as_str()) {
            // Skip up to and including the opening quote
            let start = pos + pattern.len() - name.len() - 1;
            return Some(SourceSpan::from((start, name.len())));
        }
    }

    // Fallback: any quoted occurrence, then a bare one
    if let Some(pos) = src.find(&format!("\"{}\"", name)) {
        return Some(SourceSpan::from((pos + 1, name.len())));
    }
    src.find(name)
        .map(|pos| SourceSpan::from((pos, name.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_name_span() {
        let src = "[[rules]]\nname = \"start\"\nbody = [\"a\"]\n";
        let span = find_name_span(src, "start").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "start");
    }

    #[test]
    fn test_find_name_span_compact() {
        let src = "rules = [{name=\"expr\", body = []}]";
        let span = find_name_span(src, "expr").unwrap();
        assert_eq!(&src[span.offset()..span.offset() + span.len()], "expr");
    }

    #[test]
    fn test_find_name_span_missing() {
        assert!(find_name_span("[context]", "start").is_none());
    }
}
