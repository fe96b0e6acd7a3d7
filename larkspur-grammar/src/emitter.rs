//! Fragment emitter shared by every render pass.

use larkspur_core::Context;

use crate::{Render, Result};

/// Collects the flat, ordered sequence of text fragments a render pass
/// produces.
///
/// # Example
///
/// ```
/// use larkspur_grammar::{Emitter, Node, Render};
/// use larkspur_core::Context;
///
/// let mut out = Emitter::new();
/// out.push("start: ");
/// Node::literal("a").render(&Context::new(), &mut out).unwrap();
/// assert_eq!(out.build(), "start: \"a\"");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Emitter {
    fragments: Vec<String>,
}

impl Emitter {
    /// Create an empty emitter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fragment. Empty fragments are dropped.
    pub fn push(&mut self, fragment: impl Into<String>) -> &mut Self {
        let fragment = fragment.into();
        if !fragment.is_empty() {
            self.fragments.push(fragment);
        }
        self
    }

    /// Append a line break.
    pub fn newline(&mut self) -> &mut Self {
        self.push("\n")
    }

    /// Render a node into this emitter.
    pub fn emit(&mut self, node: &impl Render, ctx: &Context) -> Result<&mut Self> {
        node.render(ctx, self)?;
        Ok(self)
    }

    /// Render `items` with `sep` between consecutive items.
    pub fn emit_separated<R: Render>(
        &mut self,
        items: &[R],
        sep: &str,
        ctx: &Context,
    ) -> Result<&mut Self> {
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                self.push(sep);
            }
            item.render(ctx, self)?;
        }
        Ok(self)
    }

    /// Render `items` separated by `sep` and enclosed in `open`/`close`.
    pub fn emit_wrapped<R: Render>(
        &mut self,
        open: &str,
        close: &str,
        items: &[R],
        sep: &str,
        ctx: &Context,
    ) -> Result<&mut Self> {
        self.push(open);
        self.emit_separated(items, sep, ctx)?;
        self.push(close);
        Ok(self)
    }

    /// Get the fragments collected so far.
    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Consume the emitter and return its fragments.
    pub fn into_fragments(self) -> Vec<String> {
        self.fragments
    }

    /// Consume the emitter and concatenate its fragments.
    pub fn build(self) -> String {
        self.fragments.concat()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Renderable;

    #[test]
    fn test_push_skips_empty() {
        let mut out = Emitter::new();
        out.push("").push("a").push(String::new()).newline();
        assert_eq!(out.fragments(), ["a", "\n"]);
    }

    #[test]
    fn test_emit_separated() {
        let items: Vec<Renderable> = vec!["a".into(), "b".into(), "c".into()];
        let mut out = Emitter::new();
        out.emit_separated(&items, " | ", &Context::new()).unwrap();
        assert_eq!(out.build(), r#""a" | "b" | "c""#);
    }

    #[test]
    fn test_emit_wrapped_empty() {
        let items: Vec<Renderable> = Vec::new();
        let mut out = Emitter::new();
        out.emit_wrapped("(", ")", &items, " ", &Context::new())
            .unwrap();
        assert_eq!(out.build(), "()");
    }
}
