//! Named references: rule and terminal handles, template instantiation
//! and result aliases.

use std::sync::atomic::{AtomicU64, Ordering};

use super::{Renderable, collect};

/// Identity of a [`Grammar`](crate::Grammar) instance.
///
/// Handles carry the id of the grammar that issued them instead of a
/// pointer, so they stay valid whether or not their name is defined yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GrammarId(u64);

impl GrammarId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Forward-reference handle to a rule.
///
/// Renders as the bare rule name whether or not the rule has been defined.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRef {
    name: String,
    grammar: GrammarId,
}

impl RuleRef {
    pub(crate) fn new(name: impl Into<String>, grammar: GrammarId) -> Self {
        Self {
            name: name.into(),
            grammar,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grammar(&self) -> GrammarId {
        self.grammar
    }

    /// Instantiate the template of this name, `name{arg1, arg2}`.
    ///
    /// A tuple gives one argument per element. Any other value, a list
    /// included, is a single argument: `(a, b)` renders `name{a, b}` while
    /// `vec![a, b]` renders `name{[a b]}`. Use [`Template::new`] to pass an
    /// argument list directly.
    pub fn template(&self, args: impl Into<Renderable>) -> Template {
        let args = match args.into() {
            Renderable::Group(children) => children,
            other => vec![other],
        };
        Template::new(self.name.clone(), args)
    }
}

/// Forward-reference handle to a terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerminalRef {
    name: String,
    grammar: GrammarId,
}

impl TerminalRef {
    pub(crate) fn new(name: impl Into<String>, grammar: GrammarId) -> Self {
        Self {
            name: name.into(),
            grammar,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn grammar(&self) -> GrammarId {
        self.grammar
    }
}

/// A handle returned by a name lookup; the case of the name picks the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reference {
    Rule(RuleRef),
    Terminal(TerminalRef),
}

impl Reference {
    pub fn name(&self) -> &str {
        match self {
            Self::Rule(rule) => rule.name(),
            Self::Terminal(terminal) => terminal.name(),
        }
    }

    pub fn grammar(&self) -> GrammarId {
        match self {
            Self::Rule(rule) => rule.grammar(),
            Self::Terminal(terminal) => terminal.grammar(),
        }
    }
}

impl From<RuleRef> for Reference {
    fn from(rule: RuleRef) -> Self {
        Self::Rule(rule)
    }
}

impl From<TerminalRef> for Reference {
    fn from(terminal: TerminalRef) -> Self {
        Self::Terminal(terminal)
    }
}

impl From<&RuleRef> for Reference {
    fn from(rule: &RuleRef) -> Self {
        Self::Rule(rule.clone())
    }
}

impl From<&TerminalRef> for Reference {
    fn from(terminal: &TerminalRef) -> Self {
        Self::Terminal(terminal.clone())
    }
}

/// Instantiation of a named template, `name{arg1, arg2}`.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    args: Vec<Renderable>,
}

impl Template {
    pub fn new<I>(name: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Self {
            name: name.into(),
            args: collect(args),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn args(&self) -> &[Renderable] {
        &self.args
    }
}

/// Names the result of its children, `a b -> name`.
#[derive(Debug, Clone)]
pub struct Alias {
    name: String,
    children: Vec<Renderable>,
}

impl Alias {
    /// An alias with no children yet.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            children: Vec::new(),
        }
    }

    /// Attach children, replacing any previous ones.
    pub fn with<I>(mut self, children: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        self.children = collect(children);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[Renderable] {
        &self.children
    }
}

#[cfg(test)]
mod tests {
    use larkspur_core::Context;

    use super::*;
    use crate::{Node, Render, tokens};

    fn render(value: impl Into<Renderable>) -> String {
        value.into().render_to_string(&Context::new()).unwrap()
    }

    #[test]
    fn test_grammar_ids_are_unique() {
        assert_ne!(GrammarId::next(), GrammarId::next());
    }

    #[test]
    fn test_handles_render_bare_names() {
        let id = GrammarId::next();
        assert_eq!(render(RuleRef::new("expr", id)), "expr");
        assert_eq!(render(TerminalRef::new("NUMBER", id)), "NUMBER");
    }

    #[test]
    fn test_template_instantiation() {
        let id = GrammarId::next();
        let sep = RuleRef::new("sep", id);
        let value = RuleRef::new("value", id);
        assert_eq!(render(sep.template((value.clone(), ","))), r#"sep{value, ","}"#);
        assert_eq!(render(sep.template(value.clone())), "sep{value}");
        assert_eq!(render(sep.template(vec![value.clone()])), "sep{[value]}");
        assert_eq!(render(Template::new("sep", tokens![value, ","])), r#"sep{value, ","}"#);
    }

    #[test]
    fn test_alias() {
        let alias = Alias::named("add").with(tokens![Node::prerendered("sum"), "+", Node::prerendered("product")]);
        assert_eq!(render(alias), r#"sum "+" product -> add"#);
        assert_eq!(render(Alias::named("empty")), " -> empty");
    }

    #[test]
    fn test_reference_kinds() {
        let id = GrammarId::next();
        let reference = Reference::from(TerminalRef::new("WS", id));
        assert_eq!(reference.name(), "WS");
        assert_eq!(reference.grammar(), id);
    }
}
