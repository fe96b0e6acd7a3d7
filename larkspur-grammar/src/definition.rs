//! Named definitions held by a [`Grammar`](crate::Grammar).
//!
//! - [`Definition`] - a rule or a terminal, `name.2: body`
//! - [`TemplateDef`] - a parameterized rule, `name{a, b}: body`
//! - [`DirectiveDef`] - an unnamed directive line, `%import common.WS`
//! - [`Modifier`] - inline/keep-terminals markers wrapping a body

use std::fmt;

use larkspur_core::{Context, indent_block};

use crate::{
    Emitter, Render, Result,
    node::{
        Alias, BoolVariable, Literal, Node, Range, Reference, RegExp, Renderable, RuleRef,
        Template, TerminalRef, Variable, collect, describe_node,
    },
};

/// Priority of a definition that renders without a `.priority` suffix.
pub const DEFAULT_PRIORITY: i64 = 1;

/// How a definition is emitted by the parser toolkit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ModifierKind {
    #[default]
    None,
    /// `_rule` inlines the rule; `_TERM` makes a terminal anonymous.
    Inline,
    /// `?rule` inlines the rule when it has a single child.
    InlineSingle,
    /// `!rule` keeps punctuation terminals in the tree.
    KeepTerminals,
}

impl ModifierKind {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::None => "",
            Self::Inline => "_",
            Self::InlineSingle => "?",
            Self::KeepTerminals => "!",
        }
    }
}

impl fmt::Display for ModifierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// A modifier tag together with the body it applies to.
///
/// # Example
///
/// ```
/// use larkspur_grammar::{Grammar, Modifier};
///
/// let mut grammar = Grammar::new();
/// grammar.define("atom", Modifier::INLINE_SINGLE.apply(("(", "x", ")"))).unwrap();
/// assert_eq!(grammar.generate(&Default::default()).unwrap(), r#"?atom: "(" "x" ")""#);
/// ```
#[derive(Debug, Clone)]
pub struct Modifier {
    kind: ModifierKind,
    tokens: Vec<Renderable>,
}

impl Modifier {
    /// Inline a rule into its parent.
    pub const INLINE: Modifier = Modifier::new(ModifierKind::Inline);
    /// Inline a rule when it has a single child.
    pub const INLINE_SINGLE: Modifier = Modifier::new(ModifierKind::InlineSingle);
    /// Keep all terminals of a rule.
    pub const KEEP_TERMINALS: Modifier = Modifier::new(ModifierKind::KeepTerminals);
    /// Filter a terminal out of the tree.
    pub const ANONYMOUS: Modifier = Modifier::new(ModifierKind::Inline);

    pub const fn new(kind: ModifierKind) -> Self {
        Self {
            kind,
            tokens: Vec::new(),
        }
    }

    /// A modifier of the same kind wrapping `body`.
    pub fn apply(&self, body: impl Into<Body>) -> Modifier {
        Modifier {
            kind: self.kind,
            tokens: body.into().tokens,
        }
    }

    pub fn kind(&self) -> ModifierKind {
        self.kind
    }

    pub fn tokens(&self) -> &[Renderable] {
        &self.tokens
    }
}

impl From<Modifier> for ModifierKind {
    fn from(modifier: Modifier) -> Self {
        modifier.kind
    }
}

impl From<&Modifier> for ModifierKind {
    fn from(modifier: &Modifier) -> Self {
        modifier.kind
    }
}

/// The tokens of a definition body, optionally tagged with a modifier.
///
/// A single value becomes a one-token body, a tuple becomes one token per
/// element, and a [`Modifier`] carries its own tokens and kind.
#[derive(Debug, Clone, Default)]
pub struct Body {
    tokens: Vec<Renderable>,
    modifier: Option<ModifierKind>,
}

impl Body {
    pub fn new<I>(tokens: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Renderable>,
    {
        Self {
            tokens: collect(tokens),
            modifier: None,
        }
    }

    pub fn tokens(&self) -> &[Renderable] {
        &self.tokens
    }

    pub fn modifier(&self) -> Option<ModifierKind> {
        self.modifier
    }

    pub(crate) fn into_parts(self) -> (Vec<Renderable>, Option<ModifierKind>) {
        (self.tokens, self.modifier)
    }
}

impl From<Modifier> for Body {
    fn from(modifier: Modifier) -> Self {
        Self {
            tokens: modifier.tokens,
            modifier: Some(modifier.kind),
        }
    }
}

/// A list is a single optional token, `[a b]`.
impl<T: Into<Renderable>> From<Vec<T>> for Body {
    fn from(items: Vec<T>) -> Self {
        Self {
            tokens: vec![Renderable::from(items)],
            modifier: None,
        }
    }
}

macro_rules! impl_body_from_single {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Body {
                fn from(value: $ty) -> Self {
                    Self {
                        tokens: vec![Renderable::from(value)],
                        modifier: None,
                    }
                }
            }
        )*
    };
}

impl_body_from_single!(
    &str, String, Renderable, Node, Literal, RegExp, RuleRef, TerminalRef, Reference, Template,
    Range, Alias, Variable, BoolVariable,
);

macro_rules! impl_body_from_tuple {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name: Into<Renderable>),+> From<($($name,)+)> for Body {
                #[allow(non_snake_case)]
                fn from(($($name,)+): ($($name,)+)) -> Self {
                    Self {
                        tokens: vec![$($name.into()),+],
                        modifier: None,
                    }
                }
            }
        )*
    };
}

impl_body_from_tuple!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
    (A, B, C, D, E, F, G),
    (A, B, C, D, E, F, G, H),
);

/// Options for creating a definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DefOptions {
    pub modifier: ModifierKind,
    pub priority: i64,
    /// Overwrite an existing definition of the same name.
    pub replace: bool,
}

impl Default for DefOptions {
    fn default() -> Self {
        Self {
            modifier: ModifierKind::None,
            priority: DEFAULT_PRIORITY,
            replace: false,
        }
    }
}

impl DefOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn modifier(mut self, modifier: impl Into<ModifierKind>) -> Self {
        self.modifier = modifier.into();
        self
    }

    pub fn priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn replace(mut self) -> Self {
        self.replace = true;
        self
    }
}

/// Whether a [`Definition`] is a rule or a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionKind {
    Rule,
    Terminal,
}

/// A rule or terminal definition, `<modifier><name>[.<priority>]: <body>`.
#[derive(Debug, Clone)]
pub struct Definition {
    kind: DefinitionKind,
    name: String,
    tokens: Vec<Renderable>,
    modifier: ModifierKind,
    priority: i64,
}

impl Definition {
    /// Create a definition. A modifier carried by `body` overrides the one
    /// in `options`.
    pub fn new(
        kind: DefinitionKind,
        name: impl Into<String>,
        body: impl Into<Body>,
        options: DefOptions,
    ) -> Self {
        let (tokens, modifier) = body.into().into_parts();
        Self {
            kind,
            name: name.into(),
            tokens,
            modifier: modifier.unwrap_or(options.modifier),
            priority: options.priority,
        }
    }

    pub fn kind(&self) -> DefinitionKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tokens(&self) -> &[Renderable] {
        &self.tokens
    }

    pub fn modifier(&self) -> ModifierKind {
        self.modifier
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn set_tokens(&mut self, body: impl Into<Body>) -> &mut Self {
        self.tokens = body.into().tokens;
        self
    }

    pub fn push_token(&mut self, token: impl Into<Renderable>) -> &mut Self {
        self.tokens.push(token.into());
        self
    }

    pub fn set_modifier(&mut self, modifier: impl Into<ModifierKind>) -> &mut Self {
        self.modifier = modifier.into();
        self
    }

    pub fn set_priority(&mut self, priority: i64) -> &mut Self {
        self.priority = priority;
        self
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut Vec<Renderable> {
        &mut self.tokens
    }

    pub(crate) fn modifier_mut(&mut self) -> &mut ModifierKind {
        &mut self.modifier
    }

    pub(crate) fn priority_mut(&mut self) -> &mut i64 {
        &mut self.priority
    }
}

impl Render for Definition {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        out.push(self.modifier.symbol()).push(self.name.as_str());
        if self.priority != DEFAULT_PRIORITY {
            out.push(".").push(self.priority.to_string());
        }
        out.push(": ");
        out.emit_separated(&self.tokens, " ", ctx)?;
        Ok(())
    }

    fn describe(&self) -> String {
        let kind = match self.kind {
            DefinitionKind::Rule => "RuleDef",
            DefinitionKind::Terminal => "TerminalDef",
        };
        describe_node(&format!("{}:{}", kind, self.name), &self.tokens)
    }
}

/// A template definition, `<modifier><name>{<param>, ...}: <body>`.
#[derive(Debug, Clone)]
pub struct TemplateDef {
    name: String,
    params: Vec<Renderable>,
    tokens: Vec<Renderable>,
    modifier: ModifierKind,
}

impl TemplateDef {
    pub fn new(
        name: impl Into<String>,
        params: Vec<Renderable>,
        body: impl Into<Body>,
        modifier: ModifierKind,
    ) -> Self {
        let (tokens, body_modifier) = body.into().into_parts();
        Self {
            name: name.into(),
            params,
            tokens,
            modifier: body_modifier.unwrap_or(modifier),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &[Renderable] {
        &self.params
    }

    pub fn tokens(&self) -> &[Renderable] {
        &self.tokens
    }

    pub fn modifier(&self) -> ModifierKind {
        self.modifier
    }

    pub(crate) fn tokens_mut(&mut self) -> &mut Vec<Renderable> {
        &mut self.tokens
    }

    pub(crate) fn modifier_mut(&mut self) -> &mut ModifierKind {
        &mut self.modifier
    }
}

impl Render for TemplateDef {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        out.push(self.modifier.symbol()).push(self.name.as_str());
        out.emit_wrapped("{", "}", &self.params, ", ", ctx)?;
        out.push(": ");
        out.emit_separated(&self.tokens, " ", ctx)?;
        Ok(())
    }

    fn describe(&self) -> String {
        describe_node(&format!("TemplateDef:{}", self.name), &self.tokens)
    }
}

/// Content of a directive: raw text or a node.
#[derive(Debug, Clone)]
pub enum DirectiveContent {
    /// Emitted verbatim.
    Raw(String),
    Node(Node),
}

impl From<&str> for DirectiveContent {
    fn from(text: &str) -> Self {
        Self::Raw(text.to_string())
    }
}

impl From<String> for DirectiveContent {
    fn from(text: String) -> Self {
        Self::Raw(text)
    }
}

macro_rules! impl_directive_from_node {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for DirectiveContent {
                fn from(value: $ty) -> Self {
                    Self::Node(Node::from(value))
                }
            }
        )*
    };
}

impl_directive_from_node!(Node, Literal, RegExp, RuleRef, TerminalRef, Reference);

/// A directive line, `%<name> <content>`.
#[derive(Debug, Clone)]
pub struct DirectiveDef {
    name: String,
    content: DirectiveContent,
}

impl DirectiveDef {
    pub fn new(name: impl Into<String>, content: impl Into<DirectiveContent>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &DirectiveContent {
        &self.content
    }
}

impl Render for DirectiveDef {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        out.push("%").push(self.name.as_str()).push(" ");
        match &self.content {
            DirectiveContent::Raw(text) => {
                out.push(text.as_str());
            }
            DirectiveContent::Node(node) => node.render(ctx, out)?,
        }
        Ok(())
    }

    fn describe(&self) -> String {
        let content = match &self.content {
            DirectiveContent::Raw(text) => text.clone(),
            DirectiveContent::Node(node) => node.describe(),
        };
        format!("DirectiveDef:{}({})", self.name, indent_block(&content))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{node::GrammarId, tokens};

    fn render(value: &impl Render) -> String {
        value.render_to_string(&Context::new()).unwrap()
    }

    fn rule(body: impl Into<Body>, options: DefOptions) -> Definition {
        Definition::new(DefinitionKind::Rule, "rule1", body, options)
    }

    #[test]
    fn test_definition_render() {
        assert_eq!(render(&rule("a", DefOptions::new())), r#"rule1: "a""#);
        assert_eq!(
            render(&rule(("a", "b"), DefOptions::new())),
            r#"rule1: "a" "b""#
        );
    }

    #[test]
    fn test_list_body_is_optional() {
        assert_eq!(
            render(&rule(vec!["a", "b"], DefOptions::new())),
            r#"rule1: ["a" "b"]"#
        );
    }

    #[test]
    fn test_priority_suffix() {
        assert_eq!(
            render(&rule("a", DefOptions::new().priority(2))),
            r#"rule1.2: "a""#
        );
        assert_eq!(
            render(&rule("a", DefOptions::new().priority(-1))),
            r#"rule1.-1: "a""#
        );
    }

    #[test]
    fn test_modifier_prefix() {
        assert_eq!(
            render(&rule("a", DefOptions::new().modifier(Modifier::KEEP_TERMINALS))),
            r#"!rule1: "a""#
        );
    }

    #[test]
    fn test_modifier_body_overrides_options() {
        let def = rule(
            Modifier::INLINE.apply(("a", "b")),
            DefOptions::new().modifier(ModifierKind::KeepTerminals),
        );
        assert_eq!(def.modifier(), ModifierKind::Inline);
        assert_eq!(render(&def), r#"_rule1: "a" "b""#);
    }

    #[test]
    fn test_modifier_presets() {
        assert_eq!(Modifier::INLINE.kind().symbol(), "_");
        assert_eq!(Modifier::INLINE_SINGLE.kind().symbol(), "?");
        assert_eq!(Modifier::KEEP_TERMINALS.kind().symbol(), "!");
        assert_eq!(Modifier::ANONYMOUS.kind().symbol(), "_");
        assert!(Modifier::INLINE.tokens().is_empty());
    }

    #[test]
    fn test_inline_mutation() {
        let mut def = rule("a", DefOptions::new());
        def.push_token("b").set_priority(3).set_modifier(Modifier::INLINE);
        assert_eq!(render(&def), r#"_rule1.3: "a" "b""#);
    }

    #[test]
    fn test_template_def_render() {
        let id = GrammarId::next();
        let params = vec![
            Renderable::from(RuleRef::new("x", id)),
            Renderable::from(RuleRef::new("sep", id)),
        ];
        let body = (
            RuleRef::new("x", id),
            Node::some(tokens![RuleRef::new("sep", id), RuleRef::new("x", id)]),
        );
        let def = TemplateDef::new("_separated", params, body, ModifierKind::None);
        assert_eq!(render(&def), "_separated{x, sep}: x (sep x)*");
    }

    #[test]
    fn test_directive_render() {
        assert_eq!(
            render(&DirectiveDef::new("import", "common.WS")),
            "%import common.WS"
        );
        let id = GrammarId::next();
        assert_eq!(
            render(&DirectiveDef::new("ignore", TerminalRef::new("WS", id))),
            "%ignore WS"
        );
    }

    #[test]
    fn test_describe_definition() {
        let def = Definition::new(DefinitionKind::Terminal, "TERM1", "b", DefOptions::new());
        assert_eq!(def.describe(), "TerminalDef:TERM1(\n    \"b\"\n)");
    }
}
