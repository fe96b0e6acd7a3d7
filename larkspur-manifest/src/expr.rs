//! Node expressions as written in a manifest.
//!
//! A bare string is a quoted literal. Any other node is an inline table with
//! a single key naming its kind:
//!
//! ```toml
//! body = ["(", { rule = "expr" }, ")", { many = [{ terminal = "NAME" }] }]
//! ```

use larkspur_grammar::{Alias, Grammar, Literal, Node, RegExp, Renderable, Result, Template};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NodeExpr {
    /// Quoted, escaped literal.
    Text(String),
    Kind(NodeKind),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Literal(Flagged),
    Regexp(Flagged),
    /// Emitted verbatim.
    Raw(String),
    Rule(String),
    Terminal(String),
    Group(Vec<NodeExpr>),
    Optional(Vec<NodeExpr>),
    Options(Vec<NodeExpr>),
    OptionsGrouped(Vec<NodeExpr>),
    #[serde(rename = "some")]
    ZeroOrMore(Vec<NodeExpr>),
    #[serde(rename = "many")]
    OneOrMore(Vec<NodeExpr>),
    #[serde(rename = "maybe")]
    ZeroOrOne(Vec<NodeExpr>),
    SomeSeparated(Separated),
    ManySeparated(Separated),
    Repeat(Repeat),
    Range([i64; 2]),
    CharRange([char; 2]),
    Alias(AliasExpr),
    Template(TemplateExpr),
    When(When),
}

/// A pattern or value with optional flags, `"abc"` or `{ value = "abc", flags = "i" }`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Flagged {
    Plain(String),
    WithFlags { value: String, flags: String },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Separated {
    pub sep: Box<NodeExpr>,
    pub item: Box<NodeExpr>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Repeat {
    pub item: Box<NodeExpr>,
    pub count: Count,
}

/// `4` or `[1, 4]`.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
pub enum Count {
    Exactly(i64),
    Between([i64; 2]),
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AliasExpr {
    pub name: String,
    #[serde(default)]
    pub children: Vec<NodeExpr>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateExpr {
    pub name: String,
    pub args: Vec<NodeExpr>,
}

/// Picks `then` or `else` on a boolean context key.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct When {
    pub key: String,
    #[serde(default)]
    pub default: bool,
    pub then: Box<NodeExpr>,
    #[serde(rename = "else")]
    pub otherwise: Box<NodeExpr>,
}

impl Flagged {
    fn parts(&self) -> (&str, &str) {
        match self {
            Flagged::Plain(value) => (value, ""),
            Flagged::WithFlags { value, flags } => (value, flags),
        }
    }
}

impl NodeExpr {
    /// Build the node, issuing rule and terminal handles from `grammar`.
    pub fn to_renderable(&self, grammar: &Grammar) -> Result<Renderable> {
        let kind = match self {
            NodeExpr::Text(text) => return Ok(text.as_str().into()),
            NodeExpr::Kind(kind) => kind,
        };
        let node: Node = match kind {
            NodeKind::Literal(literal) => {
                let (value, flags) = literal.parts();
                Literal::new(value).flag(flags).into()
            }
            NodeKind::Regexp(regexp) => {
                let (pattern, flags) = regexp.parts();
                RegExp::new(pattern).flag(flags).into()
            }
            NodeKind::Raw(text) => Node::prerendered(text.as_str()),
            NodeKind::Rule(name) => grammar.rule(name)?.into(),
            NodeKind::Terminal(name) => grammar.terminal(name)?.into(),
            NodeKind::Group(children) => Node::group(all(children, grammar)?),
            NodeKind::Optional(children) => Node::optional(all(children, grammar)?),
            NodeKind::Options(children) => Node::option(all(children, grammar)?),
            NodeKind::OptionsGrouped(children) => Node::option_grouped(all(children, grammar)?),
            NodeKind::ZeroOrMore(children) => Node::some(all(children, grammar)?),
            NodeKind::OneOrMore(children) => Node::many(all(children, grammar)?),
            NodeKind::ZeroOrOne(children) => Node::maybe(all(children, grammar)?),
            NodeKind::SomeSeparated(Separated { sep, item }) => {
                Node::some_separated(sep.to_renderable(grammar)?, item.to_renderable(grammar)?)
            }
            NodeKind::ManySeparated(Separated { sep, item }) => {
                Node::many_separated(sep.to_renderable(grammar)?, item.to_renderable(grammar)?)
            }
            NodeKind::Repeat(Repeat { item, count }) => {
                let item = item.to_renderable(grammar)?;
                match *count {
                    Count::Exactly(n) => Node::repeat(item, n)?,
                    Count::Between(bound) => Node::repeat(item, bound)?,
                }
            }
            NodeKind::Range([start, end]) => Node::range(*start, *end),
            NodeKind::CharRange([start, end]) => Node::char_range(*start, *end),
            NodeKind::Alias(alias) => Alias::named(alias.name.as_str())
                .with(all(&alias.children, grammar)?)
                .into(),
            NodeKind::Template(template) => {
                let rule = grammar.rule(&template.name)?;
                Template::new(rule.name(), all(&template.args, grammar)?).into()
            }
            NodeKind::When(when) => Node::bool_variable(
                when.key.as_str(),
                when.default,
                when.then.to_renderable(grammar)?,
                when.otherwise.to_renderable(grammar)?,
            ),
        };
        Ok(node.into())
    }
}

/// Build every expression in order.
pub(crate) fn all(exprs: &[NodeExpr], grammar: &Grammar) -> Result<Vec<Renderable>> {
    exprs.iter().map(|e| e.to_renderable(grammar)).collect()
}
