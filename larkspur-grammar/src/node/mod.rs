//! The grammar expression tree.
//!
//! Every position in a definition body holds a [`Renderable`]: raw text
//! (rendered as a quoted literal), a group sugar `(...)`, an optional sugar
//! `[...]`, or a [`Node`]. Nodes render themselves to text fragments given
//! a render-time [`Context`].
//!
//! - [`atoms`] - Literals, regular expressions and ranges
//! - [`combinators`] - Grouping, alternation and repetition constructors
//! - [`reference`] - Rule/terminal handles, template instantiation, aliases
//! - [`variable`] - Nodes resolved from the context at render time
//! - [`ops`] - The `|` operator and [`either`]

mod atoms;
mod combinators;
mod ops;
mod reference;
mod variable;

pub use atoms::{Literal, Range, RangeEnd, RegExp};
pub use combinators::{Bound, Repetition};
pub use ops::either;
pub use reference::{Alias, GrammarId, Reference, RuleRef, Template, TerminalRef};
pub use variable::{BoolVariable, Variable};

use larkspur_core::{Context, indent_block, quote_literal};

use crate::{Emitter, Result};

/// Trait for values that render to grammar text.
pub trait Render {
    /// Render into `out`, consulting `ctx` for context-dependent nodes.
    ///
    /// Rendering is a pure function of the tree and the context: calling
    /// it again produces the same fragments.
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()>;

    /// Debug dump of the tree below this value.
    fn describe(&self) -> String;

    /// Render to a fresh list of fragments.
    fn fragments(&self, ctx: &Context) -> Result<Vec<String>> {
        let mut out = Emitter::new();
        self.render(ctx, &mut out)?;
        Ok(out.into_fragments())
    }

    /// Render to a single string.
    fn render_to_string(&self, ctx: &Context) -> Result<String> {
        let mut out = Emitter::new();
        self.render(ctx, &mut out)?;
        Ok(out.build())
    }
}

/// Blanket implementation for references.
impl<T: Render + ?Sized> Render for &T {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        (*self).render(ctx, out)
    }

    fn describe(&self) -> String {
        (*self).describe()
    }
}

/// Blanket implementation for Box.
impl<T: Render + ?Sized> Render for Box<T> {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        self.as_ref().render(ctx, out)
    }

    fn describe(&self) -> String {
        self.as_ref().describe()
    }
}

/// Any value accepted at a child position.
#[derive(Debug, Clone)]
pub enum Renderable {
    /// Raw text, rendered as an escaped, double-quoted literal.
    Text(String),
    /// Parenthesized concatenation, `(a b)`.
    Group(Vec<Renderable>),
    /// Zero-or-one concatenation, `[a b]`.
    Optional(Vec<Renderable>),
    /// Any other node.
    Node(Node),
}

impl Renderable {
    /// Collect the names referenced through handles and template
    /// instantiations. Variables are opaque until render time and skipped.
    pub fn references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Self::Text(_) => {}
            Self::Group(children) | Self::Optional(children) => {
                children.iter().for_each(|c| c.references(out))
            }
            Self::Node(node) => node.references(out),
        }
    }

    /// Split a value into template parameters: group and optional sugar
    /// contribute their children, anything else is a single parameter.
    pub(crate) fn into_params(self) -> Vec<Renderable> {
        match self {
            Self::Group(children)
            | Self::Optional(children)
            | Self::Node(Node::Group(children)) => children,
            other => vec![other],
        }
    }
}

impl Render for Renderable {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        match self {
            Self::Text(text) => {
                out.push(quote_literal(text));
            }
            Self::Group(children) => {
                out.emit_wrapped("(", ")", children, " ", ctx)?;
            }
            Self::Optional(children) => {
                out.emit_wrapped("[", "]", children, " ", ctx)?;
            }
            Self::Node(node) => node.render(ctx, out)?,
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match self {
            Self::Text(text) => quote_literal(text),
            Self::Group(children) => describe_node("Group", children),
            Self::Optional(children) => describe_node("Optional", children),
            Self::Node(node) => node.describe(),
        }
    }
}

/// A node of the grammar expression tree.
#[derive(Debug, Clone)]
pub enum Node {
    Literal(Literal),
    RegExp(RegExp),
    /// Text emitted verbatim.
    Prerendered(String),
    Rule(RuleRef),
    Terminal(TerminalRef),
    Template(Template),
    Group(Vec<Renderable>),
    Optional(Vec<Renderable>),
    /// Alternation, `a | b`, without enclosing parentheses.
    Choice(Vec<Renderable>),
    /// Group followed by a postfix operator, `(a b)*`.
    Repetition(Repetition, Vec<Renderable>),
    /// Bounded repetition, `(a) ~ 1..4`.
    Repeat(Box<Renderable>, Bound),
    Range(Range),
    Alias(Alias),
    Variable(Variable),
    BoolVariable(BoolVariable),
}

impl Node {
    pub(crate) fn references<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            Node::Rule(rule) => out.push(rule.name()),
            Node::Terminal(terminal) => out.push(terminal.name()),
            Node::Template(template) => {
                out.push(template.name());
                template.args().iter().for_each(|a| a.references(out));
            }
            Node::Group(children)
            | Node::Optional(children)
            | Node::Choice(children)
            | Node::Repetition(_, children) => children.iter().for_each(|c| c.references(out)),
            Node::Repeat(content, _) => content.references(out),
            Node::Alias(alias) => alias.children().iter().for_each(|c| c.references(out)),
            Node::BoolVariable(var) => {
                var.if_true().references(out);
                var.if_false().references(out);
            }
            Node::Literal(_)
            | Node::RegExp(_)
            | Node::Prerendered(_)
            | Node::Range(_)
            | Node::Variable(_) => {}
        }
    }
}

impl Render for Node {
    fn render(&self, ctx: &Context, out: &mut Emitter) -> Result<()> {
        match self {
            Node::Literal(literal) => {
                out.push(literal.to_string());
            }
            Node::RegExp(regexp) => {
                out.push(regexp.to_string());
            }
            Node::Prerendered(text) => {
                out.push(text.as_str());
            }
            Node::Rule(rule) => {
                out.push(rule.name());
            }
            Node::Terminal(terminal) => {
                out.push(terminal.name());
            }
            Node::Template(template) => {
                out.push(template.name()).push("{");
                out.emit_separated(template.args(), ", ", ctx)?;
                out.push("}");
            }
            Node::Group(children) => {
                out.emit_wrapped("(", ")", children, " ", ctx)?;
            }
            Node::Optional(children) => {
                out.emit_wrapped("[", "]", children, " ", ctx)?;
            }
            Node::Choice(children) => {
                out.emit_separated(children, " | ", ctx)?;
            }
            Node::Repetition(op, children) => {
                out.emit_wrapped("(", ")", children, " ", ctx)?;
                out.push(op.symbol());
            }
            Node::Repeat(content, bound) => {
                out.emit_wrapped("(", ")", std::slice::from_ref(content.as_ref()), " ", ctx)?;
                out.push(" ~ ").push(bound.to_string());
            }
            Node::Range(range) => {
                out.push(range.to_string());
            }
            Node::Alias(alias) => {
                out.emit_separated(alias.children(), " ", ctx)?;
                out.push(" -> ").push(alias.name());
            }
            Node::Variable(var) => var.resolve(ctx)?.render(ctx, out)?,
            Node::BoolVariable(var) => var.resolve(ctx).render(ctx, out)?,
        }
        Ok(())
    }

    fn describe(&self) -> String {
        match self {
            Node::Literal(literal) => describe_leaf("Literal", &literal.to_string()),
            Node::RegExp(regexp) => describe_leaf("RegExp", &regexp.to_string()),
            Node::Prerendered(text) => describe_leaf("Prerendered", text),
            Node::Rule(rule) => describe_leaf("RuleRef", rule.name()),
            Node::Terminal(terminal) => describe_leaf("TerminalRef", terminal.name()),
            Node::Template(template) => {
                describe_node(&format!("Template:{}", template.name()), template.args())
            }
            Node::Group(children) => describe_node("Group", children),
            Node::Optional(children) => describe_node("Optional", children),
            Node::Choice(children) => describe_node("Option", children),
            Node::Repetition(op, children) => describe_node(op.name(), children),
            Node::Repeat(content, bound) => {
                describe_leaf("Repeat", &format!("{} ~ {}", content.describe(), bound))
            }
            Node::Range(range) => describe_leaf("Range", &range.to_string()),
            Node::Alias(alias) => {
                describe_node(&format!("Alias:{}", alias.name()), alias.children())
            }
            Node::Variable(var) => describe_leaf("Variable", &var.label()),
            Node::BoolVariable(var) => format!(
                "BoolVariable:{}({})",
                var.key(),
                indent_block(&format!(
                    "{}\n{}",
                    var.if_true().describe(),
                    var.if_false().describe()
                ))
            ),
        }
    }
}

/// Leaf values render on their own, the same as their [`Node`] form.
macro_rules! impl_render_leaf {
    ($($ty:ty => $kind:literal, |$value:ident| $text:expr),* $(,)?) => {
        $(
            impl Render for $ty {
                fn render(&self, _ctx: &Context, out: &mut Emitter) -> Result<()> {
                    let $value = self;
                    out.push($text);
                    Ok(())
                }

                fn describe(&self) -> String {
                    let $value = self;
                    describe_leaf($kind, &$text)
                }
            }
        )*
    };
}

impl_render_leaf!(
    Literal => "Literal", |literal| literal.to_string(),
    RegExp => "RegExp", |regexp| regexp.to_string(),
    Range => "Range", |range| range.to_string(),
    RuleRef => "RuleRef", |rule| rule.name().to_string(),
    TerminalRef => "TerminalRef", |terminal| terminal.name().to_string(),
);

pub(crate) fn describe_node(name: &str, children: &[Renderable]) -> String {
    let inner = children
        .iter()
        .map(Render::describe)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{}({})", name, indent_block(&inner))
}

fn describe_leaf(name: &str, text: &str) -> String {
    format!("{}({})", name, indent_block(text))
}

/// Collect anything convertible into a list of renderables.
pub(crate) fn collect<I>(children: I) -> Vec<Renderable>
where
    I: IntoIterator,
    I::Item: Into<Renderable>,
{
    children.into_iter().map(Into::into).collect()
}

impl From<&str> for Renderable {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Renderable {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&String> for Renderable {
    fn from(text: &String) -> Self {
        Self::Text(text.clone())
    }
}

impl From<Node> for Renderable {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}

/// A list is optional sugar, `[a b]`.
impl<T: Into<Renderable>> From<Vec<T>> for Renderable {
    fn from(items: Vec<T>) -> Self {
        Self::Optional(collect(items))
    }
}

macro_rules! impl_node_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Node {
                fn from(value: $ty) -> Self {
                    Node::$variant(value)
                }
            }

            impl From<$ty> for Renderable {
                fn from(value: $ty) -> Self {
                    Renderable::Node(Node::$variant(value))
                }
            }
        )*
    };
}

impl_node_from!(
    Literal => Literal,
    RegExp => RegExp,
    RuleRef => Rule,
    TerminalRef => Terminal,
    Template => Template,
    Range => Range,
    Alias => Alias,
    Variable => Variable,
    BoolVariable => BoolVariable,
);

impl From<Reference> for Node {
    fn from(reference: Reference) -> Self {
        match reference {
            Reference::Rule(rule) => Node::Rule(rule),
            Reference::Terminal(terminal) => Node::Terminal(terminal),
        }
    }
}

impl From<Reference> for Renderable {
    fn from(reference: Reference) -> Self {
        Renderable::Node(reference.into())
    }
}

/// A tuple is group sugar, `(a b)`.
macro_rules! impl_tuple_group {
    ($(($($name:ident),+)),* $(,)?) => {
        $(
            impl<$($name: Into<Renderable>),+> From<($($name,)+)> for Renderable {
                #[allow(non_snake_case)]
                fn from(($($name,)+): ($($name,)+)) -> Self {
                    Renderable::Group(vec![$($name.into()),+])
                }
            }
        )*
    };
}

impl_tuple_group!(
    (A),
    (A, B),
    (A, B, C),
    (A, B, C, D),
    (A, B, C, D, E),
    (A, B, C, D, E, F),
);
