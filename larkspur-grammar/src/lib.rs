//! Build Lark grammars from typed expression trees.
//!
//! A [`Grammar`] stores named definitions whose bodies are trees of
//! [`Renderable`] values. Rendering a grammar with a [`Context`](larkspur_core::Context)
//! produces the grammar text.
//!
//! # Module Organization
//!
//! - [`node`] - The expression tree and the [`Render`] trait
//! - [`definition`] - Rules, terminals, templates, directives and modifiers
//! - [`Grammar`] - The definition registry
//! - [`GrammarWrapper`] - In-place mutation of registered definitions
//!
//! # Example
//!
//! ```
//! use larkspur_core::Context;
//! use larkspur_grammar::{Grammar, Node};
//!
//! let mut g = Grammar::new();
//! let (pair, value, string) = (g.rule("pair")?, g.rule("value")?, g.terminal("STRING")?);
//! g.define("object", ("{", Node::some_separated(",", pair), "}"))?;
//! g.define("pair", (string, ":", value))?;
//! g.define("STRING", Node::regexp(r#""[^"]*""#))?;
//! g.make_directive("import", "common.WS")?;
//!
//! assert_eq!(
//!     g.generate(&Context::new())?,
//!     "STRING: /\"[^\"]*\"/\n\nobject: \"{\" (pair (\",\" pair)*) \"}\"\npair: STRING \":\" value\n\n%import common.WS"
//! );
//! # Ok::<(), larkspur_grammar::Error>(())
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod definition;
mod emitter;
mod error;
mod grammar;
pub mod node;
mod wrapper;

pub use definition::{
    Body, DEFAULT_PRIORITY, DefOptions, Definition, DefinitionKind, DirectiveContent,
    DirectiveDef, Modifier, ModifierKind, TemplateDef,
};
pub use emitter::Emitter;
pub use error::{Error, Namespace, Result};
pub use grammar::{Grammar, IndexKey};
pub use node::{
    Alias, Bound, BoolVariable, GrammarId, Literal, Node, Range, RangeEnd, Reference, RegExp,
    Render, Renderable, Repetition, RuleRef, Template, TerminalRef, Variable, either,
};
pub use wrapper::{DefinitionRef, Edit, GrammarWrapper};

/// Build a `Vec<Renderable>` from values of mixed types.
///
/// ```
/// use larkspur_core::Context;
/// use larkspur_grammar::{Node, Render, tokens};
///
/// let node = Node::some(tokens!["a", Node::regexp("b+")]);
/// assert_eq!(node.render_to_string(&Context::new()).unwrap(), r#"("a" /b+/)*"#);
/// ```
#[macro_export]
macro_rules! tokens {
    ($($token:expr),* $(,)?) => {
        vec![$($crate::Renderable::from($token)),*]
    };
}
