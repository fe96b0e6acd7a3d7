//! TOML grammar manifests for larkspur.
//!
//! A `larkspur.toml` lists terminals, rules, templates and directives whose
//! bodies are [`NodeExpr`] values, plus a default `[context]` table.
//!
//! ```
//! use larkspur_manifest::Manifest;
//!
//! let manifest: Manifest = r#"
//! [[terminals]]
//! name = "NUMBER"
//! body = [{ regexp = "[0-9]+" }]
//!
//! [[rules]]
//! name = "start"
//! body = [{ many = [{ terminal = "NUMBER" }] }]
//! "#
//! .parse()
//! .unwrap();
//!
//! let grammar = manifest.to_grammar().unwrap();
//! assert_eq!(
//!     grammar.generate(&manifest.context).unwrap(),
//!     "NUMBER: /[0-9]+/\n\nstart: (NUMBER)+"
//! );
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod expr;
mod file;
mod manifest;
mod validate;

pub use error::{Error, Result};
pub use expr::{
    AliasExpr, Count, Flagged, NodeExpr, NodeKind, Repeat, Separated, TemplateExpr, When,
};
pub use file::GrammarToml;
pub use manifest::{DefinitionEntry, DirectiveEntry, Manifest, ModifierName, TemplateEntry};
pub use validate::ParseContext;
