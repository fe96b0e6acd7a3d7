//! Core utilities and types for the larkspur grammar generator.
//!
//! This crate provides the pieces shared by the grammar builder, the
//! manifest loader and the CLI: literal escaping, identifier case classes
//! and the render-time [`Context`].

mod context;
mod naming;
mod utils;

// Render-time configuration
pub use context::{Context, ContextValue};
// Identifier rules
pub use naming::{
    NameClass, is_rule_name, is_terminal_name, name_class, validate_rule_name,
    validate_terminal_name,
};
// String utilities
pub use utils::{escape_literal, indent_block, quote_literal, unescape_literal};
