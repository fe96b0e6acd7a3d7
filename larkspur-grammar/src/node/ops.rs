//! Alternation by operator: `a | b` builds the same node as [`either`].

use std::ops::BitOr;

use super::{Alias, Literal, Node, Reference, RegExp, Renderable, RuleRef, Template, TerminalRef};

/// Alternation of two values, equivalent to `Node::option([a, b])`.
pub fn either(a: impl Into<Renderable>, b: impl Into<Renderable>) -> Node {
    Node::Choice(vec![a.into(), b.into()])
}

// Node-like left operand, anything on the right.
macro_rules! impl_bitor_node_lhs {
    ($($ty:ty),*) => {
        $(
            impl<R: Into<Renderable>> BitOr<R> for $ty {
                type Output = Node;

                fn bitor(self, rhs: R) -> Node {
                    either(self, rhs)
                }
            }
        )*
    };
}

impl_bitor_node_lhs!(Node, Renderable, Literal, RegExp, RuleRef, TerminalRef, Reference, Template, Alias);

// Bare text on the left, node-like on the right.
macro_rules! impl_bitor_text_lhs {
    ($($ty:ty),*) => {
        $(
            impl BitOr<$ty> for &str {
                type Output = Node;

                fn bitor(self, rhs: $ty) -> Node {
                    either(self, rhs)
                }
            }

            impl BitOr<$ty> for String {
                type Output = Node;

                fn bitor(self, rhs: $ty) -> Node {
                    either(self, rhs)
                }
            }
        )*
    };
}

impl_bitor_text_lhs!(Node, Renderable, Literal, RegExp, RuleRef, TerminalRef, Reference, Template, Alias);
