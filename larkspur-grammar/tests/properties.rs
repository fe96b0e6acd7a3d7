//! Property-based tests for node rendering.

use larkspur_core::{Context, unescape_literal};
use larkspur_grammar::{Error, Literal, Node, Render, Renderable, either};
use proptest::prelude::*;

fn render(value: &impl Render) -> String {
    value.render_to_string(&Context::new()).expect("render failed")
}

// Strategy for leaves of mixed kinds
fn leaf_strategy() -> impl Strategy<Value = Renderable> {
    prop_oneof![
        any::<String>().prop_map(Renderable::from),
        "[a-z_]{1,8}".prop_map(|name| Renderable::from(Node::prerendered(name))),
        "[a-z]{1,4}".prop_map(|p| Renderable::from(Node::regexp(p))),
        ("[a-z]{1,4}", "[a-z]{1,4}").prop_map(Renderable::from),
        prop::collection::vec("[a-z]{1,4}", 1..3).prop_map(Renderable::from),
    ]
}

proptest! {
    /// A rendered literal unescapes back to the original text.
    #[test]
    fn literal_round_trips(text in any::<String>()) {
        let rendered = render(&Node::literal(text.clone()));
        prop_assert!(rendered.starts_with('"') && rendered.ends_with('"'));
        let inner = &rendered[1..rendered.len() - 1];
        prop_assert_eq!(unescape_literal(inner), Some(text));
    }

    /// Every quote inside a rendered literal is escaped.
    #[test]
    fn quotes_are_escaped(text in "[a-z\"]{0,16}") {
        let rendered = render(&Literal::new(text));
        let inner = &rendered[1..rendered.len() - 1];
        let mut escaped = false;
        for c in inner.chars() {
            if c == '"' {
                prop_assert!(escaped);
            }
            escaped = !escaped && c == '\\';
        }
    }

    /// Rendered literals stay printable ASCII.
    #[test]
    fn literal_output_is_ascii(text in any::<String>()) {
        let rendered = render(&Renderable::from(text));
        prop_assert!(rendered.chars().all(|c| (' '..='~').contains(&c)));
    }

    /// `either` matches an explicit alternation, in both argument orders.
    #[test]
    fn either_matches_option(a in leaf_strategy(), b in leaf_strategy()) {
        let explicit = render(&Node::option([a.clone(), b.clone()]));
        prop_assert_eq!(render(&either(a.clone(), b.clone())), explicit.clone());
        prop_assert_eq!(render(&(a.clone() | b.clone())), explicit);

        let swapped = render(&Node::option([b.clone(), a.clone()]));
        prop_assert_eq!(render(&either(b, a)), swapped);
    }

    /// A bare string on either side of `|` behaves like the node form.
    #[test]
    fn either_accepts_text_on_both_sides(text in "[a-z]{1,8}", pattern in "[a-z]{1,8}") {
        let node = Node::regexp(pattern);
        prop_assert_eq!(
            render(&(text.as_str() | node.clone())),
            render(&Node::option([Renderable::from(text.as_str()), node.clone().into()]))
        );
        prop_assert_eq!(
            render(&(node.clone() | text.as_str())),
            render(&Node::option([Renderable::from(node), text.as_str().into()]))
        );
    }

    /// Postfix repetition wraps a single token in a group.
    #[test]
    fn repetition_shapes(x in leaf_strategy()) {
        let inner = render(&x);
        prop_assert_eq!(render(&Node::some([x.clone()])), format!("({inner})*"));
        prop_assert_eq!(render(&Node::many([x.clone()])), format!("({inner})+"));
        prop_assert_eq!(render(&Node::maybe([x])), format!("({inner})?"));
    }

    /// Separated repetition is one parenthesized group.
    #[test]
    fn separated_shapes(sep in leaf_strategy(), t in leaf_strategy()) {
        let (s, tt) = (render(&sep), render(&t));
        prop_assert_eq!(
            render(&Node::some_separated(sep.clone(), t.clone())),
            format!("({tt} ({s} {tt})*)")
        );
        prop_assert_eq!(
            render(&Node::many_separated(sep, t)),
            format!("({tt} ({s} {tt})+)")
        );
    }

    /// A zero count never builds a bounded repetition.
    #[test]
    fn zero_bound_is_rejected(x in leaf_strategy()) {
        let rejected = matches!(Node::repeat(x, 0), Err(Error::InvalidBound { .. }));
        prop_assert!(rejected);
    }

    #[test]
    fn positive_bounds_render(x in leaf_strategy(), n in 1i64..100, m in 1i64..100) {
        let inner = render(&x);
        let (lo, hi) = (n.min(m), n.max(m));
        prop_assert_eq!(
            render(&Node::repeat(x.clone(), n).unwrap()),
            format!("({inner}) ~ {n}")
        );
        prop_assert_eq!(
            render(&Node::repeat(x.clone(), (lo, hi)).unwrap()),
            format!("({inner}) ~ {lo}..{hi}")
        );
        prop_assert_eq!(
            render(&Node::repeat(x, [lo, hi]).unwrap()),
            format!("({inner}) ~ {lo}..{hi}")
        );
    }
}
