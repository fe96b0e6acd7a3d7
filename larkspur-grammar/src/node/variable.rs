//! Nodes resolved from the render-time context.

use std::{fmt, sync::Arc};

use larkspur_core::Context;

use super::{Node, Renderable};
use crate::Result;

type Resolver = Arc<dyn Fn(&Context) -> Result<Renderable> + Send + Sync>;

/// A value computed from the context each time it is rendered.
///
/// The resolver may fail, e.g. with [`Error::MissingContext`](crate::Error),
/// and the failure surfaces from `generate`.
#[derive(Clone)]
pub struct Variable {
    label: Option<String>,
    resolver: Resolver,
}

impl Variable {
    pub fn new<F>(resolver: F) -> Self
    where
        F: Fn(&Context) -> Result<Renderable> + Send + Sync + 'static,
    {
        Self {
            label: None,
            resolver: Arc::new(resolver),
        }
    }

    /// Attach a label shown in debug dumps.
    pub fn labeled(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn label(&self) -> String {
        self.label
            .clone()
            .unwrap_or_else(|| "<resolver>".to_string())
    }

    pub fn resolve(&self, ctx: &Context) -> Result<Renderable> {
        (self.resolver)(ctx)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("label", &self.label())
            .finish_non_exhaustive()
    }
}

/// Picks one of two values depending on a boolean context key.
#[derive(Debug, Clone)]
pub struct BoolVariable {
    key: String,
    default: bool,
    if_true: Box<Renderable>,
    if_false: Box<Renderable>,
}

impl BoolVariable {
    /// `key` is looked up in the context and coerced to a boolean; when it
    /// is absent `default` is used.
    pub fn new(
        key: impl Into<String>,
        default: bool,
        if_true: impl Into<Renderable>,
        if_false: impl Into<Renderable>,
    ) -> Self {
        Self {
            key: key.into(),
            default,
            if_true: Box::new(if_true.into()),
            if_false: Box::new(if_false.into()),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn default_value(&self) -> bool {
        self.default
    }

    pub fn if_true(&self) -> &Renderable {
        &self.if_true
    }

    pub fn if_false(&self) -> &Renderable {
        &self.if_false
    }

    pub fn resolve(&self, ctx: &Context) -> &Renderable {
        if ctx.get_bool(&self.key, self.default) {
            &self.if_true
        } else {
            &self.if_false
        }
    }
}

impl Node {
    /// A node resolved from the context at render time.
    pub fn variable<F>(resolver: F) -> Self
    where
        F: Fn(&Context) -> Result<Renderable> + Send + Sync + 'static,
    {
        Node::Variable(Variable::new(resolver))
    }

    /// A node choosing between two values on a boolean context key.
    pub fn bool_variable(
        key: impl Into<String>,
        default: bool,
        if_true: impl Into<Renderable>,
        if_false: impl Into<Renderable>,
    ) -> Self {
        Node::BoolVariable(BoolVariable::new(key, default, if_true, if_false))
    }
}

#[cfg(test)]
mod tests {
    use larkspur_core::ContextValue;

    use super::*;
    use crate::{Error, Render};

    #[test]
    fn test_variable_reads_context() {
        let node = Node::variable(|ctx| {
            let keyword = ctx
                .get("keyword")
                .and_then(ContextValue::as_str)
                .ok_or_else(|| Error::missing_context("keyword"))?;
            Ok(keyword.into())
        });

        let ctx = Context::new().with("keyword", "let");
        assert_eq!(node.render_to_string(&ctx).unwrap(), r#""let""#);

        let err = node.render_to_string(&Context::new()).unwrap_err();
        assert!(matches!(err, Error::MissingContext { ref key } if key == "keyword"));
    }

    #[test]
    fn test_variable_result_goes_through_dispatch() {
        let node = Node::variable(|_| Ok(("a", vec!["b"]).into()));
        assert_eq!(
            node.render_to_string(&Context::new()).unwrap(),
            r#"("a" ["b"])"#
        );
    }

    #[test]
    fn test_bool_variable() {
        let node = Node::bool_variable("unicode", false, Node::regexp("\\w+"), Node::regexp("[a-z]+"));
        assert_eq!(node.render_to_string(&Context::new()).unwrap(), "/[a-z]+/");
        assert_eq!(
            node.render_to_string(&Context::new().with("unicode", true))
                .unwrap(),
            "/\\w+/"
        );
        assert_eq!(
            node.render_to_string(&Context::new().with("unicode", 0))
                .unwrap(),
            "/[a-z]+/"
        );
    }

    #[test]
    fn test_bool_variable_default() {
        let node = Node::bool_variable("strict", true, "yes", "no");
        assert_eq!(node.render_to_string(&Context::new()).unwrap(), r#""yes""#);
    }

    #[test]
    fn test_variable_debug_label() {
        let var = Variable::new(|_| Ok("x".into())).labeled("keyword from context");
        assert_eq!(var.label(), "keyword from context");
        assert!(format!("{:?}", var).contains("keyword from context"));
    }
}
