use std::{path::Path, str::FromStr};

use larkspur_core::Context;
use larkspur_grammar::{
    Body, DEFAULT_PRIORITY, DefOptions, DirectiveContent, Grammar, ModifierKind, Node, Renderable,
};
use serde::Deserialize;

use crate::{Error, NodeExpr, Result, expr::all, validate::ParseContext};

/// Root manifest for larkspur.toml
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub terminals: Vec<DefinitionEntry>,

    #[serde(default)]
    pub rules: Vec<DefinitionEntry>,

    #[serde(default)]
    pub templates: Vec<TemplateEntry>,

    #[serde(default)]
    pub directives: Vec<DirectiveEntry>,

    /// Default render context, overridden by `--set`
    #[serde(default)]
    pub context: Context,
}

/// A `[[rules]]` or `[[terminals]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DefinitionEntry {
    pub name: String,
    pub body: Vec<NodeExpr>,
    #[serde(default)]
    pub modifier: Option<ModifierName>,
    #[serde(default = "default_priority")]
    pub priority: i64,
    #[serde(default)]
    pub replace: bool,
}

/// A `[[templates]]` entry.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateEntry {
    pub name: String,
    pub params: Vec<NodeExpr>,
    pub body: Vec<NodeExpr>,
    #[serde(default)]
    pub modifier: Option<ModifierName>,
    #[serde(default)]
    pub replace: bool,
}

/// A `[[directives]]` entry with either `raw` text or a `node`.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DirectiveEntry {
    pub name: String,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub node: Option<NodeExpr>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierName {
    Inline,
    InlineSingle,
    KeepTerminals,
    Anonymous,
}

impl From<ModifierName> for ModifierKind {
    fn from(name: ModifierName) -> Self {
        match name {
            ModifierName::Inline | ModifierName::Anonymous => ModifierKind::Inline,
            ModifierName::InlineSingle => ModifierKind::InlineSingle,
            ModifierName::KeepTerminals => ModifierKind::KeepTerminals,
        }
    }
}

fn default_priority() -> i64 {
    DEFAULT_PRIORITY
}

impl DefinitionEntry {
    fn options(&self) -> DefOptions {
        let mut options = DefOptions::new().priority(self.priority);
        if let Some(modifier) = self.modifier {
            options = options.modifier(modifier);
        }
        if self.replace {
            options = options.replace();
        }
        options
    }
}

impl FromStr for Manifest {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_str_with_filename(s, "larkspur.toml")
    }
}

impl Manifest {
    /// Parse a larkspur.toml file from the given path
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            Box::new(Error::Io {
                path: path.to_path_buf(),
                source: e,
            })
        })?;
        Self::from_str_with_filename(&content, &path.display().to_string())
    }

    /// Parse a larkspur.toml from a string with a custom filename for error reporting
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        let manifest: Self =
            toml::from_str(content).map_err(|e| Error::parse(e, content, filename))?;
        manifest.build(content, filename)?;
        Ok(manifest)
    }

    /// Build the grammar, labelling failures with their location in `src`.
    pub fn build(&self, src: &str, filename: &str) -> Result<Grammar> {
        let ctx = ParseContext::new(src, filename);
        self.build_with(
            |name, err| ctx.definition_error(name, err),
            |name, message| ctx.validation_error(name, message),
        )
    }

    /// Build the grammar without source locations.
    pub fn to_grammar(&self) -> larkspur_grammar::Result<Grammar> {
        self.build_with(
            |_, err| err,
            |_, message| larkspur_grammar::Error::invalid_operation(message),
        )
    }

    fn build_with<E>(
        &self,
        on_error: impl Fn(&str, larkspur_grammar::Error) -> E,
        on_invalid: impl Fn(&str, String) -> E,
    ) -> std::result::Result<Grammar, E> {
        let mut grammar = Grammar::new();

        for entry in &self.terminals {
            let body = all(&entry.body, &grammar).map_err(|e| on_error(&entry.name, e))?;
            grammar
                .make_terminal(&entry.name, Body::new(body), entry.options())
                .map_err(|e| on_error(&entry.name, e))?;
        }

        for entry in &self.rules {
            let body = all(&entry.body, &grammar).map_err(|e| on_error(&entry.name, e))?;
            grammar
                .make_rule(&entry.name, Body::new(body), entry.options())
                .map_err(|e| on_error(&entry.name, e))?;
        }

        for entry in &self.templates {
            let build = |grammar: &mut Grammar| -> larkspur_grammar::Result<()> {
                let params = all(&entry.params, grammar)?;
                let body = all(&entry.body, grammar)?;
                let mut options = DefOptions::new();
                if let Some(modifier) = entry.modifier {
                    options = options.modifier(modifier);
                }
                if entry.replace {
                    options = options.replace();
                }
                grammar.make_template(
                    &entry.name,
                    Renderable::Group(params),
                    Body::new(body),
                    options,
                )?;
                Ok(())
            };
            build(&mut grammar).map_err(|e| on_error(&entry.name, e))?;
        }

        for entry in &self.directives {
            let content = match (&entry.raw, &entry.node) {
                (Some(raw), None) => DirectiveContent::Raw(raw.clone()),
                (None, Some(node)) => {
                    let node = node
                        .to_renderable(&grammar)
                        .map_err(|e| on_error(&entry.name, e))?;
                    DirectiveContent::Node(match node {
                        Renderable::Node(node) => node,
                        Renderable::Text(text) => Node::literal(text),
                        Renderable::Group(children) => Node::Group(children),
                        Renderable::Optional(children) => Node::Optional(children),
                    })
                }
                _ => {
                    return Err(on_invalid(
                        &entry.name,
                        format!(
                            "directive '{}' needs exactly one of `raw` or `node`",
                            entry.name
                        ),
                    ));
                }
            };
            grammar
                .make_directive(&entry.name, content)
                .map_err(|e| on_error(&entry.name, e))?;
        }

        Ok(grammar)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generate(src: &str) -> String {
        let manifest: Manifest = src.parse().expect("manifest failed to parse");
        manifest
            .to_grammar()
            .unwrap()
            .generate(&manifest.context)
            .unwrap()
    }

    #[test]
    fn test_empty_manifest() {
        let manifest: Manifest = "".parse().unwrap();
        assert!(manifest.to_grammar().unwrap().is_empty());
        assert!(manifest.context.is_empty());
    }

    #[test]
    fn test_reference_grammar() {
        let output = generate(
            r#"
            [[rules]]
            name = "rule1"
            body = ["a"]

            [[rules]]
            name = "modified"
            body = ["e"]
            modifier = "inline_single"

            [[terminals]]
            name = "TERM1"
            body = ["b"]

            [[directives]]
            name = "f"
            raw = "g"

            [[directives]]
            name = "h"
            node = { literal = "i" }

            [[templates]]
            name = "template1"
            params = [{ rule = "c" }]
            body = ["d"]
            "#,
        );
        insta::assert_snapshot!(output, @r#"
        TERM1: "b"

        rule1: "a"
        ?modified: "e"

        %f g
        %h "i"

        template1{c}: "d"
        "#);
    }

    #[test]
    fn test_context_table_drives_variables() {
        let output = generate(
            r#"
            [context]
            unicode = true

            [[terminals]]
            name = "NAME"
            body = [{ when = { key = "unicode", then = { regexp = "\\w+" }, else = { regexp = "[a-z]+" } } }]
            priority = 2
            "#,
        );
        assert_eq!(output, r"NAME.2: /\w+/");
    }

    #[test]
    fn test_modifier_names() {
        let output = generate(
            r#"
            [[rules]]
            name = "a"
            body = ["x"]
            modifier = "keep_terminals"

            [[rules]]
            name = "b"
            body = ["y"]
            modifier = "inline"

            [[terminals]]
            name = "WS"
            body = [" "]
            modifier = "anonymous"
            "#,
        );
        assert_eq!(output, "_WS: \" \"\n\n!a: \"x\"\n_b: \"y\"");
    }

    #[test]
    fn test_duplicate_definition_points_at_name() {
        let src = r#"
[[rules]]
name = "start"
body = ["a"]

[[rules]]
name = "start"
body = ["b"]
"#;
        let err = Manifest::from_str(src).unwrap_err();
        assert!(matches!(
            err.grammar_error(),
            Some(larkspur_grammar::Error::DuplicateName { .. })
        ));
        match *err {
            Error::Definition { span: Some(span), ref name, .. } => {
                assert_eq!(name, "start");
                assert_eq!(&src[span.offset()..span.offset() + span.len()], "start");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_replace_flag() {
        let output = generate(
            r#"
            [[rules]]
            name = "start"
            body = ["a"]

            [[rules]]
            name = "start"
            body = ["b"]
            replace = true
            "#,
        );
        assert_eq!(output, r#"start: "b""#);
    }

    #[test]
    fn test_invalid_names() {
        let err = Manifest::from_str("[[rules]]\nname = \"Start\"\nbody = []\n").unwrap_err();
        assert!(matches!(
            err.grammar_error(),
            Some(larkspur_grammar::Error::InvalidName { .. })
        ));

        let err = Manifest::from_str("[[terminals]]\nname = \"ws\"\nbody = []\n").unwrap_err();
        assert!(matches!(
            err.grammar_error(),
            Some(larkspur_grammar::Error::InvalidName { .. })
        ));
    }

    #[test]
    fn test_directive_needs_one_content() {
        let err = Manifest::from_str("[[directives]]\nname = \"ignore\"\n").unwrap_err();
        assert!(matches!(*err, Error::Validation { .. }));
    }

    #[test]
    fn test_parse_error() {
        let err = Manifest::from_str("[[rules]\nname = ").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));

        let err = Manifest::from_str("[grammar]\nname = \"x\"\n").unwrap_err();
        assert!(matches!(*err, Error::Parse { .. }));
    }
}
