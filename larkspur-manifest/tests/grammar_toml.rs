//! Integration tests for loading grammar manifests from disk.

use larkspur_core::{Context, ContextValue};
use larkspur_manifest::{Error, GrammarToml, Manifest};
use tempfile::TempDir;

const JSON_GRAMMAR: &str = r#"
[context]
strict = false

[[terminals]]
name = "STRING"
body = [{ regexp = '"[^"]*"' }]

[[terminals]]
name = "NUMBER"
body = [{ regexp = '-?\d+(\.\d+)?' }]

[[rules]]
name = "value"
modifier = "inline_single"
body = [{ options = [
    { rule = "object" },
    { rule = "array" },
    { terminal = "STRING" },
    { terminal = "NUMBER" },
    { alias = { name = "true", children = ["true"] } },
    { alias = { name = "false", children = ["false"] } },
    { alias = { name = "null", children = ["null"] } },
] }]

[[rules]]
name = "array"
body = ["[", { optional = [{ template = { name = "_sep", args = [{ rule = "value" }] } }] }, "]"]

[[rules]]
name = "object"
body = ["{", { optional = [{ template = { name = "_sep", args = [{ rule = "pair" }] } }] }, "}"]

[[rules]]
name = "pair"
body = [{ terminal = "STRING" }, ":", { rule = "value" }]

[[templates]]
name = "_sep"
params = [{ rule = "x" }]
body = [{ rule = "x" }, { some = [",", { rule = "x" }] }]

[[directives]]
name = "import"
raw = "common.WS"

[[directives]]
name = "ignore"
node = { terminal = "WS" }
"#;

fn write_manifest(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("larkspur.toml");
    std::fs::write(&path, content).expect("Failed to write manifest");
    path
}

#[test]
fn test_open_and_generate() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(&temp_dir, JSON_GRAMMAR);

    let file = GrammarToml::open(&path).expect("Failed to open manifest");
    assert_eq!(file.path(), path.as_path());
    assert_eq!(file.content(), JSON_GRAMMAR);
    assert_eq!(file.manifest().rules.len(), 4);

    let output = file.generate(Context::new()).unwrap();
    insta::assert_snapshot!(output, @r#"
    STRING: /"[^"]*"/
    NUMBER: /-?\d+(\.\d+)?/

    ?value: object | array | STRING | NUMBER | "true" -> true | "false" -> false | "null" -> null
    array: "[" [_sep{value}] "]"
    object: "{" [_sep{pair}] "}"
    pair: STRING ":" value

    %import common.WS
    %ignore WS

    _sep{x}: x ("," x)*
    "#);

    assert!(file.grammar().unwrap().undefined_references().is_empty());
}

#[test]
fn test_context_layers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(
        &temp_dir,
        r#"
        [context]
        unicode = false
        keyword = "let"

        [[terminals]]
        name = "NAME"
        body = [{ when = { key = "unicode", then = { regexp = '\w+' }, else = { regexp = "[a-z]+" } } }]
        "#,
    );
    let file = GrammarToml::open(&path).unwrap();

    let ctx = file.context(Context::new());
    assert_eq!(ctx.get("keyword"), Some(&ContextValue::from("let")));
    assert_eq!(file.generate(Context::new()).unwrap(), "NAME: /[a-z]+/");

    let overrides = Context::new().with("unicode", true);
    assert_eq!(file.generate(overrides).unwrap(), r"NAME: /\w+/");
}

#[test]
fn test_missing_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let err = GrammarToml::open(temp_dir.path().join("missing.toml")).unwrap_err();
    assert!(matches!(*err, Error::Io { .. }));
}

#[test]
fn test_invalid_definition_in_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = write_manifest(
        &temp_dir,
        "[[rules]]\nname = \"start\"\nbody = [{ repeat = { item = \"a\", count = 0 } }]\n",
    );
    let err = Manifest::from_file(&path).unwrap_err();
    assert!(matches!(
        err.grammar_error(),
        Some(larkspur_grammar::Error::InvalidBound { .. })
    ));
}
