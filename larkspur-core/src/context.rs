//! Render-time context.
//!
//! A [`Context`] is the read-only mapping consulted by context-dependent
//! grammar nodes while a grammar is generated. Nothing else looks at it.

use std::fmt;

use indexmap::IndexMap;
use serde::Deserialize;

/// A single context value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ContextValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<ContextValue>),
    Table(IndexMap<String, ContextValue>),
}

impl ContextValue {
    /// Truthiness used when a value is coerced to a boolean.
    ///
    /// `false`, zero, the empty string and empty collections are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::Bool(b) => *b,
            Self::Int(i) => *i != 0,
            Self::Float(f) => *f != 0.0,
            Self::Str(s) => !s.is_empty(),
            Self::List(items) => !items.is_empty(),
            Self::Table(table) => !table.is_empty(),
        }
    }

    /// Get the string content, if this is a string value.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Parse a raw command-line value.
    ///
    /// The text is read as a TOML value (`true`, `3`, `"x"`, `[1, 2]`),
    /// falling back to a plain string when it is not valid TOML.
    pub fn parse(raw: &str) -> Self {
        let wrapped = format!("value = {}", raw);
        match toml::from_str::<toml::Table>(&wrapped) {
            Ok(mut table) => table
                .remove("value")
                .map(Self::from)
                .unwrap_or_else(|| Self::Str(raw.to_string())),
            Err(_) => Self::Str(raw.to_string()),
        }
    }
}

/// Written the way it would appear in a TOML document.
impl fmt::Display for ContextValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(x) if x.is_nan() => f.write_str("nan"),
            Self::Float(x) if x.is_infinite() => {
                f.write_str(if x.is_sign_negative() { "-inf" } else { "inf" })
            }
            Self::Float(x) => write!(f, "{:?}", x),
            Self::Str(s) => write!(f, "{:?}", s),
            Self::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
            Self::Table(table) => {
                f.write_str("{ ")?;
                for (i, (key, value)) in table.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} = {}", key, value)?;
                }
                f.write_str(" }")
            }
        }
    }
}

impl From<toml::Value> for ContextValue {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Self::Str(s),
            toml::Value::Integer(i) => Self::Int(i),
            toml::Value::Float(f) => Self::Float(f),
            toml::Value::Boolean(b) => Self::Bool(b),
            toml::Value::Datetime(d) => Self::Str(d.to_string()),
            toml::Value::Array(items) => Self::List(items.into_iter().map(Self::from).collect()),
            toml::Value::Table(table) => Self::Table(
                table
                    .into_iter()
                    .map(|(key, value)| (key, Self::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<bool> for ContextValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for ContextValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for ContextValue {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<f64> for ContextValue {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for ContextValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<String> for ContextValue {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

/// Insertion-ordered mapping from context key to value.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Context {
    values: IndexMap<String, ContextValue>,
}

impl Context {
    /// Create an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a value, returning the updated context.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<ContextValue>) -> Self {
        self.set(key, value);
        self
    }

    /// Set a value, replacing any previous value for the key.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<ContextValue>) {
        self.values.insert(key.into(), value.into());
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&ContextValue> {
        self.values.get(key)
    }

    /// Look up a value coerced to a boolean, or `default` if it is absent.
    pub fn get_bool(&self, key: &str, default: bool) -> bool {
        self.get(key).map_or(default, ContextValue::is_truthy)
    }

    /// Overlay `other` on top of this context; its values win.
    pub fn merge(&mut self, other: Context) {
        self.values.extend(other.values);
    }

    /// Parse a `key=value` assignment as given on the command line.
    ///
    /// Returns `None` if there is no `=` or the key is empty.
    pub fn parse_assignment(assignment: &str) -> Option<(String, ContextValue)> {
        let (key, raw) = assignment.split_once('=')?;
        let key = key.trim();
        if key.is_empty() {
            return None;
        }
        Some((key.to_string(), ContextValue::parse(raw.trim())))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ContextValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truthiness() {
        assert!(ContextValue::Bool(true).is_truthy());
        assert!(!ContextValue::Bool(false).is_truthy());
        assert!(!ContextValue::Int(0).is_truthy());
        assert!(ContextValue::Int(-1).is_truthy());
        assert!(!ContextValue::Float(0.0).is_truthy());
        assert!(!ContextValue::Str(String::new()).is_truthy());
        assert!(ContextValue::Str("no".into()).is_truthy());
        assert!(!ContextValue::List(vec![]).is_truthy());
    }

    #[test]
    fn test_get_bool_default() {
        let ctx = Context::new().with("unicode", true).with("depth", 0);
        assert!(ctx.get_bool("unicode", false));
        assert!(!ctx.get_bool("depth", true));
        assert!(ctx.get_bool("missing", true));
        assert!(!ctx.get_bool("missing", false));
    }

    #[test]
    fn test_parse_value() {
        assert_eq!(ContextValue::parse("true"), ContextValue::Bool(true));
        assert_eq!(ContextValue::parse("42"), ContextValue::Int(42));
        assert_eq!(ContextValue::parse("\"x y\""), ContextValue::Str("x y".into()));
        assert_eq!(ContextValue::parse("plain words"), ContextValue::Str("plain words".into()));
        assert_eq!(
            ContextValue::parse("[1, 2]"),
            ContextValue::List(vec![ContextValue::Int(1), ContextValue::Int(2)])
        );
    }

    #[test]
    fn test_display() {
        assert_eq!(ContextValue::Bool(true).to_string(), "true");
        assert_eq!(ContextValue::Float(1.0).to_string(), "1.0");
        assert_eq!(ContextValue::from("a b").to_string(), r#""a b""#);
        assert_eq!(ContextValue::parse("[1, \"x\"]").to_string(), r#"[1, "x"]"#);
    }

    #[test]
    fn test_display_non_finite_floats() {
        assert_eq!(ContextValue::Float(f64::NAN).to_string(), "nan");
        assert_eq!(ContextValue::Float(f64::INFINITY).to_string(), "inf");
        assert_eq!(ContextValue::Float(f64::NEG_INFINITY).to_string(), "-inf");
        // Written values read back as the same value
        assert_eq!(
            ContextValue::parse(&ContextValue::Float(f64::NEG_INFINITY).to_string()),
            ContextValue::Float(f64::NEG_INFINITY)
        );
    }

    #[test]
    fn test_parse_assignment() {
        assert_eq!(
            Context::parse_assignment("strict=false"),
            Some(("strict".to_string(), ContextValue::Bool(false)))
        );
        assert_eq!(
            Context::parse_assignment(" name = calc"),
            Some(("name".to_string(), ContextValue::Str("calc".into())))
        );
        assert_eq!(Context::parse_assignment("novalue"), None);
        assert_eq!(Context::parse_assignment("=1"), None);
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = Context::new().with("a", 1).with("b", 2);
        base.merge(Context::new().with("b", 3));
        assert_eq!(base.get("a"), Some(&ContextValue::Int(1)));
        assert_eq!(base.get("b"), Some(&ContextValue::Int(3)));
        assert_eq!(base.len(), 2);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let ctx: Context = toml::from_str("strict = true\nname = \"calc\"\nlevels = [1, 2]").unwrap();
        assert!(ctx.get_bool("strict", false));
        assert_eq!(ctx.get("name").and_then(ContextValue::as_str), Some("calc"));
        assert_eq!(ctx.iter().count(), 3);
    }
}
