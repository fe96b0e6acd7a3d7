//! Identifier case classes for grammar names.
//!
//! Rule names are lowercase identifiers (`expr`, `_item`, `atom2`), terminal
//! names are uppercase identifiers (`NUMBER`, `_WS`). The case of a name
//! decides which namespace of a grammar it can live in.

/// The namespace a name belongs to, decided by its letter case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameClass {
    /// Lowercase identifier.
    Rule,
    /// Uppercase identifier.
    Terminal,
}

/// Classify a name, or `None` if it is neither a rule nor a terminal name.
pub fn name_class(name: &str) -> Option<NameClass> {
    if is_rule_name(name) {
        Some(NameClass::Rule)
    } else if is_terminal_name(name) {
        Some(NameClass::Terminal)
    } else {
        None
    }
}

/// Check if a name is a valid rule name.
pub fn is_rule_name(name: &str) -> bool {
    validate_rule_name(name).is_none()
}

/// Check if a name is a valid terminal name.
pub fn is_terminal_name(name: &str) -> bool {
    validate_terminal_name(name).is_none()
}

/// Validate a rule name.
/// Returns None if valid, Some(reason) if invalid
pub fn validate_rule_name(name: &str) -> Option<&'static str> {
    if let Some(reason) = identifier_problem(name) {
        return Some(reason);
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("rule names cannot contain uppercase letters");
    }
    if !name.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("rule names must contain at least one lowercase letter");
    }
    None
}

/// Validate a terminal name.
/// Returns None if valid, Some(reason) if invalid
pub fn validate_terminal_name(name: &str) -> Option<&'static str> {
    if let Some(reason) = identifier_problem(name) {
        return Some(reason);
    }
    if name.chars().any(|c| c.is_ascii_lowercase()) {
        return Some("terminal names cannot contain lowercase letters");
    }
    if !name.chars().any(|c| c.is_ascii_uppercase()) {
        return Some("terminal names must contain at least one uppercase letter");
    }
    None
}

fn identifier_problem(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    // First character must be a letter or underscore
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        Some(_) => return Some("names must start with a letter or underscore"),
        None => return Some("names cannot be empty"),
    }

    if chars.any(|c| !(c.is_ascii_alphanumeric() || c == '_')) {
        return Some("names must contain only letters, digits and underscores");
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_rule_names() {
        assert!(is_rule_name("expr"));
        assert!(is_rule_name("_inline"));
        assert!(is_rule_name("atom2"));
        assert!(is_rule_name("sum_expr"));
    }

    #[test]
    fn test_invalid_rule_names() {
        assert!(!is_rule_name("Expr"));
        assert!(!is_rule_name("NUMBER"));
        assert!(!is_rule_name("2expr"));
        assert!(!is_rule_name("a-b"));
        assert!(!is_rule_name("__"));
        assert!(!is_rule_name(""));
    }

    #[test]
    fn test_valid_terminal_names() {
        assert!(is_terminal_name("NUMBER"));
        assert!(is_terminal_name("_WS"));
        assert!(is_terminal_name("TERM1"));
    }

    #[test]
    fn test_invalid_terminal_names() {
        assert!(!is_terminal_name("Number"));
        assert!(!is_terminal_name("expr"));
        assert!(!is_terminal_name("1A"));
        assert!(!is_terminal_name("A.B"));
    }

    #[test]
    fn test_name_class() {
        assert_eq!(name_class("rule1"), Some(NameClass::Rule));
        assert_eq!(name_class("TERM1"), Some(NameClass::Terminal));
        assert_eq!(name_class("MixedCase"), None);
        assert_eq!(name_class("_"), None);
    }

    #[test]
    fn test_reasons() {
        assert_eq!(
            validate_rule_name("Rule"),
            Some("rule names cannot contain uppercase letters")
        );
        assert_eq!(
            validate_terminal_name("9X"),
            Some("names must start with a letter or underscore")
        );
        assert_eq!(validate_terminal_name(""), Some("names cannot be empty"));
    }
}
