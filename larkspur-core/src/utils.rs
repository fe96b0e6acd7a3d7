//! Shared string utilities for grammar rendering.

/// Escape a string for use inside a double-quoted grammar literal.
///
/// Printable ASCII passes through, except `\` and `"` which are
/// backslash-escaped. Newline, carriage return and tab use their short
/// forms. Everything else is written as `\xNN`, `\uNNNN` or `\UNNNNNNNN`
/// depending on the code point, with lowercase hex digits.
pub fn escape_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ' '..='~' => out.push(c),
            c => {
                let code = c as u32;
                let escaped = if code <= 0xff {
                    format!("\\x{:02x}", code)
                } else if code <= 0xffff {
                    format!("\\u{:04x}", code)
                } else {
                    format!("\\U{:08x}", code)
                };
                out.push_str(&escaped);
            }
        }
    }
    out
}

/// Escape a string and wrap it in double quotes (e.g., `a"b` -> `"a\"b"`).
pub fn quote_literal(s: &str) -> String {
    format!("\"{}\"", escape_literal(s))
}

/// Reverse [`escape_literal`].
///
/// Returns `None` if the input contains an escape sequence the scheme
/// never produces, or a hex escape that is not a valid code point.
pub fn unescape_literal(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next()? {
            '\\' => '\\',
            '"' => '"',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'x' => read_hex(&mut chars, 2)?,
            'u' => read_hex(&mut chars, 4)?,
            'U' => read_hex(&mut chars, 8)?,
            _ => return None,
        };
        out.push(decoded);
    }
    Some(out)
}

fn read_hex(chars: &mut std::str::Chars<'_>, digits: usize) -> Option<char> {
    let hex: String = chars.by_ref().take(digits).collect();
    if hex.len() != digits {
        return None;
    }
    let code = u32::from_str_radix(&hex, 16).ok()?;
    char::from_u32(code)
}

/// Indent a block of text by four spaces, surrounded by newlines.
///
/// Used by the debug dumps: `Group(` + indent_block(children) + `)`.
/// Empty input stays empty so leaf nodes print as `Name()`.
pub fn indent_block(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }
    format!("{}\n", format!("\n{}", text).replace('\n', "\n    "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_plain_ascii() {
        assert_eq!(escape_literal("hello world"), "hello world");
        assert_eq!(escape_literal(""), "");
    }

    #[test]
    fn test_escape_quotes_and_backslashes() {
        assert_eq!(escape_literal(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape_literal(r"a\b"), r"a\\b");
    }

    #[test]
    fn test_escape_control_characters() {
        assert_eq!(escape_literal("a\nb\tc\r"), r"a\nb\tc\r");
        assert_eq!(escape_literal("\u{0}"), r"\x00");
        assert_eq!(escape_literal("\u{7f}"), r"\x7f");
    }

    #[test]
    fn test_escape_unicode() {
        assert_eq!(escape_literal("é"), r"\xe9");
        assert_eq!(escape_literal("λ"), r"\u03bb");
        assert_eq!(escape_literal("🦀"), r"\U0001f980");
    }

    #[test]
    fn test_quote_literal() {
        assert_eq!(quote_literal("a"), r#""a""#);
        assert_eq!(quote_literal(r#"""#), r#""\"""#);
    }

    #[test]
    fn test_unescape_inverts_escape() {
        for s in ["plain", "q\"uote", "back\\slash", "tab\tnl\n", "λ🦀é\u{1}"] {
            assert_eq!(unescape_literal(&escape_literal(s)).as_deref(), Some(s));
        }
    }

    #[test]
    fn test_unescape_rejects_unknown_escapes() {
        assert_eq!(unescape_literal(r"\q"), None);
        assert_eq!(unescape_literal(r"\x4"), None);
        assert_eq!(unescape_literal("\\"), None);
        assert_eq!(unescape_literal(r"\Uffffffff"), None);
    }

    #[test]
    fn test_indent_block() {
        assert_eq!(indent_block(""), "");
        assert_eq!(indent_block("a"), "\n    a\n");
        assert_eq!(indent_block("a\nb"), "\n    a\n    b\n");
    }
}
