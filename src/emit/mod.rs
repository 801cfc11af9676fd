//! Rendering of collected routes into generated artifacts.

mod json;
mod typescript;

pub use json::JsonEmitter;
pub use typescript::TypeScriptEmitter;

use crate::routes::is_valid_identifier;

/// Single-quoted TypeScript string literal.
pub fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('\'');
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

/// Object key, quoted only when it is not an identifier.
pub fn render_key(key: &str) -> String {
    if is_valid_identifier(key) {
        key.to_string()
    } else {
        quote(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_escapes() {
        assert_eq!(quote("/a/b"), "'/a/b'");
        assert_eq!(quote("it's"), r"'it\'s'");
        assert_eq!(quote(r"a\b"), r"'a\\b'");
    }

    #[test]
    fn test_render_key() {
        assert_eq!(render_key("tab"), "tab");
        assert_eq!(render_key("$ref"), "$ref");
        assert_eq!(render_key("sort-by"), "'sort-by'");
        assert_eq!(render_key("1st"), "'1st'");
    }
}
