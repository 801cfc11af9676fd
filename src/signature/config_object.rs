//! Fallback strategy: a `searchParams: { ... }` field in a config object.
//!
//! ```ts
//! export default createPage({
//!   searchParams: { page: '1', sort: 'name' as 'name' | 'date' },
//! })
//! ```
//!
//! An explicit `as Type` annotation wins over the type of the default value.

use indexmap::IndexMap;
use regex::Regex;
use std::sync::OnceLock;

use super::scan::{
    find_matching, find_top_level, merge_continuations, normalize_type_text, parse_key,
    split_top_level, split_type_assertion,
};
use crate::routes::RouteParamType;

fn anchor() -> &'static Regex {
    static ANCHOR: OnceLock<Regex> = OnceLock::new();
    ANCHOR.get_or_init(|| Regex::new(r"\bsearchParams\s*:\s*\{").expect("static pattern"))
}

/// Search params declared by the first parsable `searchParams` object.
pub fn extract(text: &str) -> Option<IndexMap<String, RouteParamType>> {
    anchor().find_iter(text).find_map(|m| {
        let open = m.end() - 1;
        let close = find_matching(text, open)?;
        let entries = merge_continuations(split_top_level(&text[open + 1..close], b",\n", false));

        let map: IndexMap<String, RouteParamType> = entries
            .iter()
            .filter_map(|entry| parse_entry(entry))
            .collect();

        (!map.is_empty()).then_some(map)
    })
}

fn parse_entry(entry: &str) -> Option<(String, RouteParamType)> {
    let Some(colon) = find_top_level(entry, b':', false) else {
        // Shorthand `{ page }` has no inspectable value.
        return parse_key(entry).map(|key| (key, RouteParamType::String));
    };

    let key = parse_key(&entry[..colon])?;
    let (value, annotation) = split_type_assertion(&entry[colon + 1..]);

    let ty = match annotation.map(normalize_type_text) {
        Some(ty) if ty == "const" => literal_const_type(value),
        Some(ty) => RouteParamType::from_type_text(&ty),
        None => literal_value_type(value),
    };
    Some((key, ty))
}

/// Type of a default value when no annotation is given.
fn literal_value_type(value: &str) -> RouteParamType {
    let value = value.trim();
    if value.parse::<f64>().is_ok() {
        return RouteParamType::Number;
    }
    match value {
        "true" | "false" => RouteParamType::Literal("boolean".to_string()),
        _ => RouteParamType::String,
    }
}

/// `'grid' as const` narrows to the literal itself.
fn literal_const_type(value: &str) -> RouteParamType {
    let value = normalize_type_text(value);
    let is_literal = value.starts_with(['\'', '"'])
        || value.parse::<f64>().is_ok()
        || value == "true"
        || value == "false";

    if is_literal {
        RouteParamType::Literal(value)
    } else {
        literal_value_type(&value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_annotation_wins_over_literal() {
        let text = "createPage({ searchParams: { page: '1', sort: 'name' as 'name' | 'date' } })";
        let map = extract(text).unwrap();

        assert_eq!(map["page"], RouteParamType::String);
        assert_eq!(map["sort"], RouteParamType::Literal("'name' | 'date'".to_string()));
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["page", "sort"]);
    }

    #[test]
    fn test_literal_kinds() {
        let text = r#"const config = {
  searchParams: {
    limit: 20,
    archived: false,
    view: 'grid' as const,
    'sort-by': "name",
    ids: [] as string[],
  },
}"#;
        let map = extract(text).unwrap();

        assert_eq!(map["limit"], RouteParamType::Number);
        assert_eq!(map["archived"], RouteParamType::Literal("boolean".to_string()));
        assert_eq!(map["view"], RouteParamType::Literal("'grid'".to_string()));
        assert_eq!(map["sort-by"], RouteParamType::String);
        assert_eq!(map["ids"], RouteParamType::Literal("string[]".to_string()));
    }

    #[test]
    fn test_multiline_annotation() {
        let text = "searchParams: {\n  sort: 'name' as\n    | 'name'\n    | 'date'\n}";
        let map = extract(text).unwrap();

        assert_eq!(map["sort"], RouteParamType::Literal("'name' | 'date'".to_string()));
    }

    #[test]
    fn test_absent_or_empty() {
        assert!(extract("createPage({ title: 'x' })").is_none());
        assert!(extract("searchParams: {}").is_none());
        assert!(extract("searchParams: { page: '1'").is_none());
    }
}
