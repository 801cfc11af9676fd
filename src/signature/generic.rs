//! Primary strategy: `createPage<{ ...params }, { ...searchParams }>(...)`.

use indexmap::IndexMap;
use regex::Regex;

use super::scan::{
    find_matching, find_top_level, merge_continuations, normalize_type_text, parse_key,
    split_top_level,
};
use crate::routes::RouteParamType;

/// Type arguments recovered from a factory call.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct GenericArgs {
    pub params: Option<IndexMap<String, RouteParamType>>,
    pub search_params: Option<IndexMap<String, RouteParamType>>,
}

/// Find the first factory call with a balanced generic argument list.
///
/// `anchor` must match up to and including the opening `<`.
pub fn extract(text: &str, anchor: &Regex) -> Option<GenericArgs> {
    anchor.find_iter(text).find_map(|m| {
        let open = m.end() - 1;
        let close = find_matching(text, open)?;
        let args = split_top_level(&text[open + 1..close], b",", true);

        Some(GenericArgs {
            params: args.first().and_then(|arg| parse_object_type(arg)),
            search_params: args.get(1).and_then(|arg| parse_object_type(arg)),
        })
    })
}

/// Members of an object type literal, `None` unless it is a non-empty `{ ... }`.
pub fn parse_object_type(arg: &str) -> Option<IndexMap<String, RouteParamType>> {
    let arg = arg.trim();
    if !arg.starts_with('{') || find_matching(arg, 0) != Some(arg.len() - 1) {
        return None;
    }

    let body = &arg[1..arg.len() - 1];
    let members = merge_continuations(split_top_level(body, b",;\n", true));

    let mut map = IndexMap::new();
    for member in &members {
        let Some(colon) = find_top_level(member, b':', true) else {
            if let Some(key) = parse_key(member) {
                map.insert(key, RouteParamType::String);
            }
            continue;
        };
        let Some(key) = parse_key(&member[..colon]) else {
            continue;
        };
        let ty = normalize_type_text(&member[colon + 1..]);
        map.insert(key, RouteParamType::from_type_text(&ty));
    }

    (!map.is_empty()).then_some(map)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Regex {
        Regex::new(r"\bcreatePage\s*<").unwrap()
    }

    #[test]
    fn test_params_and_search_params() {
        let text = "export default createPage<{ id: string; tab: number }, { q?: string }>(() => null)";
        let args = extract(text, &anchor()).unwrap();

        let params = args.params.unwrap();
        assert_eq!(params["id"], RouteParamType::String);
        assert_eq!(params["tab"], RouteParamType::Number);
        assert_eq!(args.search_params.unwrap()["q"], RouteParamType::String);
    }

    #[test]
    fn test_union_is_preserved() {
        let text = "createPage<{}, { tab: 'details' | 'settings' }>(config)";
        let args = extract(text, &anchor()).unwrap();

        assert_eq!(args.params, None);
        assert_eq!(
            args.search_params.unwrap()["tab"],
            RouteParamType::Literal("'details' | 'settings'".to_string())
        );
    }

    #[test]
    fn test_multiline_members() {
        let text = r#"createPage<
  { brandId: string },
  {
    view:
      | 'grid'
      | 'list';
    filter?: { status: 'on' | 'off', tags: string[] };
  }
>(Component)"#;
        let args = extract(text, &anchor()).unwrap();

        let search = args.search_params.unwrap();
        assert_eq!(search["view"], RouteParamType::Literal("'grid' | 'list'".to_string()));
        assert_eq!(
            search["filter"],
            RouteParamType::Literal("{ status: 'on' | 'off', tags: string[] }".to_string())
        );
        assert_eq!(search.len(), 2);
    }

    #[test]
    fn test_named_types_and_missing_second_argument() {
        let args = extract("createPage<Params>(c)", &anchor()).unwrap();
        assert_eq!(args, GenericArgs::default());

        assert!(extract("createPage(config)", &anchor()).is_none());
        assert!(extract("createPage<{ id: string }", &anchor()).is_none());
    }
}
