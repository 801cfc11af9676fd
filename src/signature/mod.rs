//! Lightweight signature extraction from page source text.
//!
//! This is not a TypeScript parser. It recognizes two conventions page
//! authors follow and recovers identifier / type-literal pairs from them by
//! depth-counted scanning:
//!
//! 1. a factory call with two object-type generic arguments,
//!    `createPage<{ id: string }, { tab: 'a' | 'b' }>(...)`;
//! 2. a `searchParams: { ... }` config object, used for search params when
//!    the first form is absent or declares none.
//!
//! Anything that does not fit yields `None` and callers fall back to
//! `string` typed, path-derived parameters. Deeply nested or adversarial
//! type syntax is out of reach by design of the scanner.

mod config_object;
mod generic;
pub mod scan;

use indexmap::IndexMap;
use regex::Regex;

use crate::routes::RouteParamType;

/// Factory name recognized when none is configured.
pub const DEFAULT_FACTORY: &str = "createPage";

/// Best-effort result of scanning one page file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialSignature {
    pub params: Option<IndexMap<String, RouteParamType>>,
    pub search_params: Option<IndexMap<String, RouteParamType>>,
}

impl PartialSignature {
    /// Declared type of a path parameter, `string` when undetermined.
    pub fn param_type(&self, name: &str) -> RouteParamType {
        self.params
            .as_ref()
            .and_then(|p| p.get(name))
            .cloned()
            .unwrap_or_default()
    }
}

/// Extractor configured with the factory names to look for.
#[derive(Debug, Clone)]
pub struct SignatureExtractor {
    factory_anchor: Option<Regex>,
}

impl SignatureExtractor {
    pub fn new(factory_names: &[String]) -> Self {
        let names: Vec<String> = factory_names
            .iter()
            .map(|n| n.trim())
            .filter(|n| !n.is_empty())
            .map(regex::escape)
            .collect();

        let alternation = if names.is_empty() {
            DEFAULT_FACTORY.to_string()
        } else {
            names.join("|")
        };

        let factory_anchor = match Regex::new(&format!(r"\b(?:{alternation})\s*<")) {
            Ok(re) => Some(re),
            Err(e) => {
                tracing::warn!("[signature] invalid factory names {factory_names:?}: {e}");
                None
            }
        };

        Self { factory_anchor }
    }

    /// Scan `text` for declared params and search params.
    pub fn extract(&self, text: &str) -> PartialSignature {
        let text = scan::blank_comments(text);

        let generic = self
            .factory_anchor
            .as_ref()
            .and_then(|anchor| generic::extract(&text, anchor))
            .unwrap_or_default();

        let search_params = match generic.search_params {
            Some(found) => Some(found),
            None => config_object::extract(&text),
        };

        PartialSignature {
            params: generic.params,
            search_params,
        }
    }
}

impl Default for SignatureExtractor {
    fn default() -> Self {
        Self::new(&[DEFAULT_FACTORY.to_string()])
    }
}

/// Extract with the default factory name.
pub fn extract_signature(text: &str) -> PartialSignature {
    SignatureExtractor::default().extract(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_form() {
        let sig = extract_signature(
            "export default createPage<{}, { tab: 'details' | 'settings' }>({ render })",
        );

        assert_eq!(sig.params, None);
        let search = sig.search_params.unwrap();
        assert_eq!(
            search["tab"],
            RouteParamType::Literal("'details' | 'settings'".to_string())
        );
    }

    #[test]
    fn test_fallback_when_generic_has_no_search_params() {
        let text = r#"
export default createPage<{ id: number }>({
  searchParams: { page: '1', sort: 'name' as 'name' | 'date' },
  render: Page,
});
"#;
        let sig = extract_signature(text);

        assert_eq!(sig.param_type("id"), RouteParamType::Number);
        let search = sig.search_params.unwrap();
        assert_eq!(search["page"], RouteParamType::String);
        assert_eq!(search["sort"], RouteParamType::Literal("'name' | 'date'".to_string()));
    }

    #[test]
    fn test_generic_search_params_take_precedence() {
        let text = "createPage<{}, { q: string }>({ searchParams: { other: 1 } })";
        let search = extract_signature(text).search_params.unwrap();

        assert!(search.contains_key("q"));
        assert!(!search.contains_key("other"));
    }

    #[test]
    fn test_no_pattern_yields_empty_signature() {
        let sig = extract_signature("export default function Page() { return <div>Don't</div> }");

        assert_eq!(sig, PartialSignature::default());
        assert_eq!(sig.param_type("id"), RouteParamType::String);
    }

    #[test]
    fn test_commented_out_call_is_ignored() {
        let text = "// createPage<{ id: string }>()\nexport default createPage<{ id: number }>(c)";
        assert_eq!(extract_signature(text).param_type("id"), RouteParamType::Number);

        let text = "/* createPage<{ id: number }>() */";
        assert_eq!(extract_signature(text).params, None);
    }

    #[test]
    fn test_custom_factory_names() {
        let extractor = SignatureExtractor::new(&["definePage".to_string()]);
        let sig = extractor.extract("definePage<{ slug: string }>(c)");

        assert!(sig.params.unwrap().contains_key("slug"));
    }
}
