//! Route id derivation.
//!
//! A route id is the camel-cased last literal segment of the route path,
//! followed by each parameter name in PascalCase and a `Detail` suffix when
//! the route has parameters:
//!
//! | path                        | id                  |
//! |-----------------------------|---------------------|
//! | `/admin/brands`             | `brands`            |
//! | `/admin/brands/[id]`        | `brandsIdDetail`    |
//! | `/admin/brands/[id]/[idd]`  | `brandsIdIddDetail` |
//! | `/`                         | `home`              |

use super::path_mapper::{is_route_group, param_name};

const HOME_ID: &str = "home";

/// Derive the route id for a route template.
pub fn derive_route_id(route_path: &str) -> String {
    let segments: Vec<&str> = route_path
        .split('/')
        .filter(|s| !s.is_empty() && !is_route_group(s))
        .collect();

    let base = segments
        .iter()
        .rev()
        .filter(|s| param_name(s).is_none())
        .map(|s| camel_case(s))
        .find(|s| !s.is_empty())
        .unwrap_or_else(|| HOME_ID.to_string());

    let params: Vec<String> = segments
        .iter()
        .filter_map(|s| param_name(s))
        .map(pascal_case)
        .filter(|s| !s.is_empty())
        .collect();

    let mut id = base;
    if !params.is_empty() {
        for param in &params {
            id.push_str(param);
        }
        id.push_str("Detail");
    }

    if id.starts_with(|c: char| c.is_ascii_digit()) {
        id.insert(0, '_');
    }
    id
}

/// Whether `name` can be used as a route id in generated TypeScript.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// `user-profile` -> `userProfile`, `Brand_List` -> `brandList`.
pub fn camel_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for (i, word) in words(segment).enumerate() {
        if i == 0 {
            push_with_first(&mut out, word, |c| c.to_ascii_lowercase());
        } else {
            push_with_first(&mut out, word, |c| c.to_ascii_uppercase());
        }
    }
    out
}

/// `brand_id` -> `BrandId`.
pub fn pascal_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    for word in words(segment) {
        push_with_first(&mut out, word, |c| c.to_ascii_uppercase());
    }
    out
}

fn words(segment: &str) -> impl Iterator<Item = &str> {
    segment
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
}

fn push_with_first(out: &mut String, word: &str, first: impl Fn(char) -> char) {
    let mut chars = word.chars();
    if let Some(c) = chars.next() {
        out.push(first(c));
        out.push_str(chars.as_str());
    }
}
