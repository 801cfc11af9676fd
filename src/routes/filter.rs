//! Include / exclude filtering of route paths.
//!
//! Pattern syntax:
//! - `re:<regex>` - regular expression searched anywhere in the route path
//! - anything containing `*` or `?` - glob matched against the whole path
//! - everything else - plain substring

use regex::Regex;

/// A pattern that could not be compiled and was left out of the filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternError {
    pub pattern: String,
    pub reason: String,
}

#[derive(Debug, Clone)]
enum RoutePattern {
    Substring(String),
    Glob(glob::Pattern),
    Regex(Regex),
}

impl RoutePattern {
    fn parse(raw: &str) -> Result<Self, PatternError> {
        if let Some(expr) = raw.strip_prefix("re:") {
            return Regex::new(expr)
                .map(RoutePattern::Regex)
                .map_err(|e| PatternError {
                    pattern: raw.to_string(),
                    reason: e.to_string(),
                });
        }

        if raw.contains(['*', '?']) {
            return glob::Pattern::new(raw)
                .map(RoutePattern::Glob)
                .map_err(|e| PatternError {
                    pattern: raw.to_string(),
                    reason: e.to_string(),
                });
        }

        Ok(RoutePattern::Substring(raw.to_string()))
    }

    fn matches(&self, route_path: &str) -> bool {
        match self {
            RoutePattern::Substring(s) => route_path.contains(s.as_str()),
            RoutePattern::Glob(p) => p.matches(route_path),
            RoutePattern::Regex(r) => r.is_match(route_path),
        }
    }
}

/// Compiled include and exclude lists.
#[derive(Debug, Clone, Default)]
pub struct RouteFilter {
    include: Vec<RoutePattern>,
    exclude: Vec<RoutePattern>,
    /// An include list was configured, even if none of it compiled.
    restricted: bool,
}

impl RouteFilter {
    /// Compile both lists, returning the filter and any rejected patterns.
    ///
    /// A rejected include pattern is dropped. When every include pattern is
    /// rejected nothing matches the include list.
    pub fn compile(include: &[String], exclude: &[String]) -> (Self, Vec<PatternError>) {
        let mut errors = Vec::new();
        let mut compile_all = |raw: &[String]| -> Vec<RoutePattern> {
            raw.iter()
                .filter(|p| !p.trim().is_empty())
                .filter_map(|p| match RoutePattern::parse(p.trim()) {
                    Ok(pattern) => Some(pattern),
                    Err(e) => {
                        errors.push(e);
                        None
                    }
                })
                .collect()
        };

        let restricted = include.iter().any(|p| !p.trim().is_empty());
        let include = compile_all(include);
        let exclude = compile_all(exclude);
        (
            Self {
                include,
                exclude,
                restricted,
            },
            errors,
        )
    }

    /// Exclusions are checked first; a non-empty include list must then match.
    pub fn allows(&self, route_path: &str) -> bool {
        if self.exclude.iter().any(|p| p.matches(route_path)) {
            return false;
        }
        !self.restricted || self.include.iter().any(|p| p.matches(route_path))
    }
}
