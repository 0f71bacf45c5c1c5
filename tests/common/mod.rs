//! Shared helpers for integration tests.

use std::collections::HashMap;

use regex::Regex;
use route_compiler::{compile, CompiledRoute, RoutePattern};

/// Compile a path-only pattern, panicking on error.
pub fn compile_path(path: &str) -> CompiledRoute {
    compile(&RoutePattern::new(path)).unwrap_or_else(|e| panic!("{path} failed to compile: {e}"))
}

/// Build a regex from the compiled path regex.
#[allow(dead_code)]
pub fn path_matcher(route: &CompiledRoute) -> Regex {
    Regex::new(&route.path_regex)
        .unwrap_or_else(|e| panic!("{} is not a valid regex: {e}", route.path_regex))
}

/// Match `input` against the route's path regex and return the captured
/// variables. `None` when the input does not match; absent optional groups
/// are left out of the map.
#[allow(dead_code)]
pub fn match_path(route: &CompiledRoute, input: &str) -> Option<HashMap<String, String>> {
    let re = path_matcher(route);
    let caps = re.captures(input)?;
    Some(
        route
            .path_variables
            .iter()
            .filter_map(|name| caps.name(name).map(|m| (name.clone(), m.as_str().to_string())))
            .collect(),
    )
}

#[allow(dead_code)]
pub fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
