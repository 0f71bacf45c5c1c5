//! URL generation from compiled routes.
//!
//! Rebuilds host or path text by walking the token list left to right and
//! substituting parameter values for variable tokens.

use std::collections::HashMap;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::GenerateError;
use crate::routing::compiled::CompiledRoute;
use crate::routing::token::Token;

/// Anchored constraint regexes, keyed by constraint source.
static CONSTRAINT_REGEXES: Lazy<DashMap<String, Regex>> = Lazy::new(DashMap::new);

impl CompiledRoute {
    /// Build a path from parameter values.
    ///
    /// A missing (or empty) optional value ends generation there: it and all
    /// later optional segments are omitted. When the pattern starts with the
    /// optional variable, its separator is still emitted since the path regex
    /// requires it.
    pub fn generate_path(&self, params: &HashMap<String, String>) -> Result<String, GenerateError> {
        render(&self.path_tokens, &self.optional_variables, params)
    }

    /// Build a host from parameter values. Returns an empty string for routes
    /// without a host pattern.
    pub fn generate_host(&self, params: &HashMap<String, String>) -> Result<String, GenerateError> {
        render(&self.host_tokens, &[], params)
    }
}

fn render(
    tokens: &[Token],
    optional: &[String],
    params: &HashMap<String, String>,
) -> Result<String, GenerateError> {
    let mut out = String::new();

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::Text { content } => out.push_str(content),
            Token::Variable {
                separator,
                constraint,
                name,
            } => {
                let is_optional = optional.iter().any(|o| o == name);
                let value = match params.get(name).filter(|v| !(is_optional && v.is_empty())) {
                    Some(value) => value,
                    None if is_optional => {
                        if let (0, Some(sep)) = (i, separator) {
                            out.push(*sep);
                        }
                        break;
                    }
                    None => return Err(GenerateError::MissingParameter { name: name.clone() }),
                };
                check_constraint(name, constraint, value)?;
                if let Some(sep) = separator {
                    out.push(*sep);
                }
                out.push_str(value);
            }
        }
    }

    Ok(out)
}

fn constraint_regex(name: &str, constraint: &str) -> Result<Regex, GenerateError> {
    if let Some(re) = CONSTRAINT_REGEXES.get(constraint) {
        return Ok(re.value().clone());
    }

    let re = Regex::new(&format!("^(?:{constraint})$")).map_err(|source| GenerateError::InvalidConstraint {
        name: name.to_owned(),
        constraint: constraint.to_owned(),
        source,
    })?;
    CONSTRAINT_REGEXES.insert(constraint.to_owned(), re.clone());
    Ok(re)
}

fn check_constraint(name: &str, constraint: &str, value: &str) -> Result<(), GenerateError> {
    if constraint_regex(name, constraint)?.is_match(value) {
        Ok(())
    } else {
        Err(GenerateError::InvalidParameter {
            name: name.to_owned(),
            value: value.to_owned(),
            constraint: constraint.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routing::{compile, RoutePattern};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_generate_static() {
        let route = compile(&RoutePattern::new("/about")).unwrap();
        assert_eq!(route.generate_path(&HashMap::new()).unwrap(), "/about");
    }

    #[test]
    fn test_generate_with_separators() {
        let route = compile(&RoutePattern::new("/files/{name}.{ext}")).unwrap();
        let path = route
            .generate_path(&params(&[("name", "report"), ("ext", "pdf")]))
            .unwrap();
        assert_eq!(path, "/files/report.pdf");
    }

    #[test]
    fn test_missing_required() {
        let route = compile(&RoutePattern::new("/user/{id}")).unwrap();
        let err = route.generate_path(&HashMap::new()).unwrap_err();
        assert!(matches!(err, GenerateError::MissingParameter { ref name } if name == "id"));
    }

    #[test]
    fn test_optional_chain_truncates() {
        let route = compile(&RoutePattern::new("/archive/{year?}/{month?}")).unwrap();

        assert_eq!(route.generate_path(&HashMap::new()).unwrap(), "/archive");
        assert_eq!(
            route.generate_path(&params(&[("year", "2024")])).unwrap(),
            "/archive/2024"
        );
        assert_eq!(
            route
                .generate_path(&params(&[("year", "2024"), ("month", "05")]))
                .unwrap(),
            "/archive/2024/05"
        );
        // A later optional value cannot appear without the earlier one.
        assert_eq!(route.generate_path(&params(&[("month", "05")])).unwrap(), "/archive");
        assert_eq!(
            route
                .generate_path(&params(&[("year", ""), ("month", "05")]))
                .unwrap(),
            "/archive"
        );
    }

    #[test]
    fn test_leading_optional_keeps_separator() {
        let route = compile(&RoutePattern::new("/{a?}")).unwrap();
        assert_eq!(route.generate_path(&HashMap::new()).unwrap(), "/");
        assert_eq!(route.generate_path(&params(&[("a", "")])).unwrap(), "/");
        assert_eq!(route.generate_path(&params(&[("a", "x")])).unwrap(), "/x");

        let route = compile(&RoutePattern::new("/{a?}/{b?}")).unwrap();
        assert_eq!(route.generate_path(&HashMap::new()).unwrap(), "/");
        assert_eq!(route.generate_path(&params(&[("b", "y")])).unwrap(), "/");
        assert_eq!(
            route.generate_path(&params(&[("a", "x"), ("b", "y")])).unwrap(),
            "/x/y"
        );
    }

    #[test]
    fn test_constraint_regex_compiled_once() {
        let route = compile(&RoutePattern::new("/q/{n}").with_constraint("n", "[0-9]{3}")).unwrap();
        assert_eq!(route.generate_path(&params(&[("n", "123")])).unwrap(), "/q/123");
        assert!(CONSTRAINT_REGEXES.contains_key("[0-9]{3}"));

        let first = constraint_regex("n", "[0-9]{3}").unwrap();
        let second = constraint_regex("n", "[0-9]{3}").unwrap();
        assert_eq!(first.as_str(), second.as_str());
        assert!(route.generate_path(&params(&[("n", "12")])).is_err());
    }

    #[test]
    fn test_constraint_checked() {
        let route = compile(&RoutePattern::new("/post/{id}").with_constraint("id", "\\d+")).unwrap();
        assert_eq!(route.generate_path(&params(&[("id", "42")])).unwrap(), "/post/42");

        let err = route.generate_path(&params(&[("id", "abc")])).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidParameter { .. }));
    }

    #[test]
    fn test_default_constraint_rejects_separator() {
        let route = compile(&RoutePattern::new("/user/{id}")).unwrap();
        let err = route.generate_path(&params(&[("id", "a/b")])).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidParameter { .. }));
    }

    #[test]
    fn test_invalid_constraint() {
        let route = compile(&RoutePattern::new("/p/{id}").with_constraint("id", "(")).unwrap();
        let err = route.generate_path(&params(&[("id", "1")])).unwrap_err();
        assert!(matches!(err, GenerateError::InvalidConstraint { .. }));
    }

    #[test]
    fn test_generate_host() {
        let route = compile(&RoutePattern::new("/").with_host("{sub}.example.com")).unwrap();
        assert_eq!(
            route.generate_host(&params(&[("sub", "api")])).unwrap(),
            "api.example.com"
        );

        let no_host = compile(&RoutePattern::new("/")).unwrap();
        assert_eq!(no_host.generate_host(&HashMap::new()).unwrap(), "");
    }
}
