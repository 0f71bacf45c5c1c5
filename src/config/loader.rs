//! Configuration loading from disk.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::cache::RouteCache;
use crate::config::schema::RouteTableConfig;
use crate::config::validation::ValidationError;
use crate::routing::table::RouteTable;

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Read and deserialize a route table file.
///
/// Only syntax is checked here; semantic validation happens when the table
/// is compiled with [`RouteTable::from_config`].
pub fn load_config(path: &Path) -> Result<RouteTableConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Deserialize a route table from TOML text.
pub fn parse_config(content: &str) -> Result<RouteTableConfig, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// Load, validate and compile a route table file through `cache`.
pub fn load_table(path: &Path, cache: &RouteCache) -> Result<RouteTable, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_table(&content, cache)
}

/// Parse, validate and compile a route table from TOML text.
pub fn parse_table(content: &str, cache: &RouteCache) -> Result<RouteTable, ConfigError> {
    let config = parse_config(content)?;
    RouteTable::from_config(&config, cache).map_err(ConfigError::Validation)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error() {
        let err = parse_config("[[routes]]\nname = ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_validation_error_message() {
        let err = parse_table(
            r#"
            [[routes]]
            name = "dup"
            path = "/a"

            [[routes]]
            name = "dup"
            path = "/b"
            "#,
            &RouteCache::new(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "Validation failed: duplicate route name 'dup'");
    }

    #[test]
    fn test_parse_table_compiles_each_route_once() {
        let cache = RouteCache::new();
        let table = parse_table(
            r#"
            [[routes]]
            name = "a"
            path = "/a/{id}"

            [[routes]]
            name = "b"
            path = "/b/{slug?}"
            "#,
            &cache,
        )
        .unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(cache.len(), 2);
        for route in table.iter() {
            let cached = cache.get_or_compile(&route.pattern).unwrap();
            assert!(std::sync::Arc::ptr_eq(&cached, &route.compiled));
        }
    }

    #[test]
    fn test_missing_file() {
        let err = load_config(Path::new("/nonexistent/routes.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
