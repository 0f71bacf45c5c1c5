//! Configuration schema definitions.
//!
//! A route table file lists named route patterns plus observability settings.
//! All types derive Serde traits for deserialization from TOML.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::routing::RoutePattern;

/// Root configuration: a table of route patterns.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct RouteTableConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// Route definitions, in registration order.
    pub routes: Vec<RouteConfig>,
}

/// A single named route pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Route identifier, unique within the table.
    pub name: String,

    /// Host pattern (e.g. `{tenant}.example.com`).
    #[serde(default)]
    pub host: Option<String>,

    /// Path pattern (e.g. `/user/{id}/{tab?}`).
    pub path: String,

    /// Constraint overrides keyed by variable name.
    #[serde(default, rename = "where")]
    pub constraints: BTreeMap<String, String>,
}

impl RouteConfig {
    /// The compiler input for this route.
    pub fn pattern(&self) -> RoutePattern {
        RoutePattern {
            host: self.host.clone().unwrap_or_default(),
            path: self.path.clone(),
            constraints: self.constraints.clone(),
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_table() {
        let config: RouteTableConfig = toml::from_str(
            r#"
            [observability]
            log_level = "debug"

            [[routes]]
            name = "user"
            host = "{tenant}.example.com"
            path = "/user/{id}"
            [routes.where]
            id = "\\d+"

            [[routes]]
            name = "home"
            path = "/"
            "#,
        )
        .unwrap();

        assert_eq!(config.observability.log_level, "debug");
        assert_eq!(config.routes.len(), 2);

        let user = config.routes[0].pattern();
        assert_eq!(user.host, "{tenant}.example.com");
        assert_eq!(user.constraints.get("id").map(String::as_str), Some("\\d+"));

        let home = config.routes[1].pattern();
        assert!(home.host.is_empty());
        assert!(home.constraints.is_empty());
    }

    #[test]
    fn test_defaults() {
        let config: RouteTableConfig = toml::from_str("").unwrap();
        assert_eq!(config.observability.log_level, "info");
        assert!(config.routes.is_empty());
    }
}
