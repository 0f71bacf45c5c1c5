//! Named table of compiled routes.
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Registration order is preserved
//! - Built only from a validated configuration; any invalid route rejects the whole table

use std::sync::Arc;

use crate::cache::RouteCache;
use crate::config::schema::RouteTableConfig;
use crate::config::validation::{validate_config, ValidationError};
use crate::routing::{CompiledRoute, RoutePattern};

/// A compiled route together with its name and source pattern.
#[derive(Debug, Clone)]
pub struct NamedRoute {
    pub name: String,
    pub pattern: RoutePattern,
    pub compiled: Arc<CompiledRoute>,
}

#[derive(Debug, Clone, Default)]
pub struct RouteTable {
    routes: Vec<NamedRoute>,
}

impl RouteTable {
    /// Validate `config` and compile every route through `cache`.
    pub fn from_config(config: &RouteTableConfig, cache: &RouteCache) -> Result<Self, Vec<ValidationError>> {
        let compiled = validate_config(config, cache)?;

        let routes: Vec<_> = config
            .routes
            .iter()
            .zip(compiled)
            .map(|(route, compiled)| NamedRoute {
                name: route.name.clone(),
                pattern: route.pattern(),
                compiled,
            })
            .collect();

        tracing::info!(routes = routes.len(), cached = cache.len(), "Route table compiled");
        Ok(Self { routes })
    }

    pub fn get(&self, name: &str) -> Option<&NamedRoute> {
        self.routes.iter().find(|r| r.name == name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &NamedRoute> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
