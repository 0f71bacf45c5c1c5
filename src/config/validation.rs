//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Route names must be present and unique
//! - Every route pattern must compile
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Patterns compile through the shared cache, so a validated table never
//!   compiles a route twice

use std::collections::HashSet;
use std::sync::Arc;

use thiserror::Error;

use crate::cache::RouteCache;
use crate::config::schema::RouteTableConfig;
use crate::error::PatternError;
use crate::routing::CompiledRoute;

/// A single semantic problem in a route table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("route #{index} has an empty name")]
    EmptyName { index: usize },

    #[error("duplicate route name '{0}'")]
    DuplicateName(String),

    #[error("route '{route}': {source}")]
    Pattern {
        route: String,
        #[source]
        source: PatternError,
    },
}

/// Check a route table, collecting every problem found.
///
/// On success returns the compiled routes in table order.
pub fn validate_config(
    config: &RouteTableConfig,
    cache: &RouteCache,
) -> Result<Vec<Arc<CompiledRoute>>, Vec<ValidationError>> {
    let mut errors = Vec::new();
    let mut compiled = Vec::with_capacity(config.routes.len());
    let mut names = HashSet::new();

    for (index, route) in config.routes.iter().enumerate() {
        if route.name.trim().is_empty() {
            errors.push(ValidationError::EmptyName { index });
        } else if !names.insert(route.name.as_str()) {
            errors.push(ValidationError::DuplicateName(route.name.clone()));
        }

        match cache.get_or_compile(&route.pattern()) {
            Ok(artifact) => compiled.push(artifact),
            Err(source) => errors.push(ValidationError::Pattern {
                route: route.name.clone(),
                source,
            }),
        }
    }

    if errors.is_empty() {
        Ok(compiled)
    } else {
        Err(errors)
    }
}
