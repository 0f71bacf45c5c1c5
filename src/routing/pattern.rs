//! Route pattern input.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

/// Per-variable constraint overrides.
///
/// Returning `None` lets the compiler derive a constraint from the
/// surrounding separators.
pub trait Constraints {
    fn constraint_for(&self, name: &str) -> Option<&str>;
}

impl Constraints for BTreeMap<String, String> {
    fn constraint_for(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

impl Constraints for HashMap<String, String> {
    fn constraint_for(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// No overrides at all.
impl Constraints for () {
    fn constraint_for(&self, _name: &str) -> Option<&str> {
        None
    }
}

/// A route definition to be compiled.
///
/// Equality and hashing cover host, path and every constraint override, so a
/// pattern can key a cache of compiled routes directly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoutePattern {
    /// Host pattern; empty means no host constraint.
    #[serde(default)]
    pub host: String,

    /// Path pattern, e.g. `/user/{id}/{tab?}`.
    pub path: String,

    /// Constraint overrides keyed by variable name.
    #[serde(default, rename = "where")]
    pub constraints: BTreeMap<String, String>,
}

impl RoutePattern {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    /// Override the constraint for variable `name`.
    pub fn with_constraint(mut self, name: impl Into<String>, constraint: impl Into<String>) -> Self {
        self.constraints.insert(name.into(), constraint.into());
        self
    }
}

impl Constraints for RoutePattern {
    fn constraint_for(&self, name: &str) -> Option<&str> {
        self.constraints.constraint_for(name)
    }
}
