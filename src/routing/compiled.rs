//! The compiled route artifact.

use serde::{Deserialize, Serialize};

use crate::routing::token::Token;

/// Immutable matcher artifact produced by [`compile`](crate::routing::compile).
///
/// Token lists are kept in left-to-right pattern order. Use
/// [`reversed_path_tokens`](Self::reversed_path_tokens) for last-first order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledRoute {
    /// Literal leading text of the path pattern.
    pub static_prefix: String,

    /// Anchored path regex.
    pub path_regex: String,

    /// Path tokens, left to right.
    pub path_tokens: Vec<Token>,

    /// Path variable names, in first-seen order.
    pub path_variables: Vec<String>,

    /// Names of the trailing optional path variables, left to right.
    pub optional_variables: Vec<String>,

    /// Anchored host regex; empty when the route has no host pattern.
    pub host_regex: String,

    /// Host tokens, left to right.
    pub host_tokens: Vec<Token>,

    pub host_variables: Vec<String>,

    /// Host variables followed by path variables not already listed.
    pub variables: Vec<String>,
}

impl CompiledRoute {
    pub fn has_host(&self) -> bool {
        !self.host_regex.is_empty()
    }

    /// Path tokens in last-discovered-first order.
    pub fn reversed_path_tokens(&self) -> impl Iterator<Item = &Token> {
        self.path_tokens.iter().rev()
    }

    pub fn is_optional(&self, name: &str) -> bool {
        self.optional_variables.iter().any(|v| v == name)
    }
}
