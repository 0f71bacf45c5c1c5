//! Error definitions for pattern compilation and URL generation.

use thiserror::Error;

/// Errors raised while compiling a route pattern.
///
/// All of these are configuration errors: they surface once, when a route is
/// registered, and abort compilation of the whole route (host and path).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    /// Variable name begins with a digit.
    #[error("variable name '{name}' cannot start with a digit in route pattern '{pattern}'")]
    InvalidVariableName { pattern: String, name: String },

    /// Variable name is used more than once in the same pattern.
    #[error("route pattern '{pattern}' cannot reference variable name '{name}' more than once")]
    DuplicateVariableName { pattern: String, name: String },

    /// Variable name exceeds the maximum length.
    #[error("variable name '{name}' cannot be longer than {max} characters in route pattern '{pattern}'")]
    VariableNameTooLong {
        pattern: String,
        name: String,
        max: usize,
    },
}

impl PatternError {
    /// Short label for the error kind, used as a metrics label.
    pub fn kind(&self) -> &'static str {
        match self {
            PatternError::InvalidVariableName { .. } => "invalid_name",
            PatternError::DuplicateVariableName { .. } => "duplicate_name",
            PatternError::VariableNameTooLong { .. } => "name_too_long",
        }
    }

    /// The offending variable name.
    pub fn name(&self) -> &str {
        match self {
            PatternError::InvalidVariableName { name, .. }
            | PatternError::DuplicateVariableName { name, .. }
            | PatternError::VariableNameTooLong { name, .. } => name,
        }
    }
}

/// Errors raised while generating a URL from a compiled route.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A required variable has no value.
    #[error("missing value for required parameter '{name}'")]
    MissingParameter { name: String },

    /// A value does not satisfy the variable's constraint.
    #[error("parameter '{name}' value '{value}' does not match constraint '{constraint}'")]
    InvalidParameter {
        name: String,
        value: String,
        constraint: String,
    },

    /// The constraint itself is not a valid regular expression.
    #[error("constraint '{constraint}' for parameter '{name}' is not a valid regex: {source}")]
    InvalidConstraint {
        name: String,
        constraint: String,
        #[source]
        source: regex::Error,
    },
}

/// Result type for pattern compilation.
pub type PatternResult<T> = Result<T, PatternError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PatternError::DuplicateVariableName {
            pattern: "/user/{id}/post/{id}".into(),
            name: "id".into(),
        };
        assert_eq!(
            err.to_string(),
            "route pattern '/user/{id}/post/{id}' cannot reference variable name 'id' more than once"
        );

        let err = PatternError::VariableNameTooLong {
            pattern: "/{x}".into(),
            name: "x".into(),
            max: 32,
        };
        assert!(err.to_string().contains("32"));
        assert_eq!(err.kind(), "name_too_long");
        assert_eq!(err.name(), "x");
    }

    #[test]
    fn test_generate_error_display() {
        let err = GenerateError::MissingParameter { name: "id".into() };
        assert_eq!(err.to_string(), "missing value for required parameter 'id'");
    }
}
