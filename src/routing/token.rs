//! Tokens produced by pattern tokenization.

use serde::{Deserialize, Serialize};

/// One unit of a tokenized route pattern.
///
/// Text content is stored unescaped; regex quoting happens only when the
/// pattern regex is assembled.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Token {
    /// Literal text matched verbatim.
    Text { content: String },

    /// A named placeholder.
    Variable {
        /// Separator absorbed from the text immediately before the placeholder.
        separator: Option<char>,
        /// Regex fragment the value must match.
        constraint: String,
        name: String,
    },
}

impl Token {
    pub fn text(content: impl Into<String>) -> Self {
        Token::Text {
            content: content.into(),
        }
    }

    pub fn variable(
        separator: Option<char>,
        constraint: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Token::Variable {
            separator,
            constraint: constraint.into(),
            name: name.into(),
        }
    }

    /// Variable name, if this is a variable token.
    pub fn variable_name(&self) -> Option<&str> {
        match self {
            Token::Variable { name, .. } => Some(name),
            Token::Text { .. } => None,
        }
    }
}
