//! Route pattern compilation subsystem.
//!
//! # Data Flow
//! ```text
//! Route registration (at startup):
//!     RoutePattern { host, path, where }
//!     → compiler.rs (scan, validate, tokenize, assemble regex)
//!     → CompiledRoute (immutable, cacheable)
//!
//! Consumers:
//!     → matching layer (path_regex / host_regex)
//!     → generator.rs (reverse routing from token lists)
//! ```
//!
//! # Design Decisions
//! - Compilation is a pure function: same pattern, same artifact
//! - Tokens are stored left to right
//! - Optional placeholders only count when they trail the path pattern
//! - Host patterns split on `.`, path patterns on `/`

pub mod compiled;
pub mod compiler;
pub mod escape;
pub mod generator;
pub mod pattern;
pub mod table;
pub mod token;

pub use compiled::CompiledRoute;
pub use compiler::{compile, compile_with, VARIABLE_MAXIMUM_LENGTH};
pub use pattern::{Constraints, RoutePattern};
pub use table::{NamedRoute, RouteTable};
pub use token::Token;
