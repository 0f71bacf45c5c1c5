//! Route pattern compiler.
//!
//! Turns URI templates such as `/user/{id}/{tab?}` (optionally paired with a
//! host template like `{tenant}.example.com`) into anchored regular
//! expressions plus token lists for inspection and reverse routing.

pub mod cache;
pub mod config;
pub mod error;
pub mod observability;
pub mod routing;

pub use cache::RouteCache;
pub use error::{GenerateError, PatternError};
pub use routing::{compile, compile_with, CompiledRoute, RoutePattern, Token};
