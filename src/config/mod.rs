//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! route table file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → RouteTableConfig
//!     → validation.rs (semantic checks, compiles each route once via RouteCache)
//!     → RouteTable (compiled, shared via ArcSwap)
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs load_table with the startup cache
//!     → atomic swap of the shared RouteTable
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All sections have defaults to allow minimal files
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, load_table, parse_config, parse_table, ConfigError};
pub use schema::{ObservabilityConfig, RouteConfig, RouteTableConfig};
pub use validation::ValidationError;
