//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! compiler / cache / config
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (counters and gauges via the metrics facade)
//! ```

pub mod logging;
pub mod metrics;
