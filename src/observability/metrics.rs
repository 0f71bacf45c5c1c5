//! Compilation metrics.
//!
//! # Metrics
//! - `route_compilations_total` (counter): successfully compiled patterns
//! - `route_compile_errors_total` (counter): rejected patterns by `kind`
//! - `route_cache_hits_total` (counter): cache lookups served without compiling
//! - `route_cache_size` (gauge): compiled routes held by the cache
//!
//! Recording goes through the `metrics` facade; without an installed
//! recorder every call is a no-op.

pub fn record_compilation() {
    ::metrics::counter!("route_compilations_total").increment(1);
}

pub fn record_compile_error(kind: &'static str) {
    ::metrics::counter!("route_compile_errors_total", "kind" => kind).increment(1);
}

pub fn record_cache_hit() {
    ::metrics::counter!("route_cache_hits_total").increment(1);
}

pub fn record_cache_size(size: usize) {
    ::metrics::gauge!("route_cache_size").set(size as f64);
}
