//! Compiled route caching.

use std::sync::Arc;

use dashmap::DashMap;

use crate::error::PatternResult;
use crate::observability::metrics;
use crate::routing::{compile, CompiledRoute, RoutePattern};

/// A thread-safe cache of compiled routes keyed by pattern.
///
/// Cloning shares the underlying map. Failed compilations are never stored.
#[derive(Debug, Clone, Default)]
pub struct RouteCache {
    inner: Arc<DashMap<RoutePattern, Arc<CompiledRoute>>>,
}

impl RouteCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached artifact for `pattern`, compiling it on first use.
    pub fn get_or_compile(&self, pattern: &RoutePattern) -> PatternResult<Arc<CompiledRoute>> {
        if let Some(hit) = self.inner.get(pattern) {
            metrics::record_cache_hit();
            return Ok(hit.value().clone());
        }

        let compiled = Arc::new(compile(pattern)?);
        // Another thread may have raced us here; keep whichever landed first.
        let stored = self
            .inner
            .entry(pattern.clone())
            .or_insert(compiled)
            .value()
            .clone();
        metrics::record_cache_size(self.inner.len());
        Ok(stored)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
        metrics::record_cache_size(0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_operations() {
        let cache = RouteCache::new();
        let pattern = RoutePattern::new("/user/{id}");

        assert!(cache.is_empty());

        let first = cache.get_or_compile(&pattern).unwrap();
        let second = cache.get_or_compile(&pattern).unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_constraints_are_part_of_key() {
        let cache = RouteCache::new();
        let plain = cache.get_or_compile(&RoutePattern::new("/p/{id}")).unwrap();
        let digits = cache
            .get_or_compile(&RoutePattern::new("/p/{id}").with_constraint("id", "\\d+"))
            .unwrap();

        assert_ne!(plain.path_regex, digits.path_regex);
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_errors_not_cached() {
        let cache = RouteCache::new();
        assert!(cache.get_or_compile(&RoutePattern::new("/{1x}")).is_err());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_shared_between_threads() {
        let cache = RouteCache::new();
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.get_or_compile(&RoutePattern::new("/a/{b}")).unwrap())
            })
            .collect();

        let routes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(routes.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(cache.len(), 1);
    }
}
