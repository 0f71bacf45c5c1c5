//! Route table file watcher for hot reload.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use arc_swap::ArcSwap;
use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};

use crate::cache::RouteCache;
use crate::config::loader::{load_table, ConfigError};
use crate::routing::table::RouteTable;

/// Shared, atomically replaceable route table.
pub type SharedRouteTable = Arc<ArcSwap<RouteTable>>;

/// Monitors a route table file and swaps in a freshly compiled table on change.
///
/// A reload that fails to load, parse or validate leaves the current table
/// in place.
pub struct RouteTableWatcher {
    path: PathBuf,
    table: SharedRouteTable,
    cache: RouteCache,
}

impl RouteTableWatcher {
    pub fn new(path: &Path, table: SharedRouteTable, cache: RouteCache) -> Self {
        Self {
            path: path.to_path_buf(),
            table,
            cache,
        }
    }

    /// Reload the file immediately. Returns the number of routes now active.
    pub fn reload(&self) -> Result<usize, ConfigError> {
        reload(&self.path, &self.table, &self.cache)
    }

    /// Start watching the file in a background thread.
    ///
    /// Watching stops when the returned watcher is dropped.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let path = self.path.clone();
        let table = self.table.clone();
        let cache = self.cache.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| match res {
                Ok(event) => {
                    if event.kind.is_modify() || event.kind.is_create() {
                        tracing::info!("Route table change detected, reloading...");
                        match reload(&path, &table, &cache) {
                            Ok(count) => tracing::info!(routes = count, "Route table reloaded"),
                            Err(e) => tracing::error!(
                                "Failed to reload route table: {}. Keeping current routes.",
                                e
                            ),
                        }
                    }
                }
                Err(e) => tracing::error!("Watch error: {:?}", e),
            },
            Config::default().with_poll_interval(Duration::from_secs(2)),
        )?;

        watcher.watch(&self.path, RecursiveMode::NonRecursive)?;

        tracing::info!(path = ?self.path, "Route table watcher started");
        Ok(watcher)
    }
}

fn reload(path: &Path, table: &SharedRouteTable, cache: &RouteCache) -> Result<usize, ConfigError> {
    let compiled = load_table(path, cache)?;
    let count = compiled.len();
    table.store(Arc::new(compiled));
    Ok(count)
}
