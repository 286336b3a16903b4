//! Reverse-routing memo table
//!
//! Finding the route templates that can produce a handler means scanning
//! every registered route, so the result is memoized per requested handler
//! with LRU eviction.

use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Handler -> candidate routes cache with LRU eviction
///
/// Default capacity: 1000 handlers.
#[derive(Debug)]
pub struct HandlerRouteCache {
    entries: LruCache<String, Arc<[String]>>,
    stats: CacheStats,
}

impl HandlerRouteCache {
    pub const DEFAULT_CAPACITY: usize = 1000;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// A zero capacity is bumped to one
    pub fn with_capacity(capacity: usize) -> Self {
        let cap = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(cap),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, handler: &str) -> Option<Arc<[String]>> {
        if let Some(routes) = self.entries.get(handler) {
            self.stats.hits += 1;
            trace_log!("Route cache hit for handler '{}'", handler);
            Some(Arc::clone(routes))
        } else {
            self.stats.misses += 1;
            trace_log!("Route cache miss for handler '{}'", handler);
            None
        }
    }

    pub fn insert(&mut self, handler: String, routes: Arc<[String]>) {
        trace_log!("Caching {} route(s) for handler '{}'", routes.len(), handler);
        self.entries.push(handler, routes);
    }

    pub fn clear(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        trace_log!("Clearing handler route cache");
        self.entries.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.entries.cap().get()
    }
}

impl Default for HandlerRouteCache {
    fn default() -> Self {
        Self::new()
    }
}
