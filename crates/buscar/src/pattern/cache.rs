//! Bounded cache for compiled patterns.
//!
//! Locator evaluation compiles the same handful of wildcard strings over
//! and over within a test run, and several sessions may share one process.
//! The cache is an explicit object threaded through whoever compiles
//! patterns; there is no ambient global state.

use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex};

use lru::LruCache;
use tracing::trace;

use super::SearchPattern;

/// Thread-safe, LRU-bounded cache of compiled patterns, keyed by the exact
/// wildcard input string.
///
/// At most one compilation happens per distinct input: the lock is held
/// across the build, so concurrent callers either hit the cache or wait
/// for the single in-flight build. Callers never observe a partially
/// built pattern.
#[derive(Debug)]
pub struct PatternCache {
    inner: Mutex<LruCache<String, Arc<SearchPattern>>>,
}

impl PatternCache {
    /// Default capacity: enough for every distinct pattern in a typical
    /// test suite without unbounded growth.
    pub const DEFAULT_CAPACITY: usize = 500;

    /// Create a cache bounded to `capacity` entries (minimum 1).
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).expect("capacity is at least one");
        Self {
            inner: Mutex::new(LruCache::new(capacity)),
        }
    }

    /// Compile `raw`, reusing the cached instance when present.
    #[must_use]
    pub fn compile(&self, raw: &str) -> Arc<SearchPattern> {
        let mut cache = self.inner.lock().expect("pattern cache lock poisoned");
        if let Some(hit) = cache.get(raw) {
            return Arc::clone(hit);
        }
        trace!(pattern = raw, "compiling wildcard pattern");
        let built = Arc::new(SearchPattern::compile(raw));
        cache.put(raw.to_string(), Arc::clone(&built));
        built
    }

    /// Number of currently cached patterns
    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().expect("pattern cache lock poisoned").len()
    }

    /// Whether the cache is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PatternCache {
    fn default() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }
}
