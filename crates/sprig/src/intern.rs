//! Content-keyed caches for strings and symbols.
//!
//! When a cache is enabled, the runtime's string/symbol factories consult it
//! before allocating: a hit returns the existing value, a miss allocates,
//! records, and returns. Cached values are not GC roots; when the sweep frees
//! a cached value its entry is evicted, so caches never resurrect dead values.

use ahash::AHashMap;

use crate::heap::ValueId;

type Cache = AHashMap<Box<str>, ValueId>;

#[derive(Debug, Default)]
pub(crate) struct Interns {
    strings: Option<Cache>,
    symbols: Option<Cache>,
}

impl Interns {
    pub fn new(intern_strings: bool, intern_symbols: bool) -> Self {
        Self {
            strings: intern_strings.then(Cache::default),
            symbols: intern_symbols.then(Cache::default),
        }
    }

    pub fn lookup_string(&self, text: &str) -> Option<ValueId> {
        self.strings.as_ref()?.get(text).copied()
    }

    pub fn lookup_symbol(&self, text: &str) -> Option<ValueId> {
        self.symbols.as_ref()?.get(text).copied()
    }

    pub fn record_string(&mut self, text: &str, id: ValueId) {
        if let Some(cache) = self.strings.as_mut() {
            cache.insert(Box::from(text), id);
        }
    }

    pub fn record_symbol(&mut self, text: &str, id: ValueId) {
        if let Some(cache) = self.symbols.as_mut() {
            cache.insert(Box::from(text), id);
        }
    }

    /// Free hook: drops the cache entry for `text`, but only if it still maps
    /// to the value being freed. Uncached duplicates can exist (values created
    /// before the cache was populated with a different id are impossible, but
    /// a swept-and-reallocated slot must not evict a newer entry).
    pub fn forget_string(&mut self, text: &str, id: ValueId) {
        if let Some(cache) = self.strings.as_mut()
            && cache.get(text).copied() == Some(id)
        {
            cache.remove(text);
        }
    }

    pub fn forget_symbol(&mut self, text: &str, id: ValueId) {
        if let Some(cache) = self.symbols.as_mut()
            && cache.get(text).copied() == Some(id)
        {
            cache.remove(text);
        }
    }
}
