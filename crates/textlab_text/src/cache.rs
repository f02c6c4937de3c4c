//! Bounded cache of resolved fonts

use crate::font::Font;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Number of (name, size) entries kept
pub const FONT_CACHE_CAPACITY: usize = 10;

/// Resolved fonts keyed by (font name, pixel size)
///
/// Entries are evicted least-recently-used first and never invalidated.
pub struct FontCache {
    entries: LruCache<(String, u32), Arc<Font>>,
}

impl FontCache {
    pub fn new() -> Self {
        Self::with_capacity(FONT_CACHE_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
        }
    }

    pub fn get(&mut self, name: &str, size: u32) -> Option<Arc<Font>> {
        self.entries.get(&(name.to_string(), size)).cloned()
    }

    pub fn insert(&mut self, name: &str, size: u32, font: Arc<Font>) {
        if let Some(((old_name, old_size), _)) = self.entries.push((name.to_string(), size), font) {
            if old_name != name || old_size != size {
                tracing::debug!("Evicted font '{}' at {}px from cache", old_name, old_size);
            }
        }
    }

    pub fn contains(&self, name: &str, size: u32) -> bool {
        self.entries.contains(&(name.to_string(), size))
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

impl Default for FontCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::BuiltinFont;

    fn builtin(size: u32) -> Arc<Font> {
        Arc::new(Font::Builtin(BuiltinFont::new(size)))
    }

    #[test]
    fn test_get_and_insert() {
        let mut cache = FontCache::new();
        assert!(cache.get("Sans", 12).is_none());
        cache.insert("Sans", 12, builtin(12));
        assert!(cache.get("Sans", 12).is_some());
        assert!(cache.get("Sans", 13).is_none());
        assert_eq!(cache.capacity(), FONT_CACHE_CAPACITY);
    }

    #[test]
    fn test_bounded() {
        let mut cache = FontCache::new();
        for size in 0..25 {
            cache.insert("Sans", size, builtin(size));
        }
        assert_eq!(cache.len(), FONT_CACHE_CAPACITY);
        assert!(!cache.contains("Sans", 0));
        assert!(cache.contains("Sans", 24));
    }

    #[test]
    fn test_recently_used_survives() {
        let mut cache = FontCache::with_capacity(2);
        cache.insert("A", 10, builtin(10));
        cache.insert("B", 10, builtin(10));
        cache.get("A", 10);
        cache.insert("C", 10, builtin(10));
        assert!(cache.contains("A", 10));
        assert!(!cache.contains("B", 10));
    }
}
