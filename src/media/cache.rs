// SPDX-License-Identifier: MPL-2.0
//! LRU cache of decoded originals keyed by path.
//!
//! Stepping back and forth between neighbours, or showing the same file in
//! several panes, reuses the decoded buffer instead of hitting the decoder.
//! Precise-mode resampling is not cached; only the original is.

use crate::config::DEFAULT_IMAGE_CACHE_CAPACITY;
use crate::media::ImageData;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

pub struct DecodedImageCache {
    cache: LruCache<PathBuf, Arc<ImageData>>,
    stats: CacheStats,
}

impl DecodedImageCache {
    /// Creates a cache holding at most `capacity` images (0 is bumped to 1).
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, path: &Path) -> Option<Arc<ImageData>> {
        match self.cache.get(path) {
            Some(image) => {
                self.stats.hits += 1;
                Some(Arc::clone(image))
            }
            None => {
                self.stats.misses += 1;
                None
            }
        }
    }

    pub fn insert(&mut self, path: PathBuf, image: Arc<ImageData>) {
        self.cache.put(path, image);
    }

    #[must_use]
    pub fn contains(&self, path: &Path) -> bool {
        self.cache.contains(path)
    }

    /// Forgets everything; used after a folder refresh since files may have
    /// changed on disk.
    pub fn clear(&mut self) {
        self.cache.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    #[must_use]
    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl Default for DecodedImageCache {
    fn default() -> Self {
        Self::new(DEFAULT_IMAGE_CACHE_CAPACITY)
    }
}

impl std::fmt::Debug for DecodedImageCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DecodedImageCache")
            .field("len", &self.cache.len())
            .field("cap", &self.cache.cap())
            .field("stats", &self.stats)
            .finish()
    }
}
