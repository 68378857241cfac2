//! Kernel cache implementation
//!
//! Memoises kernel values K(x_i, x_j) for the SMO solver. Kernel matrices are
//! symmetric, so only the (min, max) ordering of each index pair is stored.

use crate::core::Sample;
use crate::kernel::Kernel;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache key for kernel values, normalized so that i <= j
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    i: usize,
    j: usize,
}

impl CacheKey {
    /// Create a normalized cache key where i <= j
    fn new(i: usize, j: usize) -> Self {
        if i <= j {
            Self { i, j }
        } else {
            Self { i: j, j: i }
        }
    }
}

/// LRU-backed kernel matrix over a fixed set of training samples
pub struct KernelCache<'a, K: Kernel> {
    kernel: &'a K,
    samples: &'a [Sample],
    cache: LruCache<CacheKey, f64>,
    hits: u64,
    misses: u64,
}

impl<'a, K: Kernel> KernelCache<'a, K> {
    /// Create a cache holding at most `capacity` kernel values
    pub fn new(kernel: &'a K, samples: &'a [Sample], capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            kernel,
            samples,
            cache: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a cache sized from a memory budget in bytes
    ///
    /// Never allocates more entries than the full n×n triangle needs.
    pub fn with_memory_limit(kernel: &'a K, samples: &'a [Sample], memory_bytes: usize) -> Self {
        let n = samples.len();
        let full_triangle = n * (n + 1) / 2;
        let capacity = (memory_bytes / 16).clamp(1, full_triangle.max(1)); // 16 bytes per entry
        Self::new(kernel, samples, capacity)
    }

    /// K(x_i, x_j), computed on a miss
    pub fn value(&mut self, i: usize, j: usize) -> f64 {
        let key = CacheKey::new(i, j);
        if let Some(&value) = self.cache.get(&key) {
            self.hits += 1;
            return value;
        }

        self.misses += 1;
        let value = self
            .kernel
            .compute(&self.samples[i].features, &self.samples[j].features);
        self.cache.put(key, value);
        value
    }

    /// Number of samples the cache covers
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the cache covers no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Get cache hit rate
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    /// Get cache statistics
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            capacity: self.cache.cap().get(),
            size: self.cache.len(),
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub capacity: usize,
    pub size: usize,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::LinearKernel;

    fn samples() -> Vec<Sample> {
        vec![
            Sample::new(vec![1.0, 0.0], 1.0),
            Sample::new(vec![0.0, 2.0], -1.0),
            Sample::new(vec![3.0, 1.0], 1.0),
            Sample::new(vec![1.0, 1.0], -1.0),
        ]
    }

    #[test]
    fn test_cache_key_normalization() {
        let key1 = CacheKey::new(1, 5);
        let key2 = CacheKey::new(5, 1);
        assert_eq!(key1, key2);
        assert_eq!(key1.i, 1);
        assert_eq!(key1.j, 5);
    }

    #[test]
    fn test_miss_then_symmetric_hit() {
        let kernel = LinearKernel::new();
        let samples = samples();
        let mut cache = KernelCache::new(&kernel, &samples, 8);

        assert_eq!(cache.value(0, 2), 3.0);
        assert_eq!(cache.stats().misses, 1);

        assert_eq!(cache.value(2, 0), 3.0);
        assert_eq!(cache.stats().hits, 1);
        assert_eq!(cache.hit_rate(), 0.5);
    }

    #[test]
    fn test_lru_eviction_recomputes() {
        let kernel = LinearKernel::new();
        let samples = samples();
        let mut cache = KernelCache::new(&kernel, &samples, 2);

        cache.value(0, 1);
        cache.value(1, 2);
        cache.value(2, 3); // Evicts (0,1)
        assert_eq!(cache.stats().size, 2);

        // Value is still correct after eviction, but counts as a miss
        assert_eq!(cache.value(0, 1), 0.0);
        assert_eq!(cache.stats().misses, 4);
    }

    #[test]
    fn test_memory_limit_capped_by_triangle() {
        let kernel = LinearKernel::new();
        let samples = samples();
        let cache = KernelCache::with_memory_limit(&kernel, &samples, 1_000_000);
        assert_eq!(cache.stats().capacity, 10);
        assert_eq!(cache.len(), 4);

        let tiny = KernelCache::with_memory_limit(&kernel, &samples, 0);
        assert_eq!(tiny.stats().capacity, 1);
    }
}
