//! Option read cache.
//!
//! Entries expire after a fixed TTL and are dropped whenever the catalog
//! writes to their pair. A zero TTL disables caching.

use parking_lot::RwLock;
use shared_types::{Criterion, Perspective};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::trace;

use crate::domain::EvaluationOption;

/// Default entry lifetime.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

struct CachedOptions {
    options: Vec<EvaluationOption>,
    stored_at: Instant,
}

/// Per-pair state. `generation` moves on every invalidation so a fill that
/// loaded from the store before a write can be recognised and discarded.
#[derive(Default)]
struct Slot {
    generation: u64,
    cached: Option<CachedOptions>,
}

/// Cache statistics
#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: AtomicU64,
    pub misses: AtomicU64,
    pub invalidations: AtomicU64,
    pub stale_fills: AtomicU64,
}

pub struct OptionCache {
    ttl: Duration,
    slots: RwLock<HashMap<(Perspective, Criterion), Slot>>,
    stats: CacheStats,
}

impl OptionCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slots: RwLock::new(HashMap::new()),
            stats: CacheStats::default(),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Cached options for a pair if present and fresh.
    pub fn get(
        &self,
        perspective: Perspective,
        criterion: Criterion,
    ) -> Option<Vec<EvaluationOption>> {
        let slots = self.slots.read();
        let hit = slots
            .get(&(perspective, criterion))
            .and_then(|slot| slot.cached.as_ref())
            .filter(|entry| entry.stored_at.elapsed() < self.ttl)
            .map(|entry| entry.options.clone());

        let counter = if hit.is_some() {
            &self.stats.hits
        } else {
            &self.stats.misses
        };
        counter.fetch_add(1, Ordering::Relaxed);
        hit
    }

    /// Current generation of a pair. Capture it before reading the store and
    /// hand it back to `put`.
    pub fn generation(&self, perspective: Perspective, criterion: Criterion) -> u64 {
        self.slots
            .read()
            .get(&(perspective, criterion))
            .map_or(0, |slot| slot.generation)
    }

    /// Store options loaded at `generation`. Returns false, storing nothing,
    /// when the pair was invalidated since.
    pub fn put(
        &self,
        perspective: Perspective,
        criterion: Criterion,
        generation: u64,
        options: Vec<EvaluationOption>,
    ) -> bool {
        if self.ttl.is_zero() {
            return false;
        }
        let mut slots = self.slots.write();
        let slot = slots.entry((perspective, criterion)).or_default();
        if slot.generation != generation {
            self.stats.stale_fills.fetch_add(1, Ordering::Relaxed);
            trace!(%perspective, %criterion, "Discarded options loaded before a write");
            return false;
        }
        slot.cached = Some(CachedOptions {
            options,
            stored_at: Instant::now(),
        });
        true
    }

    pub fn invalidate(&self, perspective: Perspective, criterion: Criterion) {
        let mut slots = self.slots.write();
        let slot = slots.entry((perspective, criterion)).or_default();
        slot.generation = slot.generation.wrapping_add(1);
        if slot.cached.take().is_some() {
            trace!(%perspective, %criterion, "Invalidated cached options");
        }
        self.stats.invalidations.fetch_add(1, Ordering::Relaxed);
    }

    pub fn clear(&self) {
        for slot in self.slots.write().values_mut() {
            slot.generation = slot.generation.wrapping_add(1);
            slot.cached = None;
        }
    }

    /// Number of stored entries, fresh or not.
    pub fn len(&self) -> usize {
        self.slots
            .read()
            .values()
            .filter(|slot| slot.cached.is_some())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }
}

impl Default for OptionCache {
    fn default() -> Self {
        Self::new(DEFAULT_CACHE_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn option(points: u32) -> EvaluationOption {
        EvaluationOption {
            label: format!("{points}"),
            points,
            order: points,
            is_active: true,
        }
    }

    #[test]
    fn test_hit_then_invalidate() {
        let cache = OptionCache::default();
        assert!(cache.get(Perspective::User, Criterion::Time).is_none());

        assert!(cache.put(Perspective::User, Criterion::Time, 0, vec![option(1)]));
        assert_eq!(
            cache.get(Perspective::User, Criterion::Time),
            Some(vec![option(1)])
        );
        assert!(cache.get(Perspective::Admin, Criterion::Time).is_none());

        cache.invalidate(Perspective::User, Criterion::Time);
        assert!(cache.get(Perspective::User, Criterion::Time).is_none());

        assert_eq!(cache.stats().hits.load(Ordering::Relaxed), 1);
        assert_eq!(cache.stats().misses.load(Ordering::Relaxed), 3);
    }

    #[test]
    fn test_entries_expire() {
        let cache = OptionCache::new(Duration::from_millis(20));
        cache.put(Perspective::Admin, Criterion::Urgency, 0, vec![option(2)]);
        assert!(cache.get(Perspective::Admin, Criterion::Urgency).is_some());

        thread::sleep(Duration::from_millis(40));
        assert!(cache.get(Perspective::Admin, Criterion::Urgency).is_none());
    }

    #[test]
    fn test_zero_ttl_disables_caching() {
        let cache = OptionCache::new(Duration::ZERO);
        assert!(!cache.put(Perspective::User, Criterion::Form, 0, vec![option(3)]));
        assert!(cache.is_empty());
        assert!(cache.get(Perspective::User, Criterion::Form).is_none());
    }

    #[test]
    fn test_fill_loaded_before_invalidate_is_discarded() {
        let cache = OptionCache::default();
        let loaded_at = cache.generation(Perspective::User, Criterion::Impact);

        // A write lands between the store read and the fill.
        cache.invalidate(Perspective::User, Criterion::Impact);
        assert!(!cache.put(Perspective::User, Criterion::Impact, loaded_at, vec![option(4)]));
        assert!(cache.get(Perspective::User, Criterion::Impact).is_none());
        assert_eq!(cache.stats().stale_fills.load(Ordering::Relaxed), 1);

        let current = cache.generation(Perspective::User, Criterion::Impact);
        assert_ne!(current, loaded_at);
        assert!(cache.put(Perspective::User, Criterion::Impact, current, vec![option(2)]));
        assert_eq!(
            cache.get(Perspective::User, Criterion::Impact),
            Some(vec![option(2)])
        );
    }

    #[test]
    fn test_clear_moves_every_generation() {
        let cache = OptionCache::default();
        let before = cache.generation(Perspective::Admin, Criterion::Time);
        cache.put(Perspective::Admin, Criterion::Time, before, vec![option(1)]);

        cache.clear();
        assert!(cache.is_empty());
        assert!(!cache.put(Perspective::Admin, Criterion::Time, before, vec![option(1)]));
    }
}
