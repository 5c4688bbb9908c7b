//! In-memory memoization for cost breakdowns and ranked quotes.
//!
//! One service object owns both cache partitions and the clock that ages
//! them. Entries older than the TTL read as misses; only the periodic
//! sweep physically removes them — reads never evict. The clock is
//! injected so tests can drive expiry without waiting.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::pricing::cost::CostBreakdown;
use crate::pricing::ranker::RankedSolution;
use crate::pricing::spec::BookSpec;

/// Time source for cache aging.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock time, used outside tests.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

type CostKey = (BookSpec, u32, u32);
/// The target cost is keyed in integer cents — it arrives as a validated
/// currency amount, so cents identify it exactly.
type QuoteKey = (BookSpec, u32, i64);

struct Entry<V> {
    value: V,
    stored_at: DateTime<Utc>,
}

#[derive(Default)]
struct Partitions {
    costs: HashMap<CostKey, Entry<CostBreakdown>>,
    quotes: HashMap<QuoteKey, Entry<Vec<RankedSolution>>>,
}

/// Shared cache for cost computations and ranked external quotes.
pub struct EstimateCache {
    ttl: Duration,
    clock: Arc<dyn Clock>,
    inner: Mutex<Partitions>,
}

impl EstimateCache {
    pub fn new(ttl: Duration, clock: Arc<dyn Clock>) -> Self {
        EstimateCache {
            ttl,
            clock,
            inner: Mutex::new(Partitions::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Partitions> {
        // A poisoning panic cannot leave the maps inconsistent: every write
        // is a single insert or retain.
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn fresh<V>(&self, entry: &Entry<V>, now: DateTime<Utc>) -> bool {
        now - entry.stored_at <= self.ttl
    }

    pub fn get_costs(&self, spec: BookSpec, page_count: u32, copies: u32) -> Option<CostBreakdown> {
        let now = self.clock.now();
        let inner = self.lock();
        inner
            .costs
            .get(&(spec, page_count, copies))
            .filter(|entry| self.fresh(entry, now))
            .map(|entry| entry.value)
    }

    /// Stores a cost breakdown, unconditionally replacing any previous entry
    /// under the same key.
    pub fn put_costs(&self, spec: BookSpec, page_count: u32, copies: u32, value: CostBreakdown) {
        let stored_at = self.clock.now();
        self.lock()
            .costs
            .insert((spec, page_count, copies), Entry { value, stored_at });
    }

    pub fn get_quote(
        &self,
        spec: BookSpec,
        page_count: u32,
        target: f64,
    ) -> Option<Vec<RankedSolution>> {
        let now = self.clock.now();
        let inner = self.lock();
        inner
            .quotes
            .get(&quote_key(spec, page_count, target))
            .filter(|entry| self.fresh(entry, now))
            .map(|entry| entry.value.clone())
    }

    pub fn put_quote(
        &self,
        spec: BookSpec,
        page_count: u32,
        target: f64,
        value: Vec<RankedSolution>,
    ) {
        let stored_at = self.clock.now();
        self.lock()
            .quotes
            .insert(quote_key(spec, page_count, target), Entry { value, stored_at });
    }

    /// Removes every entry older than the TTL from both partitions and
    /// returns how many were dropped.
    pub fn sweep(&self) -> usize {
        let now = self.clock.now();
        let mut inner = self.lock();
        let before = inner.costs.len() + inner.quotes.len();
        inner.costs.retain(|_, entry| self.fresh(entry, now));
        inner.quotes.retain(|_, entry| self.fresh(entry, now));
        before - (inner.costs.len() + inner.quotes.len())
    }

    /// Stored entries across both partitions, expired ones included until a
    /// sweep drops them.
    pub fn entry_count(&self) -> usize {
        let inner = self.lock();
        inner.costs.len() + inner.quotes.len()
    }
}

fn quote_key(spec: BookSpec, page_count: u32, target: f64) -> QuoteKey {
    (spec, page_count, (target * 100.0).round() as i64)
}

/// Spawns the periodic sweep task for the lifetime of the process.
///
/// The first interval tick is consumed so the first sweep happens one full
/// interval after startup.
pub fn spawn_sweeper(
    cache: Arc<EstimateCache>,
    every: std::time::Duration,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(every);
        ticker.tick().await;
        loop {
            ticker.tick().await;
            let removed = cache.sweep();
            if removed > 0 {
                debug!(
                    removed,
                    remaining = cache.entry_count(),
                    "cache sweep dropped expired entries"
                );
            }
        }
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::cost::{compute_costs, compute_costs_cached};

    /// Clock the tests advance by hand.
    struct ManualClock(Mutex<DateTime<Utc>>);

    impl ManualClock {
        fn starting_now() -> Arc<ManualClock> {
            Arc::new(ManualClock(Mutex::new(Utc::now())))
        }

        fn advance(&self, by: Duration) {
            let mut now = self.0.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> DateTime<Utc> {
            *self.0.lock().unwrap()
        }
    }

    fn make_cache(clock: Arc<ManualClock>) -> EstimateCache {
        EstimateCache::new(Duration::minutes(30), clock)
    }

    fn sample_costs() -> CostBreakdown {
        compute_costs(BookSpec::Paperback16Mono, 200, 100)
    }

    #[test]
    fn test_hit_before_ttl_miss_after() {
        let clock = ManualClock::starting_now();
        let cache = make_cache(clock.clone());
        cache.put_costs(BookSpec::Paperback16Mono, 200, 100, sample_costs());

        clock.advance(Duration::minutes(29));
        assert!(cache
            .get_costs(BookSpec::Paperback16Mono, 200, 100)
            .is_some());

        clock.advance(Duration::minutes(2));
        assert!(cache
            .get_costs(BookSpec::Paperback16Mono, 200, 100)
            .is_none());
    }

    #[test]
    fn test_reads_never_evict() {
        let clock = ManualClock::starting_now();
        let cache = make_cache(clock.clone());
        cache.put_costs(BookSpec::Paperback16Mono, 200, 100, sample_costs());

        clock.advance(Duration::minutes(31));
        assert!(cache
            .get_costs(BookSpec::Paperback16Mono, 200, 100)
            .is_none());
        // The expired entry is still physically present until a sweep runs.
        assert_eq!(cache.entry_count(), 1);
    }

    #[test]
    fn test_sweep_drops_only_expired_entries() {
        let clock = ManualClock::starting_now();
        let cache = make_cache(clock.clone());
        cache.put_costs(BookSpec::Paperback16Mono, 200, 100, sample_costs());

        clock.advance(Duration::minutes(20));
        cache.put_costs(BookSpec::Paperback16Mono, 200, 500, sample_costs());
        cache.put_quote(BookSpec::Paperback16Mono, 200, 1020.0, vec![]);

        clock.advance(Duration::minutes(15));
        // First entry is 35 minutes old; the later two are 15 minutes old.
        assert_eq!(cache.sweep(), 1);
        assert_eq!(cache.entry_count(), 2);
        assert!(cache
            .get_costs(BookSpec::Paperback16Mono, 200, 500)
            .is_some());
        assert!(cache.get_quote(BookSpec::Paperback16Mono, 200, 1020.0).is_some());
    }

    #[test]
    fn test_sweep_covers_both_partitions() {
        let clock = ManualClock::starting_now();
        let cache = make_cache(clock.clone());
        cache.put_costs(BookSpec::Paperback16Mono, 200, 100, sample_costs());
        cache.put_quote(BookSpec::Paperback16Mono, 200, 1020.0, vec![]);

        clock.advance(Duration::minutes(31));
        assert_eq!(cache.sweep(), 2);
        assert_eq!(cache.entry_count(), 0);
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let clock = ManualClock::starting_now();
        let cache = make_cache(clock.clone());
        let stale = CostBreakdown {
            printing: 1.0,
            post_processing: 1.0,
            binding: 1.0,
        };
        cache.put_costs(BookSpec::Paperback16Mono, 200, 100, stale);
        cache.put_costs(BookSpec::Paperback16Mono, 200, 100, sample_costs());

        assert_eq!(cache.entry_count(), 1);
        assert_eq!(
            cache.get_costs(BookSpec::Paperback16Mono, 200, 100),
            Some(sample_costs())
        );
    }

    #[test]
    fn test_expiry_forces_identical_recomputation() {
        let clock = ManualClock::starting_now();
        let cache = make_cache(clock.clone());

        let first = compute_costs_cached(&cache, BookSpec::Hardcover32Mono, 240, 800);
        clock.advance(Duration::minutes(31));
        cache.sweep();
        let second = compute_costs_cached(&cache, BookSpec::Hardcover32Mono, 240, 800);
        assert_eq!(first, second);
    }

    #[test]
    fn test_quote_keys_distinguish_targets_by_cent() {
        let clock = ManualClock::starting_now();
        let cache = make_cache(clock.clone());
        cache.put_quote(BookSpec::Paperback16Mono, 200, 1020.01, vec![]);

        assert!(cache.get_quote(BookSpec::Paperback16Mono, 200, 1020.01).is_some());
        assert!(cache.get_quote(BookSpec::Paperback16Mono, 200, 1020.02).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_sweeper_task_runs_on_cadence() {
        let clock = ManualClock::starting_now();
        let cache = Arc::new(make_cache(clock.clone()));
        cache.put_costs(BookSpec::Paperback16Mono, 200, 100, sample_costs());

        let handle = spawn_sweeper(cache.clone(), std::time::Duration::from_secs(5 * 60));

        // Entry ages past the TTL; the next 5-minute tick must drop it.
        clock.advance(Duration::minutes(31));
        tokio::time::sleep(std::time::Duration::from_secs(5 * 60 + 1)).await;
        assert_eq!(cache.entry_count(), 0);

        handle.abort();
    }
}
