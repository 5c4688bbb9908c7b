//! Solution ranking — one candidate per band, ordered and filtered.

use std::cmp::Ordering;

use serde::Serialize;

use crate::cache::EstimateCache;
use crate::pricing::cost::CostBreakdown;
use crate::pricing::rates::SEARCH_BANDS;
use crate::pricing::search::find_closest_run;
use crate::pricing::spec::BookSpec;

/// At most this many suggested print runs come back from a ranking.
pub const MAX_SOLUTIONS: usize = 3;

/// Suggestions whose cost deviates from their own total by more than this
/// fraction are dropped.
pub const RELATIVE_ERROR_CEILING: f64 = 0.10;

/// A suggested print run for an external-printing target budget.
#[derive(Debug, Clone, Serialize)]
pub struct RankedSolution {
    pub copies: u32,
    pub costs: CostBreakdown,
    pub total: f64,
    pub cost_diff: f64,
    /// `cost_diff / total`, the acceptance threshold for suggestions.
    pub relative_error: f64,
    /// The print-run band the suggestion came from, e.g. "1000-5000 copies".
    pub band: String,
}

/// Ranks candidate print runs for a target cost.
///
/// Runs the quantity search once per band, keeps the three candidates
/// closest to the target by absolute difference, then drops any whose
/// relative error exceeds the ceiling. The filter runs after truncation, so
/// fewer than three can come back even when more bands matched. An empty
/// vector means no viable print run, not a failure.
pub fn rank_solutions(
    cache: &EstimateCache,
    spec: BookSpec,
    page_count: u32,
    target: f64,
) -> Vec<RankedSolution> {
    let mut candidates: Vec<_> = SEARCH_BANDS
        .iter()
        .filter_map(|band| {
            find_closest_run(cache, spec, page_count, target, band).map(|run| (band, run))
        })
        .collect();

    candidates.sort_by(|a, b| {
        a.1.cost_diff
            .partial_cmp(&b.1.cost_diff)
            .unwrap_or(Ordering::Equal)
    });
    candidates.truncate(MAX_SOLUTIONS);

    candidates
        .into_iter()
        .filter(|(_, run)| run.cost_diff / run.total <= RELATIVE_ERROR_CEILING)
        .map(|(band, run)| RankedSolution {
            copies: run.copies,
            costs: run.costs,
            total: run.total,
            cost_diff: run.cost_diff,
            relative_error: run.cost_diff / run.total,
            band: format!("{}-{} copies", band.min, band.max),
        })
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{EstimateCache, SystemClock};
    use chrono::Duration;
    use std::sync::Arc;

    fn make_cache() -> EstimateCache {
        EstimateCache::new(Duration::minutes(30), Arc::new(SystemClock))
    }

    #[test]
    fn test_exact_target_ranks_first_with_zero_diff() {
        let cache = make_cache();
        let solutions = rank_solutions(&cache, BookSpec::Paperback16Mono, 200, 1020.0);
        assert!(!solutions.is_empty());
        assert_eq!(solutions[0].copies, 100);
        assert!(solutions[0].cost_diff < 1e-6);
        assert_eq!(solutions[0].band, "100-499 copies");
    }

    #[test]
    fn test_never_more_than_three_solutions() {
        let cache = make_cache();
        for target in [1_000.0, 3_600.0, 6_300.0, 20_000.0] {
            let solutions = rank_solutions(&cache, BookSpec::Paperback16Mono, 200, target);
            assert!(solutions.len() <= MAX_SOLUTIONS);
        }
    }

    #[test]
    fn test_every_solution_within_relative_error_ceiling() {
        let cache = make_cache();
        for spec in BookSpec::ALL {
            for target in [1_500.0, 4_000.0, 12_000.0] {
                for solution in rank_solutions(&cache, spec, 200, target) {
                    assert!(solution.relative_error <= RELATIVE_ERROR_CEILING);
                    assert!(
                        (solution.relative_error - solution.cost_diff / solution.total).abs()
                            < 1e-12
                    );
                }
            }
        }
    }

    #[test]
    fn test_solutions_sorted_by_cost_diff() {
        // 3600.00 is hit exactly by 500 copies of 16pb/200pp and approached
        // closely from inside the 100-499 band, so two bands survive.
        let cache = make_cache();
        let solutions = rank_solutions(&cache, BookSpec::Paperback16Mono, 200, 3_600.0);
        assert!(solutions.len() >= 2);
        assert_eq!(solutions[0].copies, 500);
        assert!(solutions[0].cost_diff < 1e-6);
        for pair in solutions.windows(2) {
            assert!(pair[0].cost_diff <= pair[1].cost_diff);
        }
        assert!(solutions[1].copies >= 100 && solutions[1].copies <= 499);
    }

    #[test]
    fn test_hopeless_target_yields_no_solutions() {
        // Every band's closest run misses a 10-yuan budget by far more than
        // the relative-error ceiling allows.
        let cache = make_cache();
        let solutions = rank_solutions(&cache, BookSpec::Paperback16Mono, 200, 10.0);
        assert!(solutions.is_empty());
    }

    #[test]
    fn test_ranking_is_deterministic_given_shared_cache() {
        let cache = make_cache();
        let first = rank_solutions(&cache, BookSpec::Hardcover16Mono, 320, 5_000.0);
        let second = rank_solutions(&cache, BookSpec::Hardcover16Mono, 320, 5_000.0);
        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(second.iter()) {
            assert_eq!(a.copies, b.copies);
            assert_eq!(a.total, b.total);
        }
    }
}
