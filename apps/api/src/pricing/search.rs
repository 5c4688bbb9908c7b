//! Quantity search — coarse-to-fine refinement of a print run toward a
//! target budget.
//!
//! One search covers one quantity band. Each pass scans the current window
//! at the current step, then the window narrows to ±step around the best
//! run seen and the step halves, down to single copies. Within a band the
//! total cost never decreases with quantity, so a pass stops early once the
//! total overshoots the target by more than 20%.

use crate::cache::EstimateCache;
use crate::pricing::cost::{compute_costs_cached, CostBreakdown};
use crate::pricing::rates::QuantityBand;
use crate::pricing::spec::BookSpec;

/// Overshoot factor past which scanning higher quantities cannot improve
/// the fit within a band.
const OVERSHOOT_CUTOFF: f64 = 1.2;

/// Best print run found in one band for one target cost.
#[derive(Debug, Clone)]
pub struct CandidateRun {
    pub copies: u32,
    pub costs: CostBreakdown,
    pub total: f64,
    /// Absolute difference between `total` and the target cost.
    pub cost_diff: f64,
}

/// Searches one quantity band for the run whose total cost lands closest to
/// `target`.
///
/// Returns the best run seen across all refinement passes. Improvement is
/// strict, so a tie keeps the smaller quantity. The search is heuristic,
/// not exhaustive: a closer quantity can exist off the visited grid.
pub fn find_closest_run(
    cache: &EstimateCache,
    spec: BookSpec,
    page_count: u32,
    target: f64,
    band: &QuantityBand,
) -> Option<CandidateRun> {
    let mut best: Option<CandidateRun> = None;
    let mut step = band.initial_step;
    let mut window_min = band.min;
    let mut window_max = band.max;

    while step >= 1 {
        let mut copies = window_min;
        while copies <= window_max {
            let costs = compute_costs_cached(cache, spec, page_count, copies);
            let total = costs.total();
            let cost_diff = (total - target).abs();

            if best.as_ref().map_or(true, |b| cost_diff < b.cost_diff) {
                best = Some(CandidateRun {
                    copies,
                    costs,
                    total,
                    cost_diff,
                });
            }

            // The overshooting run was recorded above before the pass stops;
            // it may still be the closest fit the band has.
            if total > target * OVERSHOOT_CUTOFF {
                break;
            }
            copies += step;
        }

        match &best {
            Some(found) => {
                window_min = found.copies.saturating_sub(step).max(band.min);
                window_max = (found.copies + step).min(band.max);
                step /= 2;
            }
            None => break,
        }
    }

    best
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
