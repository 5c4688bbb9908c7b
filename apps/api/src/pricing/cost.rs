//! Cost model — pure mapping from (spec, page count, copies) to a cost breakdown.

use serde::Serialize;

use crate::cache::EstimateCache;
use crate::pricing::rates::{price_tier, rate_cards, PostProcessRate, BINDING_RATE_PER_COPY};
use crate::pricing::spec::BookSpec;

/// The three cost components of a print run, in yuan.
///
/// Amounts are unrounded; [`round_to_cents`] is applied at the presentation
/// boundary only, so intermediate search arithmetic keeps full precision.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostBreakdown {
    pub printing: f64,
    pub post_processing: f64,
    pub binding: f64,
}

impl CostBreakdown {
    pub const ZERO: CostBreakdown = CostBreakdown {
        printing: 0.0,
        post_processing: 0.0,
        binding: 0.0,
    };

    pub fn total(&self) -> f64 {
        self.printing + self.post_processing + self.binding
    }

    /// Copy of this breakdown with every component rounded to cents.
    pub fn rounded(&self) -> CostBreakdown {
        CostBreakdown {
            printing: round_to_cents(self.printing),
            post_processing: round_to_cents(self.post_processing),
            binding: round_to_cents(self.binding),
        }
    }
}

/// Computes the cost breakdown for a print run.
///
/// Pure and total: runs below the lowest pricing tier (under 100 copies)
/// price to zero rather than failing. Assumes an even page count ≥ 2,
/// enforced upstream by `pricing::validation`.
pub fn compute_costs(spec: BookSpec, page_count: u32, copies: u32) -> CostBreakdown {
    let Some(tier) = price_tier(copies) else {
        return CostBreakdown::ZERO;
    };
    let card = &rate_cards(spec)[tier];

    let copies = copies as f64;
    let sheets = page_count as f64 / 2.0;

    let post_processing = match card.post_process {
        PostProcessRate::PerCopy { rate, setup_fee } => rate * copies + setup_fee,
        PostProcessRate::PerSignature { rate, base } => {
            (rate * page_count as f64 / 16.0 + base) * copies
        }
    };

    CostBreakdown {
        printing: card.print_rate * sheets * copies,
        post_processing,
        binding: BINDING_RATE_PER_COPY * copies,
    }
}

/// Memoized [`compute_costs`] — consults the cost partition of the cache
/// first and stores the result on a miss.
pub fn compute_costs_cached(
    cache: &EstimateCache,
    spec: BookSpec,
    page_count: u32,
    copies: u32,
) -> CostBreakdown {
    if let Some(costs) = cache.get_costs(spec, page_count, copies) {
        return costs;
    }
    let costs = compute_costs(spec, page_count, copies);
    cache.put_costs(spec, page_count, copies, costs);
    costs
}

/// Rounds a currency amount to cents, half away from zero.
pub fn round_to_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
