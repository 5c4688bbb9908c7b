//! Static rate tables for the eight book specifications.
//!
//! Each specification carries three tier rows (100–499, 500–999, 1000+
//! copies). Values are transcribed from the press's published rate sheet;
//! they differ per spec/tier pair and must not be interpolated.

use serde::Serialize;

use crate::pricing::spec::BookSpec;

// ────────────────────────────────────────────────────────────────────────────
// Quantity bands
// ────────────────────────────────────────────────────────────────────────────

/// A contiguous print-run range searched as one unit in external mode.
#[derive(Debug, Clone, Copy)]
pub struct QuantityBand {
    pub min: u32,
    pub max: u32,
    /// Step the quantity search starts from before refinement halves it.
    pub initial_step: u32,
}

/// The three print-run bands offered for external-printing searches.
///
/// Pricing tiers are open-ended at the top ([`price_tier`] treats every run
/// of 1000+ copies the same); the search caps the last band at 5000.
pub const SEARCH_BANDS: [QuantityBand; 3] = [
    QuantityBand {
        min: 100,
        max: 499,
        initial_step: 50,
    },
    QuantityBand {
        min: 500,
        max: 999,
        initial_step: 50,
    },
    QuantityBand {
        min: 1000,
        max: 5000,
        initial_step: 100,
    },
];

/// Shrink-wrap binding, charged flat per copy for every specification.
pub const BINDING_RATE_PER_COPY: f64 = 0.2;

/// Pricing tier index for a copy count: 0 = 100–499, 1 = 500–999, 2 = 1000+.
/// Runs below 100 copies are not priced and have no tier.
pub fn price_tier(copies: u32) -> Option<usize> {
    match copies {
        0..=99 => None,
        100..=499 => Some(0),
        500..=999 => Some(1),
        _ => Some(2),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Rate cards
// ────────────────────────────────────────────────────────────────────────────

/// How post-processing is charged for a (spec, tier) pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "formula", rename_all = "snake_case")]
pub enum PostProcessRate {
    /// Paperback finishing: a per-copy rate plus a one-off setup fee.
    PerCopy { rate: f64, setup_fee: f64 },
    /// Hardcover finishing: a rate per 16-page signature plus a per-copy
    /// base, the whole term multiplied by the copy count.
    PerSignature { rate: f64, base: f64 },
}

/// One row of the rate sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RateCard {
    /// Per-sheet print rate; one sheet holds two pages.
    pub print_rate: f64,
    pub post_process: PostProcessRate,
}

const fn paperback(print_rate: f64, rate: f64, setup_fee: f64) -> RateCard {
    RateCard {
        print_rate,
        post_process: PostProcessRate::PerCopy { rate, setup_fee },
    }
}

const fn hardcover(print_rate: f64, rate: f64, base: f64) -> RateCard {
    RateCard {
        print_rate,
        post_process: PostProcessRate::PerSignature { rate, base },
    }
}

// ────────────────────────────────────────────────────────────────────────────
// The 8 × 3 table  (tier order: 100–499, 500–999, 1000+)
// ────────────────────────────────────────────────────────────────────────────

/// 16-mo paperback, black & white.
static RATES_16PB: [RateCard; 3] = [
    paperback(0.05, 2.0, 300.0),
    paperback(0.046, 1.8, 300.0),
    paperback(0.042, 1.6, 300.0),
];

/// 16-mo paperback, four-color.
static RATES_16PC: [RateCard; 3] = [
    paperback(0.12, 2.0, 300.0),
    paperback(0.1, 1.8, 300.0),
    paperback(0.08, 1.6, 300.0),
];

/// 16-mo hardcover, black & white.
static RATES_16HB: [RateCard; 3] = [
    hardcover(0.05, 0.09, 8.93),
    hardcover(0.046, 0.08, 8.22),
    hardcover(0.042, 0.07, 7.8),
];

/// 16-mo hardcover, four-color.
static RATES_16HC: [RateCard; 3] = [
    hardcover(0.12, 0.09, 8.93),
    hardcover(0.1, 0.08, 8.22),
    hardcover(0.08, 0.07, 7.8),
];

/// 32-mo paperback, black & white.
static RATES_32PB: [RateCard; 3] = [
    paperback(0.042, 1.7, 300.0),
    paperback(0.032, 1.4, 300.0),
    paperback(0.028, 1.2, 300.0),
];

/// 32-mo paperback, four-color.
// TODO: confirm the 1000+ print rate with the press — the sheet lists 0.006,
// an order of magnitude below this spec's lower tiers and the black & white
// rate for the same trim.
static RATES_32PC: [RateCard; 3] = [
    paperback(0.09, 1.7, 300.0),
    paperback(0.066, 1.4, 300.0),
    paperback(0.006, 1.2, 300.0),
];

/// 32-mo hardcover, black & white.
static RATES_32HB: [RateCard; 3] = [
    hardcover(0.042, 0.09, 6.55),
    hardcover(0.032, 0.08, 5.78),
    hardcover(0.028, 0.07, 5.3),
];

/// 32-mo hardcover, four-color. Shares the 0.006 print rate quirk of `32pc`.
static RATES_32HC: [RateCard; 3] = [
    hardcover(0.09, 0.09, 6.55),
    hardcover(0.066, 0.08, 5.78),
    hardcover(0.006, 0.07, 5.3),
];

/// Returns the three tier rows for a specification, indexed by [`price_tier`].
pub fn rate_cards(spec: BookSpec) -> &'static [RateCard; 3] {
    match spec {
        BookSpec::Paperback16Mono => &RATES_16PB,
        BookSpec::Paperback16Color => &RATES_16PC,
        BookSpec::Hardcover16Mono => &RATES_16HB,
        BookSpec::Hardcover16Color => &RATES_16HC,
        BookSpec::Paperback32Mono => &RATES_32PB,
        BookSpec::Paperback32Color => &RATES_32PC,
        BookSpec::Hardcover32Mono => &RATES_32HB,
        BookSpec::Hardcover32Color => &RATES_32HC,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
