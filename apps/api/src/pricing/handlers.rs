//! Axum route handlers for the Quote API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::AppError;
use crate::pricing::cost::{compute_costs_cached, round_to_cents, CostBreakdown};
use crate::pricing::ranker::{rank_solutions, RankedSolution};
use crate::pricing::rates::{price_tier, rate_cards, PostProcessRate, BINDING_RATE_PER_COPY};
use crate::pricing::spec::{Binding, BookSpec, ColorMode, TrimSize};
use crate::pricing::validation::validate_quote_input;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct InternalQuoteRequest {
    /// Published specification code, e.g. "16pb".
    pub spec: String,
    pub page_count: u32,
    pub copies: u32,
}

/// The rate-sheet row a quote was priced from, echoed back so the caller
/// can display the arithmetic.
#[derive(Debug, Serialize)]
pub struct AppliedRates {
    pub print_rate: f64,
    pub post_process: PostProcessRate,
    pub binding_rate: f64,
}

#[derive(Debug, Serialize)]
pub struct InternalQuoteResponse {
    pub spec: BookSpec,
    pub display_name: &'static str,
    pub page_count: u32,
    pub copies: u32,
    pub costs: CostBreakdown,
    pub total: f64,
    pub rates: AppliedRates,
    pub warnings: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct ExternalQuoteRequest {
    /// Published specification code, e.g. "16pb".
    pub spec: String,
    pub page_count: u32,
    pub target_cost: f64,
}

#[derive(Debug, Serialize)]
pub struct ExternalQuoteResponse {
    pub spec: BookSpec,
    pub display_name: &'static str,
    pub page_count: u32,
    pub target_cost: f64,
    /// Up to three suggested print runs, closest fit first.
    pub solutions: Vec<RankedSolution>,
    /// Set when no print run lands within the acceptance threshold.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub warnings: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SpecSummary {
    pub code: &'static str,
    pub display_name: &'static str,
    pub trim: TrimSize,
    pub binding: Binding,
    pub color: ColorMode,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/specs
///
/// The specifications the press quotes, for populating a caller's picker.
pub async fn handle_list_specs() -> Json<Vec<SpecSummary>> {
    let specs = BookSpec::ALL
        .iter()
        .map(|spec| SpecSummary {
            code: spec.code(),
            display_name: spec.display_name(),
            trim: spec.trim(),
            binding: spec.binding(),
            color: spec.color(),
        })
        .collect();
    Json(specs)
}

/// POST /api/v1/quotes/internal
///
/// Prices a fixed print run for an in-house job.
pub async fn handle_internal_quote(
    State(state): State<AppState>,
    Json(request): Json<InternalQuoteRequest>,
) -> Result<Json<InternalQuoteResponse>, AppError> {
    let report = validate_quote_input(request.page_count, Some(request.copies), None);
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors.join("; ")));
    }
    let spec = parse_spec(&request.spec)?;

    let tier = price_tier(request.copies)
        .ok_or_else(|| AppError::Validation("copy count must be at least 100".to_string()))?;
    let card = &rate_cards(spec)[tier];

    let costs = compute_costs_cached(&state.cache, spec, request.page_count, request.copies);
    let rounded = costs.rounded();

    Ok(Json(InternalQuoteResponse {
        spec,
        display_name: spec.display_name(),
        page_count: request.page_count,
        copies: request.copies,
        total: round_to_cents(rounded.total()),
        costs: rounded,
        rates: AppliedRates {
            print_rate: card.print_rate,
            post_process: card.post_process,
            binding_rate: BINDING_RATE_PER_COPY,
        },
        warnings: report.warnings,
    }))
}

/// POST /api/v1/quotes/external
///
/// Suggests print runs whose total cost approximates a target budget.
/// Ranked results are cached per (spec, page count, target) until the TTL
/// lapses.
pub async fn handle_external_quote(
    State(state): State<AppState>,
    Json(request): Json<ExternalQuoteRequest>,
) -> Result<Json<ExternalQuoteResponse>, AppError> {
    let report = validate_quote_input(request.page_count, None, Some(request.target_cost));
    if !report.is_valid() {
        return Err(AppError::Validation(report.errors.join("; ")));
    }
    let spec = parse_spec(&request.spec)?;

    let solutions = match state
        .cache
        .get_quote(spec, request.page_count, request.target_cost)
    {
        Some(cached) => {
            debug!(
                spec = spec.code(),
                page_count = request.page_count,
                "external quote served from cache"
            );
            cached
        }
        None => {
            let ranked =
                rank_solutions(&state.cache, spec, request.page_count, request.target_cost);
            state
                .cache
                .put_quote(spec, request.page_count, request.target_cost, ranked.clone());
            ranked
        }
    };

    let message = solutions.is_empty().then(|| {
        "no print run lands close enough to the target cost; adjust the budget and try again"
            .to_string()
    });

    Ok(Json(ExternalQuoteResponse {
        spec,
        display_name: spec.display_name(),
        page_count: request.page_count,
        target_cost: request.target_cost,
        solutions: solutions.into_iter().map(round_solution).collect(),
        message,
        warnings: report.warnings,
    }))
}

fn parse_spec(code: &str) -> Result<BookSpec, AppError> {
    BookSpec::from_code(code).ok_or_else(|| AppError::UnknownSpecification(code.to_string()))
}

/// Rounds a cached (full-precision) solution to cents for display.
fn round_solution(solution: RankedSolution) -> RankedSolution {
    RankedSolution {
        copies: solution.copies,
        costs: solution.costs.rounded(),
        total: round_to_cents(solution.total),
        cost_diff: round_to_cents(solution.cost_diff),
        relative_error: solution.relative_error,
        band: solution.band,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_spec_known_code() {
        assert_eq!(parse_spec("32hc").unwrap(), BookSpec::Hardcover32Color);
    }

    #[test]
    fn test_parse_spec_unknown_code_is_typed_error() {
        match parse_spec("a5pb") {
            Err(AppError::UnknownSpecification(code)) => assert_eq!(code, "a5pb"),
            other => panic!("expected UnknownSpecification, got {other:?}"),
        }
    }

    #[test]
    fn test_round_solution_rounds_amounts_only() {
        let solution = RankedSolution {
            copies: 137,
            costs: CostBreakdown {
                printing: 685.000001,
                post_processing: 574.0,
                binding: 27.400000001,
            },
            total: 1286.400000002,
            cost_diff: 0.0000000021,
            relative_error: 0.0000000021 / 1286.4,
            band: "100-499 copies".to_string(),
        };
        let rounded = round_solution(solution);
        assert_eq!(rounded.copies, 137);
        assert_eq!(rounded.costs.printing, 685.0);
        assert_eq!(rounded.costs.binding, 27.4);
        assert_eq!(rounded.total, 1286.4);
        assert_eq!(rounded.cost_diff, 0.0);
        assert_eq!(rounded.band, "100-499 copies");
    }
}
