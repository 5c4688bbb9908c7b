//! Caller-side validation for quote requests.
//!
//! The pricing core assumes valid input; these checks run in the handlers
//! before it is invoked. Errors block the request; warnings are advisory
//! and returned alongside the result.

use serde::Serialize;

/// Smallest run the press prices.
const MIN_COPIES: u32 = 100;
/// Soft upper bound past which a page count is probably a typo.
const PAGE_COUNT_ADVISORY_LIMIT: u32 = 1000;
/// Soft upper bound past which a copy count is probably a typo.
const COPIES_ADVISORY_LIMIT: u32 = 10_000;

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Validates quote input. `copies` is set in internal mode, `target_cost`
/// in external mode.
pub fn validate_quote_input(
    page_count: u32,
    copies: Option<u32>,
    target_cost: Option<f64>,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    if page_count < 2 {
        report
            .errors
            .push("page count must be at least 2".to_string());
    }
    if page_count % 2 != 0 {
        report.errors.push("page count must be even".to_string());
    }
    if page_count > PAGE_COUNT_ADVISORY_LIMIT {
        report.warnings.push(format!(
            "page count {page_count} is unusually large, please double-check"
        ));
    }

    if let Some(copies) = copies {
        if copies < MIN_COPIES {
            report
                .errors
                .push(format!("copy count must be at least {MIN_COPIES}"));
        }
        if copies > COPIES_ADVISORY_LIMIT {
            report.warnings.push(format!(
                "copy count {copies} is unusually large, please double-check"
            ));
        }
    }

    if let Some(target) = target_cost {
        if !target.is_finite() || target <= 0.0 {
            report
                .errors
                .push("target cost must be a positive amount".to_string());
        }
    }

    report
}
