use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::rental::amortization::{amortize, AmortizationEntry, PaymentBasis, YearlyLoanSummary};
use crate::rental::params::InvestmentParams;
use crate::rental::projection::{
    cost_breakdown, project_cash_flows, project_returns, CashFlowRating, CashFlowYear,
    CostBreakdown, ReturnYear, YieldRating,
};
use crate::rental::results::{aggregate, InvestmentResults, PROJECTION_YEARS};
use crate::types::{with_metadata, ComputationOutput};
use crate::InvestResult;

/// Years shown in the operating cash-flow view.
pub const CASH_FLOW_VIEW_YEARS: u32 = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Qualitative labels for the headline figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ratings {
    pub gross_yield: YieldRating,
    pub net_yield: YieldRating,
    pub cash_flow: CashFlowRating,
}

/// Results plus every derived view a front-end renders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentAnalysis {
    pub results: InvestmentResults,
    pub ratings: Ratings,
    pub payment_basis: PaymentBasis,
    pub cost_breakdown: CostBreakdown,
    /// Loan years, capped at the projection horizon
    pub loan_by_year: Vec<YearlyLoanSummary>,
    pub cash_flow_projection: Vec<CashFlowYear>,
    pub return_projection: Vec<ReturnYear>,
    /// Monthly schedule, only when requested
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<AmortizationEntry>>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Run the full analysis of a rental investment.
///
/// Returns a `ComputationOutput<InvestmentAnalysis>` with the results, the
/// derived views, warnings for risky figures, and computation metadata.
pub fn analyze_investment(
    params: &InvestmentParams,
    include_schedule: bool,
) -> InvestResult<ComputationOutput<InvestmentAnalysis>> {
    let start = Instant::now();
    params.validate()?;

    let amortization = amortize(params.loan_amount(), params.interest_rate, params.loan_term)?;
    let results = aggregate(params, &amortization)?;
    let warnings = collect_warnings(params, &results, amortization.payment_basis);
    for w in &warnings {
        log::warn!("{w}");
    }

    let analysis = InvestmentAnalysis {
        ratings: Ratings {
            gross_yield: YieldRating::from_gross_yield(results.gross_yield),
            net_yield: YieldRating::from_net_yield(results.net_yield),
            cash_flow: CashFlowRating::from_monthly_cash_flow(results.monthly_cash_flow),
        },
        payment_basis: amortization.payment_basis,
        cost_breakdown: cost_breakdown(params, &results),
        loan_by_year: amortization.yearly_summary(PROJECTION_YEARS),
        cash_flow_projection: project_cash_flows(params, &results, CASH_FLOW_VIEW_YEARS),
        return_projection: project_returns(params, &results, PROJECTION_YEARS),
        schedule: include_schedule.then(|| amortization.schedule.clone()),
        results,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Rental Investment Analysis (constant-annuity loan, 20-year horizon)",
        params,
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn collect_warnings(
    params: &InvestmentParams,
    results: &InvestmentResults,
    basis: PaymentBasis,
) -> Vec<String> {
    let mut warnings = Vec::new();

    if results.monthly_cash_flow < Decimal::ZERO {
        warnings.push(format!(
            "Negative cash flow: a monthly savings effort of {:.2} is required",
            results.monthly_savings_effort
        ));
    }

    if params.vacancy_rate > dec!(15) {
        warnings.push(format!(
            "Vacancy rate {:.1}% exceeds 15% — above typical market norms",
            params.vacancy_rate
        ));
    }

    let loan_to_cost = results.loan_amount / results.total_investment;
    if loan_to_cost > dec!(0.90) {
        warnings.push(format!(
            "Loan-to-cost of {:.1}% exceeds 90% — high leverage",
            loan_to_cost * dec!(100)
        ));
    }

    if params.loan_term > PROJECTION_YEARS {
        warnings.push(format!(
            "Loan runs {} years; {:.2} is still owed after {PROJECTION_YEARS} years",
            params.loan_term, results.remaining_loan_after_20_years
        ));
    }

    if basis == PaymentBasis::Linear && !results.loan_amount.is_zero() {
        warnings.push("Zero interest rate: loan repaid in equal principal instalments".into());
    }

    warnings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvestError;
    use crate::rental::results::compute_results;
    use rust_decimal_macros::dec;

    #[test]
    fn test_analysis_matches_compute_results() {
        let p = InvestmentParams::default();
        let out = analyze_investment(&p, false).unwrap();
        assert_eq!(out.result.results, compute_results(&p).unwrap());
        assert!(out.result.schedule.is_none());
    }

    #[test]
    fn test_analysis_views_sizes() {
        let out = analyze_investment(&InvestmentParams::default(), true).unwrap();
        let a = &out.result;
        assert_eq!(a.loan_by_year.len(), 20);
        assert_eq!(a.cash_flow_projection.len(), 10);
        assert_eq!(a.return_projection.len(), 21);
        assert_eq!(a.schedule.as_ref().map(Vec::len), Some(240));
        assert_eq!(a.payment_basis, PaymentBasis::Annuity);
    }

    #[test]
    fn test_default_ratings() {
        let out = analyze_investment(&InvestmentParams::default(), false).unwrap();
        // ~3.97% gross yield, negative cash flow
        assert_eq!(out.result.ratings.gross_yield, YieldRating::Average);
        // negative cash flow puts the net yield below zero
        assert_eq!(out.result.ratings.net_yield, YieldRating::Weak);
        assert_eq!(out.result.ratings.cash_flow, CashFlowRating::Negative);
    }

    #[test]
    fn test_negative_cash_flow_warning() {
        let out = analyze_investment(&InvestmentParams::default(), false).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Negative cash flow")));
    }

    #[test]
    fn test_high_vacancy_warning() {
        let p = InvestmentParams {
            vacancy_rate: dec!(20),
            ..InvestmentParams::default()
        };
        let out = analyze_investment(&p, false).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Vacancy")));
    }

    #[test]
    fn test_high_leverage_warning() {
        let p = InvestmentParams {
            down_payment: dec!(10000),
            ..InvestmentParams::default()
        };
        let out = analyze_investment(&p, false).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("Loan-to-cost")));
    }

    #[test]
    fn test_long_loan_warning() {
        let p = InvestmentParams {
            loan_term: 25,
            ..InvestmentParams::default()
        };
        let out = analyze_investment(&p, false).unwrap();
        assert!(out.warnings.iter().any(|w| w.contains("still owed")));
    }

    #[test]
    fn test_zero_rate_warning() {
        let p = InvestmentParams {
            interest_rate: Decimal::ZERO,
            ..InvestmentParams::default()
        };
        let out = analyze_investment(&p, false).unwrap();
        assert_eq!(out.result.payment_basis, PaymentBasis::Linear);
        assert!(out.warnings.iter().any(|w| w.contains("Zero interest")));
    }

    #[test]
    fn test_methodology_and_assumptions() {
        let out = analyze_investment(&InvestmentParams::default(), false).unwrap();
        assert!(out.methodology.contains("Rental Investment"));
        assert_eq!(out.assumptions["loan_term"], serde_json::json!(20));
        assert_eq!(out.assumptions["tax_system"], serde_json::json!("real"));
    }

    #[test]
    fn test_invalid_params_rejected() {
        let p = InvestmentParams {
            purchase_price: dec!(-1),
            ..InvestmentParams::default()
        };
        assert!(matches!(
            analyze_investment(&p, false),
            Err(InvestError::InvalidInput { .. })
        ));
    }
}
