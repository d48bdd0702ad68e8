use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::rental::params::InvestmentParams;
use crate::rental::results::{annual_expenses, annual_rent, InvestmentResults};
use crate::types::{Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// One acquisition cost line and its share of the total investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostComponent {
    pub label: String,
    pub amount: Money,
    pub share: Percent,
}

/// Split of the total investment into purchase, notary and renovation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub total_investment: Money,
    pub components: Vec<CostComponent>,
}

/// Operating view of one holding year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowYear {
    pub year: u32,
    pub rental_income: Money,
    pub operating_expenses: Money,
    pub debt_service: Money,
    pub cash_flow: Money,
    pub cumulative_cash_flow: Money,
}

/// Cash put in versus cash taken out, cumulated to the end of a year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnYear {
    pub year: u32,
    pub cumulative_investment: Money,
    pub cumulative_income: Money,
}

/// Qualitative band for the gross yield.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum YieldRating {
    Excellent,
    Good,
    Average,
    Weak,
}

/// Qualitative band for the monthly cash flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CashFlowRating {
    Excellent,
    Good,
    Balanced,
    Negative,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Break the total investment down into its three cost lines.
pub fn cost_breakdown(params: &InvestmentParams, results: &InvestmentResults) -> CostBreakdown {
    let total = results.total_investment;
    let share = |amount: Money| {
        if total.is_zero() {
            Decimal::ZERO
        } else {
            amount / total * Decimal::ONE_HUNDRED
        }
    };

    let components = [
        ("Purchase price", params.purchase_price),
        ("Notary fees", results.actual_notary_fees),
        ("Renovation", params.renovation_costs),
    ]
    .into_iter()
    .map(|(label, amount)| CostComponent {
        label: label.into(),
        amount,
        share: share(amount),
    })
    .collect();

    CostBreakdown {
        total_investment: total,
        components,
    }
}

/// Year-by-year operating cash flow over `years` years.
///
/// Rent and expenses are held flat; debt service stops once the loan term
/// is over.
pub fn project_cash_flows(
    params: &InvestmentParams,
    results: &InvestmentResults,
    years: u32,
) -> Vec<CashFlowYear> {
    let rental_income = annual_rent(params);
    let operating_expenses = annual_expenses(params);
    let annual_debt_service = results.monthly_payment * dec!(12);

    let mut cumulative_cash_flow = Decimal::ZERO;
    (1..=years)
        .map(|year| {
            let debt_service = if year <= params.loan_term {
                annual_debt_service
            } else {
                Decimal::ZERO
            };
            let cash_flow = rental_income - operating_expenses - debt_service;
            cumulative_cash_flow += cash_flow;
            CashFlowYear {
                year,
                rental_income,
                operating_expenses,
                debt_service,
                cash_flow,
                cumulative_cash_flow,
            }
        })
        .collect()
}

/// Cumulative cash invested against cumulative income, year 0 to `years`.
///
/// Year 0 holds the down payment alone. While the loan runs and the
/// property does not carry itself, each year adds a full year of loan
/// payments to the investment; positive monthly cash flow accrues as income.
pub fn project_returns(
    params: &InvestmentParams,
    results: &InvestmentResults,
    years: u32,
) -> Vec<ReturnYear> {
    let self_financing = results.monthly_cash_flow >= Decimal::ZERO;
    let yearly_income = results.monthly_cash_flow.max(Decimal::ZERO) * dec!(12);
    let yearly_top_up = results.monthly_payment * dec!(12);

    let mut cumulative_investment = params.down_payment;
    let mut cumulative_income = Decimal::ZERO;
    let mut out = Vec::with_capacity(years as usize + 1);
    out.push(ReturnYear {
        year: 0,
        cumulative_investment,
        cumulative_income,
    });

    for year in 1..=years {
        if year <= params.loan_term && !self_financing {
            cumulative_investment += yearly_top_up;
        }
        cumulative_income += yearly_income;
        out.push(ReturnYear {
            year,
            cumulative_investment,
            cumulative_income,
        });
    }

    out
}

impl YieldRating {
    pub fn from_gross_yield(gross_yield: Percent) -> Self {
        if gross_yield >= dec!(6) {
            YieldRating::Excellent
        } else if gross_yield >= dec!(4) {
            YieldRating::Good
        } else if gross_yield >= dec!(2) {
            YieldRating::Average
        } else {
            YieldRating::Weak
        }
    }

    /// Net yield is graded on the same bands as the gross yield.
    pub fn from_net_yield(net_yield: Percent) -> Self {
        Self::from_gross_yield(net_yield)
    }
}

impl CashFlowRating {
    pub fn from_monthly_cash_flow(monthly_cash_flow: Money) -> Self {
        if monthly_cash_flow >= dec!(300) {
            CashFlowRating::Excellent
        } else if monthly_cash_flow >= dec!(100) {
            CashFlowRating::Good
        } else if monthly_cash_flow >= Decimal::ZERO {
            CashFlowRating::Balanced
        } else {
            CashFlowRating::Negative
        }
    }
}
