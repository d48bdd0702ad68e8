use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InvestError;
use crate::rental::amortization::{amortize, Amortization};
use crate::rental::params::InvestmentParams;
use crate::types::{percent_to_fraction, Money, Percent};
use crate::InvestResult;

/// Horizon of the long-term projection, in years.
pub const PROJECTION_YEARS: u32 = 20;

/// Every figure derived from one set of [`InvestmentParams`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentResults {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub monthly_cash_flow: Money,
    pub annual_cash_flow: Money,
    /// Vacancy-adjusted annual rent / total investment, percent
    pub gross_yield: Percent,
    /// Annual cash flow / total investment, percent
    pub net_yield: Percent,
    pub actual_notary_fees: Money,
    /// Purchase price + notary fees + renovation
    pub total_investment: Money,
    /// Monthly top-up needed when cash flow is negative, else zero
    pub monthly_savings_effort: Money,
    /// 20-year net income / total investment, percent
    pub twenty_year_return: Percent,
    pub twenty_year_total_rent: Money,
    pub twenty_year_total_expenses: Money,
    pub twenty_year_net_income: Money,
    pub property_value_after_20_years: Money,
    pub remaining_loan_after_20_years: Money,
    pub net_equity_after_20_years: Money,
    /// (net equity - down payment + 20-year net income) / down payment, percent
    pub total_patrimonial_return: Percent,
}

/// Compute the investment results for `params`.
///
/// Parameters are validated first, so every ratio below divides by a
/// strictly positive amount.
pub fn compute_results(params: &InvestmentParams) -> InvestResult<InvestmentResults> {
    params.validate()?;
    let amortization = amortize(params.loan_amount(), params.interest_rate, params.loan_term)?;
    aggregate(params, &amortization)
}

/// Vacancy-adjusted yearly rent.
pub fn annual_rent(params: &InvestmentParams) -> Money {
    params.monthly_rent * dec!(12) * (Decimal::ONE - percent_to_fraction(params.vacancy_rate))
}

/// Non-recoverable charges plus property tax, per year.
pub fn annual_expenses(params: &InvestmentParams) -> Money {
    params.monthly_non_recoverable_expenses * dec!(12) + params.annual_property_tax
}

/// Aggregate results from validated params and their amortization plan.
pub(crate) fn aggregate(
    params: &InvestmentParams,
    amortization: &Amortization,
) -> InvestResult<InvestmentResults> {
    let actual_notary_fees = params.notary_fee_amount();
    let total_investment = params.total_investment();
    let loan_amount = params.loan_amount();
    let monthly_payment = amortization.monthly_payment;

    let remaining_loan_after_20_years = if params.loan_term > PROJECTION_YEARS {
        amortization.balance_after_month(PROJECTION_YEARS * 12)
    } else {
        Decimal::ZERO
    };

    let annual_rent = annual_rent(params);
    let annual_expenses = annual_expenses(params);
    let annual_debt_service = monthly_payment * dec!(12);

    let annual_cash_flow = annual_rent - annual_expenses - annual_debt_service;
    let monthly_cash_flow = annual_cash_flow / dec!(12);

    let gross_yield = percent_of(annual_rent, total_investment, "total_investment")?;
    let net_yield = percent_of(annual_cash_flow, total_investment, "total_investment")?;

    let monthly_savings_effort = (-monthly_cash_flow).max(Decimal::ZERO);

    // --- 20-year income ---
    let horizon = Decimal::from(PROJECTION_YEARS);
    let years_repaying = Decimal::from(params.loan_term.min(PROJECTION_YEARS));
    let twenty_year_total_rent = annual_rent * horizon;
    let twenty_year_total_expenses =
        annual_expenses * horizon + annual_debt_service * years_repaying;
    let twenty_year_net_income = twenty_year_total_rent - twenty_year_total_expenses;
    let twenty_year_return =
        percent_of(twenty_year_net_income, total_investment, "total_investment")?;

    // --- 20-year patrimony ---
    let growth = Decimal::ONE + percent_to_fraction(params.annual_appreciation);
    let property_value_after_20_years = growth
        .checked_powu(PROJECTION_YEARS as u64)
        .and_then(|g| params.purchase_price.checked_mul(g))
        .ok_or_else(|| {
            InvestError::invalid(
                "annual_appreciation",
                "Projected property value exceeds the decimal range",
            )
        })?;
    let net_equity_after_20_years = property_value_after_20_years - remaining_loan_after_20_years;
    let total_patrimonial_return = percent_of(
        net_equity_after_20_years - params.down_payment + twenty_year_net_income,
        params.down_payment,
        "down_payment",
    )?;

    log::debug!(
        "rental results: loan={loan_amount} payment={monthly_payment} cash_flow={monthly_cash_flow}/month gross_yield={gross_yield}%"
    );

    Ok(InvestmentResults {
        loan_amount,
        monthly_payment,
        monthly_cash_flow,
        annual_cash_flow,
        gross_yield,
        net_yield,
        actual_notary_fees,
        total_investment,
        monthly_savings_effort,
        twenty_year_return,
        twenty_year_total_rent,
        twenty_year_total_expenses,
        twenty_year_net_income,
        property_value_after_20_years,
        remaining_loan_after_20_years,
        net_equity_after_20_years,
        total_patrimonial_return,
    })
}

/// `part / whole` in percent, failing on `whole` when the ratio leaves the
/// decimal range.
fn percent_of(part: Decimal, whole: Money, field: &str) -> InvestResult<Percent> {
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| {
            InvestError::invalid(
                field,
                format!("{whole} is too small for a ratio of {part}"),
            )
        })
}
