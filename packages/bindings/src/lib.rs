use napi::Result as NapiResult;
use napi_derive::napi;
use rust_decimal::Decimal;
use std::str::FromStr;

use rental_invest_core::rental::{self, InvestmentParams};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_params(input_json: &str) -> NapiResult<InvestmentParams> {
    serde_json::from_str(input_json).map_err(to_napi_error)
}

fn parse_decimal(value: &str) -> NapiResult<Decimal> {
    Decimal::from_str(value.trim()).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Investment engine
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_results(input_json: String) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let output = rental::compute_results(&params).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn analyze_investment(input_json: String, include_schedule: bool) -> NapiResult<String> {
    let params = parse_params(&input_json)?;
    let output = rental::analyze_investment(&params, include_schedule).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn default_params() -> NapiResult<String> {
    serde_json::to_string(&InvestmentParams::default()).map_err(to_napi_error)
}

#[derive(serde::Deserialize)]
struct AmortizeBindingInput {
    loan_amount: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
}

#[napi]
pub fn amortize_loan(input_json: String) -> NapiResult<String> {
    let input: AmortizeBindingInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = rental::amortize(input.loan_amount, input.annual_rate_percent, input.term_years)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Display formatting
// ---------------------------------------------------------------------------

#[napi]
pub fn format_currency(amount: String) -> NapiResult<String> {
    Ok(rental_invest_core::format::format_currency(parse_decimal(&amount)?))
}

#[napi]
pub fn format_percent(value: String) -> NapiResult<String> {
    Ok(rental_invest_core::format::format_percent(parse_decimal(&value)?))
}
