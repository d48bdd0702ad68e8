use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::{json, Map, Value};

use rental_invest_core::format::{format_currency, format_percent};
use rental_invest_core::rental::{amortize, analyze_investment, InvestmentParams, TaxSystem};

use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TaxSystemArg {
    Real,
    Micro,
}

impl From<TaxSystemArg> for TaxSystem {
    fn from(arg: TaxSystemArg) -> Self {
        match arg {
            TaxSystemArg::Real => TaxSystem::Real,
            TaxSystemArg::Micro => TaxSystem::Micro,
        }
    }
}

/// Investment parameters as flags. Any flag left out keeps the value of
/// the default scenario.
#[derive(Args, Debug, Default)]
#[command(allow_hyphen_values = true)]
pub struct ParamArgs {
    /// Property purchase price
    #[arg(long)]
    pub purchase_price: Option<Decimal>,

    /// Notary fees, percent of the price (e.g. 7.5)
    #[arg(long)]
    pub notary_fees: Option<Decimal>,

    /// Cash contributed upfront
    #[arg(long)]
    pub down_payment: Option<Decimal>,

    /// Renovation budget
    #[arg(long)]
    pub renovation_costs: Option<Decimal>,

    /// Gross monthly rent
    #[arg(long, alias = "rent")]
    pub monthly_rent: Option<Decimal>,

    /// Monthly non-recoverable charges
    #[arg(long, alias = "charges")]
    pub monthly_expenses: Option<Decimal>,

    /// Yearly property tax
    #[arg(long)]
    pub property_tax: Option<Decimal>,

    /// Annual loan rate, percent (e.g. 3.5)
    #[arg(long, alias = "rate")]
    pub interest_rate: Option<Decimal>,

    /// Loan duration in whole years
    #[arg(long, alias = "term")]
    pub loan_term: Option<u32>,

    /// Expected vacancy, percent
    #[arg(long)]
    pub vacancy_rate: Option<Decimal>,

    /// Marginal income-tax rate, percent
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Income tax regime
    #[arg(long, value_enum)]
    pub tax_system: Option<TaxSystemArg>,

    /// Annual property appreciation, percent (default 1.5)
    #[arg(long)]
    pub appreciation: Option<Decimal>,

    /// Path to JSON or YAML parameter file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the full investment analysis
#[derive(Args)]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub params: ParamArgs,

    /// Include the monthly amortization schedule
    #[arg(long)]
    pub schedule: bool,
}

/// Arguments for the formatted report
#[derive(Args)]
pub struct ReportArgs {
    #[command(flatten)]
    pub params: ParamArgs,
}

/// Arguments for a standalone loan amortization
#[derive(Args)]
pub struct AmortizeArgs {
    /// Amount borrowed
    #[arg(long)]
    pub loan_amount: Decimal,

    /// Annual loan rate, percent
    #[arg(long)]
    pub rate: Decimal,

    /// Loan duration in whole years
    #[arg(long)]
    pub term: u32,

    /// Summarise by loan year instead of listing every month
    #[arg(long)]
    pub yearly: bool,
}

pub fn run_analyze(args: AnalyzeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.params)?;
    let result = analyze_investment(&params, args.schedule)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_amortize(args: AmortizeArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let plan = amortize(args.loan_amount, args.rate, args.term)?;

    let mut out = Map::new();
    out.insert("loan_amount".into(), json!(plan.loan_amount));
    out.insert("monthly_payment".into(), json!(plan.monthly_payment));
    out.insert("payment_basis".into(), json!(plan.payment_basis));
    out.insert("total_interest".into(), json!(plan.total_interest()));
    out.insert("total_paid".into(), json!(plan.total_paid()));
    if args.yearly {
        out.insert("years".into(), json!(plan.yearly_summary(args.term)));
    } else {
        out.insert("schedule".into(), json!(plan.schedule));
    }
    Ok(Value::Object(out))
}

pub fn run_report(args: ReportArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(args.params)?;
    build_report(&params)
}

/// Display-ready figures, ratings and warnings for one scenario.
fn build_report(params: &InvestmentParams) -> Result<Value, Box<dyn std::error::Error>> {
    let analysis = analyze_investment(params, false)?;
    let r = &analysis.result.results;

    let mut report = Map::new();
    let money = [
        ("loan_amount", r.loan_amount),
        ("monthly_payment", r.monthly_payment),
        ("monthly_cash_flow", r.monthly_cash_flow),
        ("monthly_savings_effort", r.monthly_savings_effort),
        ("total_investment", r.total_investment),
        ("notary_fees", r.actual_notary_fees),
        ("twenty_year_net_income", r.twenty_year_net_income),
        ("property_value_after_20_years", r.property_value_after_20_years),
        ("net_equity_after_20_years", r.net_equity_after_20_years),
    ];
    for (key, amount) in money {
        report.insert(key.into(), Value::String(format_currency(amount)));
    }

    let percents = [
        ("gross_yield", r.gross_yield),
        ("net_yield", r.net_yield),
        ("twenty_year_return", r.twenty_year_return),
        ("total_patrimonial_return", r.total_patrimonial_return),
    ];
    for (key, pct) in percents {
        report.insert(key.into(), Value::String(format_percent(pct)));
    }

    report.insert("yield_rating".into(), json!(analysis.result.ratings.gross_yield));
    report.insert("net_yield_rating".into(), json!(analysis.result.ratings.net_yield));
    report.insert("cash_flow_rating".into(), json!(analysis.result.ratings.cash_flow));

    Ok(json!({
        "result": report,
        "warnings": analysis.warnings,
        "methodology": analysis.methodology,
    }))
}

/// Parameters from `--input`, else piped stdin, else flags over the defaults.
fn load_params(args: ParamArgs) -> Result<InvestmentParams, Box<dyn std::error::Error>> {
    if let Some(ref path) = args.input {
        return input::file::read_params(path);
    }
    if let Some(params) = input::stdin::read_stdin()? {
        return Ok(params);
    }
    Ok(params_from_flags(args))
}

fn params_from_flags(args: ParamArgs) -> InvestmentParams {
    let defaults = InvestmentParams::default();
    InvestmentParams {
        purchase_price: args.purchase_price.unwrap_or(defaults.purchase_price),
        notary_fees: args.notary_fees.unwrap_or(defaults.notary_fees),
        down_payment: args.down_payment.unwrap_or(defaults.down_payment),
        renovation_costs: args.renovation_costs.unwrap_or(defaults.renovation_costs),
        monthly_rent: args.monthly_rent.unwrap_or(defaults.monthly_rent),
        monthly_non_recoverable_expenses: args
            .monthly_expenses
            .unwrap_or(defaults.monthly_non_recoverable_expenses),
        annual_property_tax: args.property_tax.unwrap_or(defaults.annual_property_tax),
        interest_rate: args.interest_rate.unwrap_or(defaults.interest_rate),
        loan_term: args.loan_term.unwrap_or(defaults.loan_term),
        vacancy_rate: args.vacancy_rate.unwrap_or(defaults.vacancy_rate),
        tax_rate: args.tax_rate.unwrap_or(defaults.tax_rate),
        tax_system: args.tax_system.map(TaxSystem::from).unwrap_or(defaults.tax_system),
        annual_appreciation: args.appreciation.unwrap_or(defaults.annual_appreciation),
    }
}
