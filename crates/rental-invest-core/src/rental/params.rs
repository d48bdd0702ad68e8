use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InvestError;
use crate::types::{Money, Percent};
use crate::InvestResult;

/// Annual appreciation assumed when the caller does not provide one.
pub const DEFAULT_ANNUAL_APPRECIATION: Percent = dec!(1.5);

/// Longest loan accepted, in years.
pub const MAX_LOAN_TERM_YEARS: u32 = 50;

/// Highest annual interest rate accepted, in percent.
pub const MAX_INTEREST_RATE: Percent = dec!(100);

/// Largest monetary amount accepted, for any single field and for the
/// total investment. Keeps 20-year growth and annuity math inside Decimal.
pub const MAX_AMOUNT: Money = dec!(1000000000000000);

fn default_annual_appreciation() -> Percent {
    DEFAULT_ANNUAL_APPRECIATION
}

/// Income tax regime. Collected for display; no tax adjustment is applied
/// to cash flow or yield.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaxSystem {
    /// Actual expenses deducted from rental income
    #[default]
    Real,
    /// Flat-rate regime (nominal 30% abatement)
    Micro,
}

/// Parameters of a buy-to-let investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentParams {
    /// Property purchase price
    pub purchase_price: Money,
    /// Notary / acquisition fees as a percentage of the purchase price
    pub notary_fees: Percent,
    /// Cash contributed upfront
    pub down_payment: Money,
    /// One-time renovation budget
    pub renovation_costs: Money,
    /// Gross monthly rent
    pub monthly_rent: Money,
    /// Monthly charges the landlord cannot pass on to the tenant
    pub monthly_non_recoverable_expenses: Money,
    /// Yearly property tax
    pub annual_property_tax: Money,
    /// Annual nominal loan rate, percent
    pub interest_rate: Percent,
    /// Loan duration in whole years
    pub loan_term: u32,
    /// Expected vacancy, percent of the year
    pub vacancy_rate: Percent,
    /// Marginal income-tax rate, percent
    pub tax_rate: Percent,
    pub tax_system: TaxSystem,
    /// Annual property appreciation, percent
    #[serde(default = "default_annual_appreciation")]
    pub annual_appreciation: Percent,
}

impl Default for InvestmentParams {
    fn default() -> Self {
        InvestmentParams {
            purchase_price: dec!(200000),
            notary_fees: dec!(7.5),
            down_payment: dec!(40000),
            renovation_costs: dec!(15000),
            monthly_rent: dec!(800),
            monthly_non_recoverable_expenses: dec!(50),
            annual_property_tax: dec!(1200),
            interest_rate: dec!(3.5),
            loan_term: 20,
            vacancy_rate: dec!(5),
            tax_rate: dec!(30),
            tax_system: TaxSystem::Real,
            annual_appreciation: DEFAULT_ANNUAL_APPRECIATION,
        }
    }
}

impl InvestmentParams {
    /// Notary fees in currency units.
    pub fn notary_fee_amount(&self) -> Money {
        self.purchase_price * self.notary_fees / Decimal::ONE_HUNDRED
    }

    /// Purchase price plus notary fees plus renovation.
    pub fn total_investment(&self) -> Money {
        self.purchase_price + self.notary_fee_amount() + self.renovation_costs
    }

    /// Amount borrowed to cover what the down payment does not.
    pub fn loan_amount(&self) -> Money {
        self.total_investment() - self.down_payment
    }

    /// Check every field against its accepted range.
    ///
    /// All ratios downstream divide by `total_investment` or `down_payment`,
    /// so both are required to be strictly positive here.
    pub fn validate(&self) -> InvestResult<()> {
        if self.purchase_price <= Decimal::ZERO {
            return Err(InvestError::invalid(
                "purchase_price",
                "Purchase price must be positive",
            ));
        }

        amount("purchase_price", self.purchase_price)?;
        percentage("notary_fees", self.notary_fees)?;
        amount("renovation_costs", self.renovation_costs)?;
        amount("monthly_rent", self.monthly_rent)?;
        amount(
            "monthly_non_recoverable_expenses",
            self.monthly_non_recoverable_expenses,
        )?;
        amount("annual_property_tax", self.annual_property_tax)?;

        if self.total_investment() > MAX_AMOUNT {
            return Err(InvestError::invalid(
                "total_investment",
                format!("Total investment cannot exceed {MAX_AMOUNT}"),
            ));
        }

        if self.down_payment <= Decimal::ZERO {
            return Err(InvestError::invalid(
                "down_payment",
                "Down payment must be positive (it is the base of the patrimonial return)",
            ));
        }

        if self.down_payment > self.total_investment() {
            return Err(InvestError::invalid(
                "down_payment",
                format!(
                    "Down payment {} exceeds total investment {}",
                    self.down_payment,
                    self.total_investment()
                ),
            ));
        }

        if self.interest_rate < Decimal::ZERO || self.interest_rate > MAX_INTEREST_RATE {
            return Err(InvestError::invalid(
                "interest_rate",
                format!("Interest rate must be between 0 and {MAX_INTEREST_RATE}%"),
            ));
        }

        if self.loan_term == 0 || self.loan_term > MAX_LOAN_TERM_YEARS {
            return Err(InvestError::invalid(
                "loan_term",
                format!("Loan term must be between 1 and {MAX_LOAN_TERM_YEARS} years"),
            ));
        }

        percentage("vacancy_rate", self.vacancy_rate)?;
        percentage("tax_rate", self.tax_rate)?;

        if self.annual_appreciation <= dec!(-100) || self.annual_appreciation > dec!(100) {
            return Err(InvestError::invalid(
                "annual_appreciation",
                "Annual appreciation must be above -100% and at most 100%",
            ));
        }

        Ok(())
    }
}

fn amount(field: &str, value: Money) -> InvestResult<()> {
    if value < Decimal::ZERO {
        return Err(InvestError::invalid(field, "Value cannot be negative"));
    }
    if value > MAX_AMOUNT {
        return Err(InvestError::invalid(
            field,
            format!("Value cannot exceed {MAX_AMOUNT}"),
        ));
    }
    Ok(())
}

fn percentage(field: &str, value: Percent) -> InvestResult<()> {
    if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
        return Err(InvestError::invalid(
            field,
            "Percentage must be between 0 and 100",
        ));
    }
    Ok(())
}
