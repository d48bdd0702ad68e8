use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::InvestError;
use crate::rental::params::{MAX_AMOUNT, MAX_INTEREST_RATE, MAX_LOAN_TERM_YEARS};
use crate::types::{percent_to_fraction, Money, Percent};
use crate::InvestResult;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// How the constant monthly payment was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentBasis {
    /// Constant annuity: P * r(1+r)^n / ((1+r)^n - 1)
    Annuity,
    /// Interest-free loan: principal / number of payments
    Linear,
}

/// One month of the repayment schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based payment number
    pub month: u32,
    pub payment: Money,
    pub principal_payment: Money,
    pub interest_payment: Money,
    /// Outstanding principal after this payment, floored at zero
    pub remaining_balance: Money,
}

/// Full repayment plan of a fixed-rate, fully amortizing loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Amortization {
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub payment_basis: PaymentBasis,
    pub schedule: Vec<AmortizationEntry>,
    /// Balance after the last payment, floored at zero
    pub remaining_balance: Money,
}

/// Interest and principal repaid over one loan year.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyLoanSummary {
    pub year: u32,
    pub interest: Money,
    pub principal: Money,
    pub total_paid: Money,
    pub closing_balance: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Amortize `loan_amount` over `term_years` at an annual nominal rate given
/// in percent, with monthly payments.
///
/// A zero rate takes the linear path (`loan_amount / months`); the annuity
/// formula would otherwise divide zero by zero.
pub fn amortize(
    loan_amount: Money,
    annual_rate_percent: Percent,
    term_years: u32,
) -> InvestResult<Amortization> {
    if term_years == 0 || term_years > MAX_LOAN_TERM_YEARS {
        return Err(InvestError::invalid(
            "term_years",
            format!("Loan term must be between 1 and {MAX_LOAN_TERM_YEARS} years"),
        ));
    }
    if loan_amount < Decimal::ZERO || loan_amount > MAX_AMOUNT {
        return Err(InvestError::invalid(
            "loan_amount",
            format!("Loan amount must be between 0 and {MAX_AMOUNT}"),
        ));
    }
    if annual_rate_percent < Decimal::ZERO || annual_rate_percent > MAX_INTEREST_RATE {
        return Err(InvestError::invalid(
            "annual_rate_percent",
            format!("Interest rate must be between 0 and {MAX_INTEREST_RATE}%"),
        ));
    }

    let monthly_rate = percent_to_fraction(annual_rate_percent) / dec!(12);
    let total_payments = term_years * 12;
    let (monthly_payment, payment_basis) =
        compute_monthly_payment(loan_amount, monthly_rate, total_payments)?;

    let mut schedule = Vec::with_capacity(total_payments as usize);
    let mut balance = loan_amount;

    for month in 1..=total_payments {
        let interest_payment = balance * monthly_rate;
        let principal_payment = monthly_payment - interest_payment;
        balance -= principal_payment;

        schedule.push(AmortizationEntry {
            month,
            payment: monthly_payment,
            principal_payment,
            interest_payment,
            remaining_balance: balance.max(Decimal::ZERO),
        });
    }

    Ok(Amortization {
        loan_amount,
        monthly_payment,
        payment_basis,
        schedule,
        remaining_balance: balance.max(Decimal::ZERO),
    })
}

impl Amortization {
    /// Number of monthly payments in the plan.
    pub fn total_payments(&self) -> u32 {
        self.schedule.len() as u32
    }

    /// Outstanding balance once `months` payments have been made.
    pub fn balance_after_month(&self, months: u32) -> Money {
        if months == 0 {
            return self.loan_amount;
        }
        self.schedule
            .get(months as usize - 1)
            .map(|e| e.remaining_balance)
            .unwrap_or(Decimal::ZERO)
    }

    /// Sum of every payment over the life of the loan.
    pub fn total_paid(&self) -> Money {
        self.monthly_payment * Decimal::from(self.total_payments())
    }

    /// Total interest over the life of the loan.
    pub fn total_interest(&self) -> Money {
        self.schedule.iter().map(|e| e.interest_payment).sum()
    }

    /// Group the schedule by loan year, keeping at most `max_years` years.
    pub fn yearly_summary(&self, max_years: u32) -> Vec<YearlyLoanSummary> {
        self.schedule
            .chunks(12)
            .take(max_years as usize)
            .enumerate()
            .map(|(i, months)| {
                let interest: Money = months.iter().map(|e| e.interest_payment).sum();
                let principal: Money = months.iter().map(|e| e.principal_payment).sum();
                YearlyLoanSummary {
                    year: i as u32 + 1,
                    interest,
                    principal,
                    total_paid: interest + principal,
                    closing_balance: months
                        .last()
                        .map(|e| e.remaining_balance)
                        .unwrap_or(Decimal::ZERO),
                }
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn compute_monthly_payment(
    principal: Money,
    monthly_rate: Decimal,
    total_months: u32,
) -> InvestResult<(Money, PaymentBasis)> {
    if monthly_rate.is_zero() {
        return Ok((
            principal / Decimal::from(total_months),
            PaymentBasis::Linear,
        ));
    }

    // (1 + r)^n via iterative multiplication
    let growth = Decimal::ONE + monthly_rate;
    let mut compound = Decimal::ONE;
    for _ in 0..total_months {
        compound = compound
            .checked_mul(growth)
            .ok_or_else(|| overflow(monthly_rate, total_months))?;
    }

    let denominator = compound - Decimal::ONE;
    if denominator.is_zero() {
        return Err(InvestError::DegenerateAmortization {
            context: format!(
                "annuity denominator vanished for monthly rate {monthly_rate} over {total_months} months"
            ),
        });
    }

    // r(1+r)^n / ((1+r)^n - 1) stays close to r, so scale the principal last
    let factor = monthly_rate
        .checked_mul(compound)
        .and_then(|v| v.checked_div(denominator))
        .ok_or_else(|| overflow(monthly_rate, total_months))?;
    let payment = principal
        .checked_mul(factor)
        .ok_or_else(|| overflow(monthly_rate, total_months))?;

    Ok((payment, PaymentBasis::Annuity))
}

fn overflow(monthly_rate: Decimal, total_months: u32) -> InvestError {
    InvestError::DegenerateAmortization {
        context: format!(
            "annuity factor out of decimal range for monthly rate {monthly_rate} over {total_months} months"
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::MathematicalOps;
    use rust_decimal_macros::dec;

    #[test]
    fn test_schedule_closes_to_zero() {
        let a = amortize(dec!(200000), dec!(3.5), 20).unwrap();
        assert_eq!(a.schedule.len(), 240);
        let last = a.schedule.last().unwrap();
        assert_eq!(last.month, 240);
        assert!(last.remaining_balance < dec!(0.01));
        assert!(a.remaining_balance < dec!(0.01));
        assert_eq!(a.payment_basis, PaymentBasis::Annuity);
    }

    #[test]
    fn test_payment_matches_annuity_formula() {
        let a = amortize(dec!(190000), dec!(3.5), 20).unwrap();
        let r = dec!(3.5) / dec!(100) / dec!(12);
        let factor = (Decimal::ONE + r).powu(240);
        let expected = dec!(190000) * r * factor / (factor - Decimal::ONE);
        assert!((a.monthly_payment - expected).abs() < dec!(0.000001));
        // Sanity: roughly 1,102 per month
        assert!(a.monthly_payment > dec!(1101) && a.monthly_payment < dec!(1103));
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let a = amortize(dec!(120000), Decimal::ZERO, 10).unwrap();
        assert_eq!(a.monthly_payment, dec!(1000));
        assert_eq!(a.payment_basis, PaymentBasis::Linear);
        assert!(a.schedule.iter().all(|e| e.interest_payment.is_zero()));
        assert!(a.schedule.iter().all(|e| e.principal_payment == dec!(1000)));
        assert_eq!(a.remaining_balance, Decimal::ZERO);
    }

    #[test]
    fn test_balance_is_monotonic_and_non_negative() {
        let a = amortize(dec!(250000), dec!(4.2), 25).unwrap();
        let mut previous = a.loan_amount;
        for entry in &a.schedule {
            assert!(entry.remaining_balance <= previous);
            assert!(entry.remaining_balance >= Decimal::ZERO);
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn test_entry_splits_payment() {
        let a = amortize(dec!(100000), dec!(6), 15).unwrap();
        let first = &a.schedule[0];
        // 100000 * 0.005 = 500 interest in month one
        assert_eq!(first.interest_payment, dec!(500));
        assert_eq!(
            first.principal_payment + first.interest_payment,
            first.payment
        );
    }

    #[test]
    fn test_zero_loan_amount() {
        let a = amortize(Decimal::ZERO, dec!(3), 5).unwrap();
        assert_eq!(a.monthly_payment, Decimal::ZERO);
        assert!(a.schedule.iter().all(|e| e.remaining_balance.is_zero()));
    }

    #[test]
    fn test_zero_term_error() {
        assert!(matches!(
            amortize(dec!(1000), dec!(3), 0),
            Err(InvestError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_negative_loan_amount_error() {
        assert!(matches!(
            amortize(dec!(-1000), dec!(3), 10),
            Err(InvestError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_negative_rate_error() {
        assert!(matches!(
            amortize(dec!(1000), dec!(-3), 10),
            Err(InvestError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_term_above_cap_error() {
        match amortize(dec!(1000), dec!(3), MAX_LOAN_TERM_YEARS + 1) {
            Err(InvestError::InvalidInput { field, .. }) => assert_eq!(field, "term_years"),
            other => panic!("expected InvalidInput on term_years, got {other:?}"),
        }
        assert!(amortize(dec!(1000), dec!(3), MAX_LOAN_TERM_YEARS).is_ok());
        // Would overflow the month count if it reached the schedule
        assert!(matches!(
            amortize(dec!(1000), dec!(3), 400_000_000),
            Err(InvestError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_rate_above_cap_error() {
        match amortize(dec!(1000), dec!(100.01), 10) {
            Err(InvestError::InvalidInput { field, .. }) => {
                assert_eq!(field, "annual_rate_percent")
            }
            other => panic!("expected InvalidInput on annual_rate_percent, got {other:?}"),
        }
        assert!(amortize(dec!(1000), MAX_INTEREST_RATE, 10).is_ok());
    }

    #[test]
    fn test_loan_above_cap_error() {
        assert!(matches!(
            amortize(MAX_AMOUNT + Decimal::ONE, dec!(3), 10),
            Err(InvestError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_extreme_loan_within_bounds_does_not_overflow() {
        // (1 + 1/12)^600 is about 7e20; the principal must not multiply it
        let a = amortize(MAX_AMOUNT, MAX_INTEREST_RATE, MAX_LOAN_TERM_YEARS).unwrap();
        let monthly_rate = MAX_INTEREST_RATE / dec!(100) / dec!(12);
        let interest_only = MAX_AMOUNT * monthly_rate;
        assert!((a.monthly_payment - interest_only).abs() < interest_only * dec!(0.0001));
        assert_eq!(a.schedule.len(), 600);
    }

    #[test]
    fn test_balance_after_month() {
        let a = amortize(dec!(120000), Decimal::ZERO, 10).unwrap();
        assert_eq!(a.balance_after_month(0), dec!(120000));
        assert_eq!(a.balance_after_month(12), dec!(108000));
        assert_eq!(a.balance_after_month(120), Decimal::ZERO);
        assert_eq!(a.balance_after_month(500), Decimal::ZERO);
    }

    #[test]
    fn test_yearly_summary() {
        let a = amortize(dec!(120000), Decimal::ZERO, 10).unwrap();
        let years = a.yearly_summary(20);
        assert_eq!(years.len(), 10);
        assert_eq!(years[0].principal, dec!(12000));
        assert_eq!(years[0].interest, Decimal::ZERO);
        assert_eq!(years[9].closing_balance, Decimal::ZERO);

        let capped = amortize(dec!(300000), dec!(4), 25).unwrap().yearly_summary(20);
        assert_eq!(capped.len(), 20);
        assert_eq!(capped[19].year, 20);
    }

    #[test]
    fn test_total_interest() {
        let a = amortize(dec!(100000), dec!(5), 10).unwrap();
        let diff = a.total_paid() - a.loan_amount - a.total_interest();
        assert!(diff.abs() < dec!(0.01));
    }
}
