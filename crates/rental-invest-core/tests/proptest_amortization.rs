//! Property-based tests for the amortization engine and results.
//!
//! Invariants verified:
//! - the remaining balance never increases and never goes below zero
//! - a fully amortizing loan closes to (almost) zero
//! - a zero-rate loan is repaid in equal, interest-free instalments
//! - results are a pure function of the parameters

use proptest::prelude::*;
use rental_invest_core::rental::{amortize, compute_results, InvestmentParams};
use rust_decimal::Decimal;

/// Loan principal in whole units [1 000, 2 000 000].
fn principal_strat() -> impl Strategy<Value = Decimal> {
    (1_000u64..=2_000_000u64).prop_map(Decimal::from)
}

/// Annual rate in hundredths of a percent [0.00, 12.00].
fn rate_strat() -> impl Strategy<Value = Decimal> {
    (0u32..=1_200u32).prop_map(|bp| Decimal::new(bp as i64, 2))
}

fn term_strat() -> impl Strategy<Value = u32> {
    1u32..=30u32
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn balance_is_non_increasing_and_non_negative(
        principal in principal_strat(),
        rate in rate_strat(),
        term in term_strat(),
    ) {
        let plan = amortize(principal, rate, term).unwrap();
        let mut previous = principal;
        for entry in &plan.schedule {
            prop_assert!(entry.remaining_balance <= previous);
            prop_assert!(entry.remaining_balance >= Decimal::ZERO);
            previous = entry.remaining_balance;
        }
    }

    #[test]
    fn loan_closes_at_term(
        principal in principal_strat(),
        rate in rate_strat(),
        term in term_strat(),
    ) {
        let plan = amortize(principal, rate, term).unwrap();
        prop_assert_eq!(plan.schedule.len() as u32, term * 12);
        prop_assert!(plan.remaining_balance < Decimal::new(1, 2));
    }

    #[test]
    fn zero_rate_splits_principal_evenly(
        principal in principal_strat(),
        term in term_strat(),
    ) {
        let plan = amortize(principal, Decimal::ZERO, term).unwrap();
        prop_assert_eq!(plan.monthly_payment, principal / Decimal::from(term * 12));
        prop_assert!(plan.schedule.iter().all(|e| e.interest_payment.is_zero()));
    }

    #[test]
    fn results_are_deterministic(
        rent in 300u64..=5_000u64,
        rate in rate_strat(),
        term in 5u32..=30u32,
    ) {
        let params = InvestmentParams {
            monthly_rent: Decimal::from(rent),
            interest_rate: rate,
            loan_term: term,
            ..InvestmentParams::default()
        };
        let first = compute_results(&params).unwrap();
        let second = compute_results(&params).unwrap();
        prop_assert_eq!(first, second);
    }
}
