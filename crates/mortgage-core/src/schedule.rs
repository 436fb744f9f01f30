//! Period-by-period amortization of a level-payment mortgage.
//!
//! The schedule carries the level payment through every period, splitting it
//! into interest on the outstanding balance and a principal portion. The
//! final period pays off exactly what remains, absorbing the rounding drift
//! the 2-decimal payment accumulates over the life of the loan.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::loan::{level_payment, monthly_rate, LoanTerms};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::MortgageResult;

/// A single payment period in the amortization schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// 1-based payment number.
    pub payment_number: u32,
    /// Payment for this period (level, except possibly the final period).
    pub payment_amount: Money,
    /// Portion applied to interest.
    pub interest_paid: Money,
    /// Portion applied to principal.
    pub principal_paid: Money,
    /// Outstanding principal after this payment.
    pub remaining_balance: Money,
}

/// Full amortization schedule with lifetime totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationScheduleOutput {
    pub entries: Vec<AmortizationEntry>,
    pub total_paid: Money,
    pub total_interest: Money,
    pub total_principal: Money,
}

/// Generate the full amortization schedule for the terms.
///
/// Purely functional: identical terms always produce identical schedules.
/// The sequence stops early if the balance reaches zero before the contract
/// runs out, which happens when the rounded payment slightly overpays each
/// period.
pub fn amortization_schedule(
    terms: &LoanTerms,
) -> MortgageResult<ComputationOutput<AmortizationScheduleOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let payment = level_payment(terms)?;
    let r = monthly_rate(terms.annual_rate_percent);
    let n = terms.payment_count();

    let mut entries = Vec::with_capacity(n as usize);
    let mut balance = terms.principal;
    let mut total_paid = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut total_principal = Decimal::ZERO;

    for number in 1..=n {
        let interest = balance * r;
        let mut principal_portion = payment - interest;
        let mut amount = payment;

        // Final period pays off exactly what remains.
        if number == n {
            principal_portion = balance;
            amount = principal_portion + interest;
        }

        balance -= principal_portion;

        total_paid += amount;
        total_interest += interest;
        total_principal += principal_portion;

        entries.push(AmortizationEntry {
            payment_number: number,
            payment_amount: amount,
            interest_paid: interest,
            principal_paid: principal_portion,
            remaining_balance: balance,
        });

        if balance <= Decimal::ZERO {
            break;
        }
    }

    if (entries.len() as u32) < n {
        warnings.push(format!(
            "Balance reached zero after {} of {} scheduled payments",
            entries.len(),
            n
        ));
    }

    let output = AmortizationScheduleOutput {
        entries,
        total_paid,
        total_interest,
        total_principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Amortization with Final-Period Adjustment",
        terms,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.01);

    fn reference_terms() -> LoanTerms {
        LoanTerms {
            principal: dec!(100000),
            annual_rate_percent: dec!(11.75),
            term_years: 20,
        }
    }

    #[test]
    fn test_zero_rate_schedule() {
        let terms = LoanTerms {
            principal: dec!(1200),
            annual_rate_percent: Decimal::ZERO,
            term_years: 1,
        };
        let out = amortization_schedule(&terms).unwrap().result;

        assert_eq!(out.entries.len(), 12);
        for entry in &out.entries {
            assert_eq!(entry.interest_paid, Decimal::ZERO);
            assert_eq!(entry.principal_paid, dec!(100.00));
        }
        assert_eq!(out.entries[11].remaining_balance, Decimal::ZERO);
        assert_eq!(out.total_principal, dec!(1200));
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_entry_composition() {
        let out = amortization_schedule(&reference_terms()).unwrap().result;
        for entry in &out.entries {
            let residual =
                (entry.payment_amount - entry.interest_paid - entry.principal_paid).abs();
            assert!(
                residual <= TOL,
                "Payment {} does not split into interest + principal (residual {})",
                entry.payment_number,
                residual
            );
        }
    }

    #[test]
    fn test_balance_monotonically_non_increasing() {
        let out = amortization_schedule(&reference_terms()).unwrap().result;
        let mut prev = reference_terms().principal;
        for entry in &out.entries {
            assert!(
                entry.remaining_balance <= prev,
                "Payment {}: balance {} exceeds prior balance {}",
                entry.payment_number,
                entry.remaining_balance,
                prev
            );
            prev = entry.remaining_balance;
        }
    }

    #[test]
    fn test_terminal_balance_zero() {
        let out = amortization_schedule(&reference_terms()).unwrap().result;
        let last = out.entries.last().unwrap();
        assert!(
            last.remaining_balance.abs() <= TOL,
            "Terminal balance should be ~0, got {}",
            last.remaining_balance
        );
        // Only the final entry may dip below zero.
        for entry in &out.entries[..out.entries.len() - 1] {
            assert!(
                entry.remaining_balance >= Decimal::ZERO,
                "Payment {}: negative balance before the final period",
                entry.payment_number
            );
        }
    }

    #[test]
    fn test_level_payments_until_final() {
        let out = amortization_schedule(&reference_terms()).unwrap().result;
        let payment = level_payment(&reference_terms()).unwrap();
        for entry in &out.entries[..out.entries.len() - 1] {
            assert_eq!(entry.payment_amount, payment);
        }
    }

    #[test]
    fn test_schedule_idempotent() {
        let first = amortization_schedule(&reference_terms()).unwrap().result;
        let second = amortization_schedule(&reference_terms()).unwrap().result;
        assert_eq!(first.entries, second.entries);
    }

    #[test]
    fn test_early_termination_on_overpaying_round() {
        // A tiny principal over a long term makes the upward payment
        // rounding retire the loan months before the contract runs out.
        let terms = LoanTerms {
            principal: dec!(9.70),
            annual_rate_percent: dec!(12),
            term_years: 30,
        };
        let result = amortization_schedule(&terms).unwrap();
        let out = &result.result;

        assert!(
            (out.entries.len() as u32) < terms.payment_count(),
            "Expected early payoff, got {} entries",
            out.entries.len()
        );
        assert!(out.entries.last().unwrap().remaining_balance <= Decimal::ZERO);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_invalid_terms_rejected() {
        let terms = LoanTerms {
            principal: dec!(-5),
            annual_rate_percent: dec!(5),
            term_years: 10,
        };
        assert!(amortization_schedule(&terms).is_err());
    }
}
