//! Level-payment loan metrics: monthly repayment, total paid, total interest.
//!
//! Quoted figures follow the standard annuity formula with the monthly
//! payment rounded to currency precision. Totals multiply the rounded
//! payment by the period count rather than summing the
//! final-period-adjusted schedule; the two can differ by a few cents.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::MortgageError;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};
use crate::MortgageResult;

/// Prime-linked fallback rate (11.75%) used when no rate is quoted.
pub const DEFAULT_ANNUAL_RATE_PERCENT: Percent = dec!(11.75);

/// Currency precision for quoted figures.
const CURRENCY_DP: u32 = 2;

const MONTHS_PER_YEAR: Decimal = dec!(12);
const PERCENT_SCALE: Decimal = dec!(100);

/// Contract terms for a fixed-rate mortgage loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoanTerms {
    /// Original loan amount.
    pub principal: Money,
    /// Annual interest rate quoted as a percentage (11.75 = 11.75%).
    #[serde(default = "default_annual_rate")]
    pub annual_rate_percent: Percent,
    /// Contract length in years.
    pub term_years: u32,
}

fn default_annual_rate() -> Percent {
    DEFAULT_ANNUAL_RATE_PERCENT
}

impl LoanTerms {
    /// Build terms, substituting the prime default when no rate is given.
    pub fn new(principal: Money, annual_rate_percent: Option<Percent>, term_years: u32) -> Self {
        LoanTerms {
            principal,
            annual_rate_percent: annual_rate_percent.unwrap_or(DEFAULT_ANNUAL_RATE_PERCENT),
            term_years,
        }
    }

    /// Total number of monthly payments over the contract.
    pub fn payment_count(&self) -> u32 {
        self.term_years * 12
    }
}

/// Monthly repayment figure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepaymentOutput {
    pub monthly_repayment: Money,
    pub monthly_rate: Rate,
    pub payment_count: u32,
}

/// Total paid over the life of the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalPaidOutput {
    pub total_paid: Money,
    pub payment_count: u32,
}

/// Total interest paid over the life of the loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TotalInterestOutput {
    pub total_interest: Money,
    pub total_paid: Money,
    pub principal: Money,
}

/// Convert an annual percentage rate to a monthly fractional rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / MONTHS_PER_YEAR / PERCENT_SCALE
}

/// Level monthly payment for the terms, rounded to currency precision.
pub fn monthly_repayment(
    terms: &LoanTerms,
) -> MortgageResult<ComputationOutput<RepaymentOutput>> {
    let start = Instant::now();

    let payment = level_payment(terms)?;
    let output = RepaymentOutput {
        monthly_repayment: payment,
        monthly_rate: monthly_rate(terms.annual_rate_percent),
        payment_count: terms.payment_count(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level-Payment Annuity Formula",
        terms,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Total amount paid: rounded monthly payment times the period count.
pub fn total_amount_paid(
    terms: &LoanTerms,
) -> MortgageResult<ComputationOutput<TotalPaidOutput>> {
    let start = Instant::now();

    let payment = level_payment(terms)?;
    let total = (payment * Decimal::from(terms.payment_count())).round_dp(CURRENCY_DP);
    let output = TotalPaidOutput {
        total_paid: total,
        payment_count: terms.payment_count(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Level Payment × Period Count",
        terms,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Total interest paid: total amount paid less the principal.
pub fn total_interest_paid(
    terms: &LoanTerms,
) -> MortgageResult<ComputationOutput<TotalInterestOutput>> {
    let start = Instant::now();

    let payment = level_payment(terms)?;
    let total = (payment * Decimal::from(terms.payment_count())).round_dp(CURRENCY_DP);
    let interest = (total - terms.principal).round_dp(CURRENCY_DP);
    let output = TotalInterestOutput {
        total_interest: interest,
        total_paid: total,
        principal: terms.principal,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Total Paid Less Principal",
        terms,
        Vec::new(),
        elapsed,
        output,
    ))
}

/// Raw level payment: validates terms and applies the annuity formula.
///
/// Zero-rate terms degenerate to straight division of the principal, since
/// the annuity denominator vanishes.
pub(crate) fn level_payment(terms: &LoanTerms) -> MortgageResult<Money> {
    validate(terms)?;

    let n = terms.payment_count();
    let r = monthly_rate(terms.annual_rate_percent);

    if r.is_zero() {
        return Ok((terms.principal / Decimal::from(n)).round_dp(CURRENCY_DP));
    }

    let growth = (Decimal::ONE + r).powd(Decimal::from(n));
    let annuity_factor = growth - Decimal::ONE;
    if annuity_factor.is_zero() {
        return Err(MortgageError::DivisionByZero {
            context: "annuity factor".into(),
        });
    }

    Ok((terms.principal * r * growth / annuity_factor).round_dp(CURRENCY_DP))
}

pub(crate) fn validate(terms: &LoanTerms) -> MortgageResult<()> {
    if terms.principal <= Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "principal".into(),
            reason: "Loan amount must be positive".into(),
        });
    }
    if terms.term_years == 0 {
        return Err(MortgageError::InvalidInput {
            field: "term_years".into(),
            reason: "Loan term must be at least 1 year".into(),
        });
    }
    if terms.annual_rate_percent < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "annual_rate_percent".into(),
            reason: "Interest rate cannot be negative".into(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn reference_terms() -> LoanTerms {
        LoanTerms {
            principal: dec!(100000),
            annual_rate_percent: dec!(11.75),
            term_years: 20,
        }
    }

    #[test]
    fn test_monthly_rate_conversion() {
        assert_eq!(monthly_rate(dec!(12)), dec!(0.01));
        assert_eq!(monthly_rate(Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn test_reference_repayment() {
        // 100k at 11.75% over 20 years: annuity payment ~1083.71
        let result = monthly_repayment(&reference_terms()).unwrap();
        let diff = (result.result.monthly_repayment - dec!(1083.71)).abs();
        assert!(
            diff <= dec!(0.01),
            "Expected ~1083.71, got {}",
            result.result.monthly_repayment
        );
        assert_eq!(result.result.payment_count, 240);
    }

    #[test]
    fn test_thirty_year_reference() {
        // 300k at 6% over 30 years: standard tables give 1798.65
        let terms = LoanTerms {
            principal: dec!(300000),
            annual_rate_percent: dec!(6),
            term_years: 30,
        };
        let result = monthly_repayment(&terms).unwrap();
        let diff = (result.result.monthly_repayment - dec!(1798.65)).abs();
        assert!(
            diff <= dec!(0.01),
            "Expected ~1798.65, got {}",
            result.result.monthly_repayment
        );
    }

    #[test]
    fn test_zero_rate_divides_principal() {
        let terms = LoanTerms {
            principal: dec!(1200),
            annual_rate_percent: Decimal::ZERO,
            term_years: 1,
        };
        let result = monthly_repayment(&terms).unwrap();
        assert_eq!(result.result.monthly_repayment, dec!(100.00));
    }

    #[test]
    fn test_repayment_positive() {
        let cases = [
            (dec!(50000), dec!(3.5), 10u32),
            (dec!(250000), dec!(11.75), 25),
            (dec!(1), dec!(0.01), 1),
        ];
        for (principal, rate, years) in cases {
            let terms = LoanTerms {
                principal,
                annual_rate_percent: rate,
                term_years: years,
            };
            let result = monthly_repayment(&terms).unwrap();
            assert!(
                result.result.monthly_repayment > Decimal::ZERO,
                "Payment should be positive for {principal} at {rate}% over {years}y"
            );
        }
    }

    #[test]
    fn test_total_paid_is_payment_times_periods() {
        let terms = reference_terms();
        let payment = monthly_repayment(&terms).unwrap().result.monthly_repayment;
        let total = total_amount_paid(&terms).unwrap().result.total_paid;
        assert_eq!(total, payment * dec!(240));
    }

    #[test]
    fn test_total_interest_is_total_less_principal() {
        let terms = reference_terms();
        let totals = total_amount_paid(&terms).unwrap().result;
        let interest = total_interest_paid(&terms).unwrap().result;
        assert_eq!(interest.total_interest, totals.total_paid - terms.principal);
        assert_eq!(interest.total_paid, totals.total_paid);
    }

    #[test]
    fn test_default_rate_applied() {
        let terms = LoanTerms::new(dec!(100000), None, 20);
        assert_eq!(terms.annual_rate_percent, dec!(11.75));

        let explicit = LoanTerms::new(dec!(100000), Some(dec!(6)), 20);
        assert_eq!(explicit.annual_rate_percent, dec!(6));
    }

    #[test]
    fn test_serde_default_rate() {
        let terms: LoanTerms =
            serde_json::from_str(r#"{"principal": "100000", "term_years": 20}"#).unwrap();
        assert_eq!(terms.annual_rate_percent, DEFAULT_ANNUAL_RATE_PERCENT);
    }

    #[test]
    fn test_zero_principal_error() {
        let terms = LoanTerms {
            principal: Decimal::ZERO,
            annual_rate_percent: dec!(5),
            term_years: 10,
        };
        assert!(monthly_repayment(&terms).is_err());
        assert!(total_amount_paid(&terms).is_err());
        assert!(total_interest_paid(&terms).is_err());
    }

    #[test]
    fn test_zero_term_error() {
        let terms = LoanTerms {
            principal: dec!(100000),
            annual_rate_percent: dec!(5),
            term_years: 0,
        };
        assert!(monthly_repayment(&terms).is_err());
    }

    #[test]
    fn test_negative_rate_error() {
        let terms = LoanTerms {
            principal: dec!(100000),
            annual_rate_percent: dec!(-1),
            term_years: 10,
        };
        assert!(monthly_repayment(&terms).is_err());
    }

    #[test]
    fn test_metadata_populated() {
        let result = monthly_repayment(&reference_terms()).unwrap();
        assert!(result.methodology.contains("Annuity"));
        assert_eq!(result.metadata.precision, "rust_decimal_128bit");
    }
}
