use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::loan::{self, LoanTerms};

use crate::input;

/// Arguments shared by every loan calculation
#[derive(Args)]
pub struct LoanArgs {
    /// Original loan amount
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a percentage, e.g. 11.75 (defaults to prime, 11.75)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term_years: Option<u32>,
}

/// Resolve loan terms from piped stdin JSON or from flags.
pub fn resolve_terms(args: &LoanArgs) -> Result<LoanTerms, Box<dyn std::error::Error>> {
    if let Some(terms) = input::stdin::read_terms()? {
        return Ok(terms);
    }

    let principal = args
        .principal
        .ok_or("--principal is required (or pipe a LoanTerms JSON object via stdin)")?;
    let term_years = args
        .term_years
        .ok_or("--term-years is required (or pipe a LoanTerms JSON object via stdin)")?;

    Ok(LoanTerms::new(principal, args.rate, term_years))
}

pub fn run_repayment(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = loan::monthly_repayment(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_total_interest(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = loan::total_interest_paid(&terms)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_total_paid(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = loan::total_amount_paid(&terms)?;
    Ok(serde_json::to_value(result)?)
}
