use serde_json::Value;

use mortgage_core::schedule;

use crate::commands::loan::{resolve_terms, LoanArgs};

pub fn run_schedule(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let terms = resolve_terms(&args)?;
    let result = schedule::amortization_schedule(&terms)?;
    Ok(serde_json::to_value(result)?)
}
