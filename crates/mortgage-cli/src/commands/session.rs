use colored::Colorize;

use mortgage_core::loan::{self, LoanTerms, DEFAULT_ANNUAL_RATE_PERCENT};
use mortgage_core::schedule;

use crate::input::prompt;
use crate::output::table;

/// Interactive pricing session: gather loan terms, then loop over the
/// calculation menu until the user is done.
pub fn run_session() -> Result<(), Box<dyn std::error::Error>> {
    println!();
    println!("{}", "Welcome to the mortgage desk.".bold());

    loop {
        println!();
        println!("What would you like to do?");
        println!("  1. Price a loan");
        println!("  2. Exit");
        let choice = prompt::read_line("> ")?;

        match choice.trim() {
            "1" => {
                let terms = gather_terms()?;
                calculation_loop(&terms)?;
                println!();
                println!("Thank you for using the mortgage calculator.");
                return Ok(());
            }
            "2" => return Ok(()),
            _ => println!("{}", "Incorrect option. Please try again.".yellow()),
        }
    }
}

/// Prompt for principal, rate, and term, re-prompting on unparsable input.
/// A blank or unparsable rate falls back to the prime default.
fn gather_terms() -> Result<LoanTerms, Box<dyn std::error::Error>> {
    println!();
    let principal = prompt::decimal("Loan amount")?;
    let rate = prompt::rate_with_default(
        &format!(
            "Annual interest rate % (blank for the prime rate, {}%)",
            DEFAULT_ANNUAL_RATE_PERCENT
        ),
        DEFAULT_ANNUAL_RATE_PERCENT,
    )?;
    let term_years = prompt::years("Mortgage term in years")?;
    Ok(LoanTerms::new(principal, Some(rate), term_years))
}

fn calculation_loop(terms: &LoanTerms) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        println!();
        println!("What would you like to calculate?");
        println!("  1. Monthly repayment");
        println!("  2. Total interest paid over the life of the loan");
        println!("  3. Total amount paid over the life of the loan");
        println!("  4. Amortization schedule");
        let choice = prompt::read_line("> ")?;

        match choice.trim() {
            "1" => match loan::monthly_repayment(terms) {
                Ok(r) => println!("Monthly repayment: {}", r.result.monthly_repayment),
                Err(e) => println!("{}: {}", "error".red().bold(), e),
            },
            "2" => match loan::total_interest_paid(terms) {
                Ok(r) => println!("Total interest paid: {}", r.result.total_interest),
                Err(e) => println!("{}: {}", "error".red().bold(), e),
            },
            "3" => match loan::total_amount_paid(terms) {
                Ok(r) => println!("Total amount paid: {}", r.result.total_paid),
                Err(e) => println!("{}: {}", "error".red().bold(), e),
            },
            "4" => match schedule::amortization_schedule(terms) {
                Ok(r) => table::print_table(&serde_json::to_value(r)?),
                Err(e) => println!("{}: {}", "error".red().bold(), e),
            },
            _ => {
                println!("{}", "Invalid choice. Please choose 1-4.".yellow());
                continue;
            }
        }

        println!();
        let again = prompt::read_line("Perform another calculation? (yes/no) ")?;
        if !again.trim().eq_ignore_ascii_case("yes") {
            return Ok(());
        }
    }
}
