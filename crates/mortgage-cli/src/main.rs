mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::LoanArgs;

/// Mortgage loan calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "mortgage",
    version,
    about = "Mortgage loan calculations with decimal precision",
    long_about = "A CLI for pricing fixed-rate mortgage loans with decimal precision. \
                  Computes the monthly repayment, total interest, total amount paid, \
                  and the full amortization schedule, either from flags or through an \
                  interactive session."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the level monthly repayment
    Repayment(LoanArgs),
    /// Calculate total interest paid over the life of the loan
    TotalInterest(LoanArgs),
    /// Calculate total amount paid over the life of the loan
    TotalPaid(LoanArgs),
    /// Generate the full amortization schedule
    Schedule(LoanArgs),
    /// Run an interactive pricing session
    Session,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Repayment(args) => commands::loan::run_repayment(args),
        Commands::TotalInterest(args) => commands::loan::run_total_interest(args),
        Commands::TotalPaid(args) => commands::loan::run_total_paid(args),
        Commands::Schedule(args) => commands::schedule::run_schedule(args),
        Commands::Session => {
            if let Err(e) = commands::session::run_session() {
                eprintln!("{}: {}", "error".red().bold(), e);
                process::exit(1);
            }
            return;
        }
        Commands::Version => {
            println!("mortgage {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
