use colored::Colorize;
use rust_decimal::Decimal;
use std::io::{self, Write};

/// Print a prompt and read one line from the terminal.
/// Errors on EOF so re-prompt loops cannot spin on a closed stdin.
pub fn read_line(label: &str) -> io::Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut buffer = String::new();
    if io::stdin().read_line(&mut buffer)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "stdin closed during interactive session",
        ));
    }
    Ok(buffer)
}

/// Prompt until the input parses as a decimal number.
pub fn decimal(label: &str) -> io::Result<Decimal> {
    loop {
        let line = read_line(&format!("{label}: "))?;
        match line.trim().parse::<Decimal>() {
            Ok(value) => return Ok(value),
            Err(_) => println!(
                "{}",
                "Invalid input. Please try again using numbers.".yellow()
            ),
        }
    }
}

/// Prompt until the input parses as a whole number of years.
pub fn years(label: &str) -> io::Result<u32> {
    loop {
        let line = read_line(&format!("{label}: "))?;
        match line.trim().parse::<u32>() {
            Ok(value) => return Ok(value),
            Err(_) => println!(
                "{}",
                "Invalid input. Please try again using whole numbers.".yellow()
            ),
        }
    }
}

/// Prompt once; blank or unparsable input falls back to the given default.
pub fn rate_with_default(label: &str, default: Decimal) -> io::Result<Decimal> {
    let line = read_line(&format!("{label}: "))?;
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    match trimmed.parse::<Decimal>() {
        Ok(value) => Ok(value),
        Err(_) => {
            println!(
                "{}",
                format!("Invalid input. Defaulting to the prime rate of {default}%.").yellow()
            );
            Ok(default)
        }
    }
}
