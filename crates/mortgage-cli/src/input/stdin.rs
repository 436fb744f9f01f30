use std::io::{self, Read};

use mortgage_core::loan::LoanTerms;

/// Attempt to read a LoanTerms JSON object from stdin if data is being
/// piped. Returns None if stdin is a TTY (interactive) or empty. A missing
/// annual_rate_percent field takes the prime default.
pub fn read_terms() -> Result<Option<LoanTerms>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let terms: LoanTerms = serde_json::from_str(trimmed)?;
    Ok(Some(terms))
}
