//! Salary parsing and display.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Parse user or wire text into a salary. Empty or unparseable text is zero.
pub fn parse_salary(text: &str) -> Decimal {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .unwrap_or(Decimal::ZERO)
}

/// Render a salary as currency with exactly two fraction digits.
pub fn format_salary(salary: Decimal) -> String {
    let rounded = salary.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("${rounded:.2}")
}
