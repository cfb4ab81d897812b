//! Amount parsing and plausibility filtering.

use super::patterns::AMOUNT_TOKEN;

/// Smallest value accepted as a transaction amount.
pub const PLAUSIBLE_MIN: f64 = 1.0;

/// Largest value accepted as a transaction amount; larger tokens are
/// running balances or reference numbers.
pub const PLAUSIBLE_MAX: f64 = 999_999.0;

/// Sanity bound for running balances. Tokens above this are account
/// numbers or other identifiers, never money.
pub const BALANCE_MAX: f64 = 100_000_000.0;

/// Amount tokens found in one row or block, in extraction order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AmountScan {
    /// Values inside the plausible transaction range.
    pub amounts: Vec<f64>,
    /// Last token too large for a transaction but small enough for a
    /// running balance.
    pub trailing_balance: Option<f64>,
}

/// Parse a single cell or token into a float. Total function: strips
/// everything except digits, `.` and `-`, and returns 0.0 when nothing
/// parseable remains.
pub fn parse_amount(raw: &str) -> f64 {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();
    cleaned.parse().unwrap_or(0.0)
}

/// `true` when a value sits in the plausible transaction-amount range.
pub fn is_plausible(value: f64) -> bool {
    (PLAUSIBLE_MIN..=PLAUSIBLE_MAX).contains(&value)
}

/// Scan text for `1,23,456.00`-shaped tokens and split them into plausible
/// transaction amounts (order preserved) and an optional trailing balance.
pub fn scan_amounts(text: &str) -> AmountScan {
    let mut scan = AmountScan::default();

    for token in AMOUNT_TOKEN.find_iter(text) {
        let value = parse_amount(token.as_str());
        if is_plausible(value) {
            scan.amounts.push(value);
        } else if value > PLAUSIBLE_MAX && value <= BALANCE_MAX {
            scan.trailing_balance = Some(value);
        }
    }

    scan
}
