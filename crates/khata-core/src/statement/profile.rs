//! Best-effort account holder extraction from sheet headers.

use crate::models::transaction::AccountProfile;

use super::rules::patterns::{ACCOUNT_HOLDER, ACCOUNT_NUMBER};
use super::rules::text::normalize_text;

/// Scan the leading rows of a sheet for account holder name and number.
/// Non-fatal when absent; either field may stay empty.
pub fn extract_profile(rows: &[Vec<String>], scan_rows: usize) -> AccountProfile {
    let header_text = rows
        .iter()
        .take(scan_rows)
        .flat_map(|row| row.iter())
        .map(|cell| normalize_text(cell))
        .filter(|cell| !cell.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let mut profile = AccountProfile::default();

    if let Some(caps) = ACCOUNT_HOLDER.captures(&header_text) {
        profile.account_holder_name = Some(caps[1].trim().to_string());
    }

    // Label words like HOLDER satisfy the character class; the first
    // candidate carrying a digit is the real account number.
    profile.account_number = ACCOUNT_NUMBER
        .captures_iter(&header_text)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .find(|number| number.chars().any(|c| c.is_ascii_digit()))
        .map(str::to_string);

    profile
}
