//! Date normalization for statement fields.
//!
//! Dates are carried as strings in the canonical `DD/MM/YYYY` form; a
//! value that matches no known format is passed through normalized but
//! otherwise untouched, never dropped.

use chrono::NaiveDate;

use super::text::normalize_text;

/// Input formats tried in order. Month-name variants come before numeric
/// ones because `01-03-2024` style inputs are ambiguous against them, and
/// `%y` before `%Y` since chrono's `%Y` also consumes two-digit years.
pub const DATE_FORMATS: [&str; 5] = [
    "%d-%b-%y",
    "%d-%b-%Y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%Y-%m-%d",
];

/// Canonical output format.
pub const OUTPUT_FORMAT: &str = "%d/%m/%Y";

/// Normalize a raw date cell or token to `DD/MM/YYYY`. The first matching
/// format wins; on no match the normalized input is returned unchanged.
pub fn normalize_date(raw: &str) -> String {
    let text = normalize_text(raw);
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(&text, format) {
            return date.format(OUTPUT_FORMAT).to_string();
        }
    }
    text
}

/// Build a canonical date from numeric day/month/year captures. Two-digit
/// years expand with the same 1968 pivot chrono uses for `%y`. Returns
/// `None` when the parts do not form a real calendar date.
pub fn date_from_numeric(day: u32, month: u32, year: i32) -> Option<String> {
    let year = expand_year(year);
    NaiveDate::from_ymd_opt(year, month, day).map(|d| d.format(OUTPUT_FORMAT).to_string())
}

/// Month number for a three-letter English abbreviation.
pub fn month_number(mon: &str) -> Option<u32> {
    match mon.to_uppercase().as_str() {
        "JAN" => Some(1),
        "FEB" => Some(2),
        "MAR" => Some(3),
        "APR" => Some(4),
        "MAY" => Some(5),
        "JUN" => Some(6),
        "JUL" => Some(7),
        "AUG" => Some(8),
        "SEP" => Some(9),
        "OCT" => Some(10),
        "NOV" => Some(11),
        "DEC" => Some(12),
        _ => None,
    }
}

fn expand_year(year: i32) -> i32 {
    if year < 100 {
        if year <= 68 {
            2000 + year
        } else {
            1900 + year
        }
    } else {
        year
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_month_name_date() {
        assert_eq!(normalize_date("01-Jan-2024"), "01/01/2024");
    }

    #[test]
    fn test_normalize_two_digit_year() {
        assert_eq!(normalize_date("05-Mar-24"), "05/03/2024");
    }

    #[test]
    fn test_normalize_iso_date() {
        assert_eq!(normalize_date("2024-01-15"), "15/01/2024");
    }

    #[test]
    fn test_normalize_passes_canonical_through() {
        assert_eq!(normalize_date("15/03/2024"), "15/03/2024");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let once = normalize_date("01-Jan-2024");
        assert_eq!(normalize_date(&once), once);
    }

    #[test]
    fn test_unrecognized_date_passes_through() {
        assert_eq!(normalize_date("not a date"), "NOT A DATE");
    }

    #[test]
    fn test_date_from_numeric() {
        assert_eq!(date_from_numeric(5, 3, 2024).as_deref(), Some("05/03/2024"));
        assert_eq!(date_from_numeric(5, 3, 24).as_deref(), Some("05/03/2024"));
        assert_eq!(date_from_numeric(5, 3, 99).as_deref(), Some("05/03/1999"));
    }

    #[test]
    fn test_date_from_numeric_rejects_impossible() {
        assert_eq!(date_from_numeric(31, 2, 2024), None);
    }

    #[test]
    fn test_month_number() {
        assert_eq!(month_number("Mar"), Some(3));
        assert_eq!(month_number("DEC"), Some(12));
        assert_eq!(month_number("XYZ"), None);
    }
}
