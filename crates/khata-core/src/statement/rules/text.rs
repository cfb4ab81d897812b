//! Narration text normalization.

use super::patterns::{NON_NARRATION_CHARS, WHITESPACE_RUN};

/// Normalize a narration or cell value into the canonical form every
/// downstream pattern assumes: upper-case, characters outside
/// `{word, whitespace, / @ . -}` replaced by spaces, whitespace runs
/// collapsed to a single space, trimmed.
pub fn normalize_text(raw: &str) -> String {
    let upper = raw.to_uppercase();
    let stripped = NON_NARRATION_CHARS.replace_all(&upper, " ");
    let collapsed = WHITESPACE_RUN.replace_all(&stripped, " ");
    collapsed.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_uppercases_and_collapses() {
        assert_eq!(
            normalize_text("upi/cr/1234/ravi   kumar"),
            "UPI/CR/1234/RAVI KUMAR"
        );
    }

    #[test]
    fn test_normalize_strips_currency_noise() {
        assert_eq!(normalize_text("₹ 1,234.50 (NEFT)"), "1 234.50 NEFT");
    }

    #[test]
    fn test_normalize_keeps_narration_charset() {
        assert_eq!(
            normalize_text("ravi@okhdfc a-1.b/c"),
            "RAVI@OKHDFC A-1.B/C"
        );
    }

    #[test]
    fn test_normalize_empty() {
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        let once = normalize_text("NEFT/HDFC0001/RAVI KUMAR");
        assert_eq!(normalize_text(&once), once);
    }
}
