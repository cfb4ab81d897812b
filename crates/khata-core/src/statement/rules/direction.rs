//! Credit/debit disambiguation for single-amount rows.

use super::patterns::{CREDIT_MARKER, DEBIT_MARKER};

/// Resolved movement direction of an undifferentiated amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Credit,
    Debit,
}

/// Decide whether a narration describes a credit or a debit.
///
/// Explicit markers win; when both kinds occur the rightmost occurrence
/// decides, since trailing `/CR/`-style codes are more specific than
/// leading words. With no marker at all, a small phrase table is tried,
/// and the final default is debit.
pub fn infer_direction(text: &str) -> Direction {
    let credit_pos = CREDIT_MARKER.find_iter(text).last().map(|m| m.start());
    let debit_pos = DEBIT_MARKER.find_iter(text).last().map(|m| m.start());

    match (credit_pos, debit_pos) {
        (Some(c), Some(d)) => {
            if d > c {
                Direction::Debit
            } else {
                Direction::Credit
            }
        }
        (Some(_), None) => Direction::Credit,
        (None, Some(_)) => Direction::Debit,
        (None, None) => phrase_fallback(text),
    }
}

fn phrase_fallback(text: &str) -> Direction {
    const PHRASES: [(&str, Direction); 4] = [
        ("PAID TO", Direction::Debit),
        ("RECEIVED FROM", Direction::Credit),
        ("DEPOSIT", Direction::Credit),
        ("WITHDRAWAL", Direction::Debit),
    ];

    for (phrase, direction) in PHRASES {
        if text.contains(phrase) {
            return direction;
        }
    }

    Direction::Debit
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_marker() {
        assert_eq!(infer_direction("SALARY FOR JULY"), Direction::Credit);
        assert_eq!(infer_direction("NEFT CREDIT RAVI"), Direction::Credit);
    }

    #[test]
    fn test_debit_marker() {
        assert_eq!(infer_direction("ATM WDL KANDIVALI"), Direction::Debit);
        assert_eq!(infer_direction("PAID VIA CARD"), Direction::Debit);
    }

    #[test]
    fn test_rightmost_marker_wins() {
        assert_eq!(
            infer_direction("PAYMENT CR TO MERCHANT DR"),
            Direction::Debit
        );
        assert_eq!(infer_direction("DR REVERSAL CREDIT"), Direction::Credit);
    }

    #[test]
    fn test_phrase_fallback_catches_compounds() {
        // DEPOSITS defeats the word-boundary marker but not the phrase scan
        assert_eq!(infer_direction("FIXED DEPOSITS RENEWAL"), Direction::Credit);
    }

    #[test]
    fn test_default_is_debit() {
        assert_eq!(infer_direction("POS 4412 BIG BAZAAR"), Direction::Debit);
    }
}
