//! Transaction extraction from free-text (page-oriented) statements.
//!
//! Pages arrive as plain text in reading order. Boilerplate lines are
//! dropped, the remainder is segmented into date-anchored blocks, and
//! each block is assembled into one transaction candidate.

use tracing::{debug, info};

use crate::error::ExtractionError;
use crate::models::transaction::{round3, Source, Transaction};

use super::assemble::resolve_amounts;
use super::categorize::categorize;
use super::rules::amounts::scan_amounts;
use super::rules::dates::{date_from_numeric, month_number, normalize_date};
use super::rules::direction::infer_direction;
use super::rules::party::PartyExtractor;
use super::rules::patterns::{
    AMOUNT_TOKEN, BOILERPLATE_PHRASES, DATE_MON, DATE_MON_DANGLING, DATE_NUMERIC, TRANSFER_FLAG,
    UPI_FLAG, YEAR_LEAD,
};
use super::rules::text::normalize_text;
use super::{Result, StatementExtraction};

/// Parser for free-text statement pages.
pub struct DocumentParser {
    party: PartyExtractor,
}

impl DocumentParser {
    pub fn new() -> Self {
        Self {
            party: PartyExtractor::new(Source::Pdf),
        }
    }

    /// Parse per-page plain text into transactions.
    ///
    /// A document from which nothing can be extracted is an error; free-text
    /// statements have no header contract, so an empty result means the
    /// layout was not understood at all.
    pub fn parse(&self, pages: &[String], filename: &str) -> Result<StatementExtraction> {
        if pages.is_empty() {
            return Err(ExtractionError::NoPages);
        }

        info!("Parsing {} page(s) from {}", pages.len(), filename);
        let mut extraction = StatementExtraction::default();

        for (idx, page) in pages.iter().enumerate() {
            let lines: Vec<&str> = page
                .lines()
                .map(str::trim)
                .filter(|line| !line.is_empty() && !is_boilerplate(line))
                .collect();

            let before = extraction.transactions.len();
            for block in segment_blocks(&lines) {
                if let Some(transaction) = self.parse_block(&block, idx, filename) {
                    extraction.transactions.push(transaction);
                }
            }
            debug!(
                "Page {}: {} transactions",
                idx + 1,
                extraction.transactions.len() - before
            );
        }

        if extraction.transactions.is_empty() {
            return Err(ExtractionError::NoTransactions);
        }

        Ok(extraction)
    }

    fn parse_block(&self, lines: &[&str], page: usize, filename: &str) -> Option<Transaction> {
        let full = lines.join(" ");

        let date = resolve_block_date(lines, &full);

        // Year continuation lines are layout noise; the narration lives on
        // the remaining lines.
        let narration = lines
            .iter()
            .filter(|line| !YEAR_LEAD.is_match(line))
            .copied()
            .collect::<Vec<_>>()
            .join(" ");
        let description = normalize_text(&strip_statement_tokens(&narration));

        let scan = scan_amounts(&full);
        let direction = infer_direction(&full);
        let fields = resolve_amounts(&scan, direction);

        if description.is_empty()
            && fields.amount == 0.0
            && fields.credit == 0.0
            && fields.debit == 0.0
        {
            return None;
        }

        let (party, confidence) = self.party.extract(&description);
        let classification = categorize(&description, fields.credit, fields.debit);
        let is_upi = UPI_FLAG.is_match(&description);
        let is_transfer = TRANSFER_FLAG.is_match(&description);

        Some(Transaction {
            date,
            description,
            amount: fields.amount,
            credit: fields.credit,
            debit: fields.debit,
            balance: fields.balance,
            party: party.clone(),
            detected_party: party,
            party_confidence: round3(confidence),
            category: classification.category,
            merchant_risk_score: classification.merchant_risk_score,
            narration_risk_confidence: classification.narration_risk_confidence,
            behavioral_deviation: classification.behavioral_deviation,
            is_upi,
            is_transfer,
            source: Source::Pdf,
            source_file: filename.to_string(),
            source_sheet: None,
            source_page: Some(page),
        })
    }
}

impl Default for DocumentParser {
    fn default() -> Self {
        Self::new()
    }
}

fn is_boilerplate(line: &str) -> bool {
    let upper = line.to_uppercase();
    BOILERPLATE_PHRASES.iter().any(|phrase| upper.contains(phrase))
}

fn opens_block(line: &str) -> bool {
    DATE_MON.is_match(line) || DATE_NUMERIC.is_match(line) || DATE_MON_DANGLING.is_match(line)
}

/// Group lines into date-anchored blocks. A date-bearing line opens a new
/// block and following lines attach to it; lines before the first anchor
/// are page noise.
fn segment_blocks<'a>(lines: &[&'a str]) -> Vec<Vec<&'a str>> {
    let mut blocks = Vec::new();
    let mut current: Vec<&'a str> = Vec::new();

    for &line in lines {
        if opens_block(line) {
            if !current.is_empty() {
                blocks.push(current);
            }
            current = vec![line];
        } else if !current.is_empty() {
            current.push(line);
        }
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
}

/// Resolve a block's date: inline `DD-Mon-YY[YY]` first, then numeric
/// forms, then the split layout with the year on the continuation line.
fn resolve_block_date(lines: &[&str], full: &str) -> Option<String> {
    if let Some(m) = DATE_MON.find(full) {
        return Some(normalize_date(m.as_str()));
    }

    if let Some(caps) = DATE_NUMERIC.captures(full) {
        let token = caps.get(0).map_or("", |m| m.as_str());
        let parsed = match (
            caps[1].parse::<u32>(),
            caps[2].parse::<u32>(),
            caps[3].parse::<i32>(),
        ) {
            (Ok(day), Ok(month), Ok(year)) => date_from_numeric(day, month, year),
            _ => None,
        };
        return Some(parsed.unwrap_or_else(|| normalize_date(token)));
    }

    dangling_year_date(lines)
}

// Split layouts wrap "05-Mar-" at the date column edge, with the year
// opening the next line.
fn dangling_year_date(lines: &[&str]) -> Option<String> {
    let caps = DATE_MON_DANGLING.captures(lines.first()?)?;
    let year_caps = YEAR_LEAD.captures(lines.get(1)?)?;

    let day = caps.get(1)?.as_str().parse().ok()?;
    let month = month_number(caps.get(2)?.as_str())?;
    let year = year_caps.get(1)?.as_str().parse().ok()?;
    date_from_numeric(day, month, year)
}

/// Remove date and amount tokens from a block's text, leaving narration.
fn strip_statement_tokens(text: &str) -> String {
    let cleaned = DATE_MON.replace_all(text, " ");
    let cleaned = DATE_MON_DANGLING.replace_all(&cleaned, " ");
    let cleaned = DATE_NUMERIC.replace_all(&cleaned, " ");
    AMOUNT_TOKEN.replace_all(&cleaned, " ").into_owned()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::transaction::{BehavioralDeviation, Category};

    #[test]
    fn test_boilerplate_detection() {
        assert!(is_boilerplate("Statement of Account"));
        assert!(is_boilerplate("OPENING BALANCE 10,000.00"));
        assert!(is_boilerplate("Page total DEBITS CREDITS"));
        assert!(!is_boilerplate("05-Mar-24 ATM WDL 2,000.00"));
    }

    #[test]
    fn test_segment_blocks_attaches_continuations() {
        let lines = vec![
            "SAVINGS STATEMENT JULY",
            "01/02/2024 UPI/CR/5001/SURESH KUMAR 1,200.00 11,700.00",
            "REF 400123",
            "02/02/2024 TRANSFER TO GUPTA STORES 3,500.00 8,200.00",
        ];
        let blocks = segment_blocks(&lines);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].len(), 2);
        assert_eq!(blocks[1].len(), 1);
    }

    #[test]
    fn test_parse_single_line_withdrawal() {
        let parser = DocumentParser::new();
        let pages = vec!["05-Mar-24 ATM WDL 2,000.00 0.00 8,500.00".to_string()];
        let extraction = parser.parse(&pages, "statement.pdf").unwrap();

        assert_eq!(extraction.transactions.len(), 1);
        let txn = &extraction.transactions[0];
        assert_eq!(txn.date.as_deref(), Some("05/03/2024"));
        assert_eq!(txn.description, "ATM WDL");
        assert_eq!(txn.debit, 2000.0);
        assert_eq!(txn.credit, 0.0);
        assert_eq!(txn.amount, -2000.0);
        assert_eq!(txn.balance, 8500.0);
        assert_eq!(txn.category, Category::CashFlow);
        assert_eq!(txn.source_page, Some(0));
    }

    #[test]
    fn test_parse_split_year_layout() {
        let parser = DocumentParser::new();
        let pages = vec![
            "05-Mar- DEP TFR FROM RAVI KUMAR 5,000.00 12,500.00\n2024 2024".to_string(),
        ];
        let extraction = parser.parse(&pages, "statement.pdf").unwrap();

        assert_eq!(extraction.transactions.len(), 1);
        let txn = &extraction.transactions[0];
        assert_eq!(txn.date.as_deref(), Some("05/03/2024"));
        assert_eq!(txn.party.as_deref(), Some("RAVI KUMAR"));
        assert_eq!(txn.party_confidence, 0.85);
        assert_eq!(txn.debit, 5000.0);
        assert_eq!(txn.balance, 12500.0);
    }

    #[test]
    fn test_parse_multiple_blocks_with_continuation() {
        let parser = DocumentParser::new();
        let pages = vec![
            "01/02/2024 UPI/CR/5001/SURESH KUMAR 1,200.00 11,700.00\n\
             REF 400123\n\
             02/02/2024 TRANSFER TO GUPTA STORES 3,500.00 8,200.00"
                .to_string(),
        ];
        let extraction = parser.parse(&pages, "statement.pdf").unwrap();

        assert_eq!(extraction.transactions.len(), 2);
        let first = &extraction.transactions[0];
        assert_eq!(first.date.as_deref(), Some("01/02/2024"));
        assert_eq!(first.party.as_deref(), Some("SURESH"));
        assert_eq!(first.credit, 1200.0);
        assert_eq!(first.balance, 11700.0);
        assert!(first.description.contains("REF 400123"));

        let second = &extraction.transactions[1];
        assert_eq!(second.party.as_deref(), Some("GUPTA STORES"));
        assert_eq!(second.amount, -3500.0);
    }

    #[test]
    fn test_boilerplate_pages_do_not_become_transactions() {
        let parser = DocumentParser::new();
        let pages = vec![
            "STATEMENT OF ACCOUNT\n\
             ACCOUNT NO : 123456789012\n\
             OPENING BALANCE 10,000.00\n\
             01/02/2024 UPI/DR/9001/MEENA STORES 250.00 9,750.00"
                .to_string(),
        ];
        let extraction = parser.parse(&pages, "statement.pdf").unwrap();

        assert_eq!(extraction.transactions.len(), 1);
        assert_eq!(extraction.transactions[0].debit, 250.0);
    }

    #[test]
    fn test_no_pages_is_an_error() {
        let parser = DocumentParser::new();
        assert!(matches!(
            parser.parse(&[], "statement.pdf"),
            Err(ExtractionError::NoPages)
        ));
    }

    #[test]
    fn test_unreadable_document_is_an_error() {
        let parser = DocumentParser::new();
        let pages = vec!["no transactions here\njust prose".to_string()];
        assert!(matches!(
            parser.parse(&pages, "statement.pdf"),
            Err(ExtractionError::NoTransactions)
        ));
    }

    #[test]
    fn test_high_value_credit_block() {
        let parser = DocumentParser::new();
        let pages = vec!["01-Jan-2024 NEFT SALARY CREDIT 2,50,000.00 2,61,000.00".to_string()];
        let extraction = parser.parse(&pages, "statement.pdf").unwrap();

        let txn = &extraction.transactions[0];
        assert_eq!(txn.credit, 250000.0);
        assert_eq!(txn.category, Category::Income);
        assert_eq!(txn.behavioral_deviation, BehavioralDeviation::HighValue);
    }
}
