//! Transaction extraction from tabular (spreadsheet) statements.
//!
//! The header row position is unknown on entry; it is detected by keyword
//! count, heterogeneous column labels are mapped onto the canonical set,
//! and every following row becomes a transaction candidate.

use tracing::{debug, info, warn};

use crate::error::ExtractionError;
use crate::models::config::ExtractionConfig;
use crate::models::transaction::{round3, Source, Transaction};

use super::assemble::resolve_columns;
use super::categorize::categorize;
use super::profile::extract_profile;
use super::rules::amounts::parse_amount;
use super::rules::dates::normalize_date;
use super::rules::party::PartyExtractor;
use super::rules::patterns::{HEADER_KEYWORDS, TRANSFER_FLAG, UPI_FLAG};
use super::rules::text::normalize_text;
use super::{Result, StatementExtraction};

/// One sheet of raw cell values, reading order preserved, header row
/// position unknown.
#[derive(Debug, Clone)]
pub struct SheetGrid {
    pub name: String,
    pub rows: Vec<Vec<String>>,
}

impl SheetGrid {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<String>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }
}

/// Canonical column positions resolved from a header row.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct ColumnMap {
    date: Option<usize>,
    description: Option<usize>,
    credit: Option<usize>,
    debit: Option<usize>,
    balance: Option<usize>,
    amount: Option<usize>,
}

/// Parser for tabular statement sheets.
pub struct SheetParser {
    config: ExtractionConfig,
    party: PartyExtractor,
}

impl SheetParser {
    pub fn new() -> Self {
        Self {
            config: ExtractionConfig::default(),
            party: PartyExtractor::new(Source::Excel),
        }
    }

    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse every sheet of a workbook into one extraction result.
    ///
    /// Sheets without a recognizable header contribute no transactions
    /// but do not fail the document; account profiles found on any sheet
    /// merge last-write-wins.
    pub fn parse(&self, sheets: &[SheetGrid], filename: &str) -> Result<StatementExtraction> {
        if sheets.is_empty() {
            return Err(ExtractionError::NoSheets);
        }

        info!("Parsing {} sheet(s) from {}", sheets.len(), filename);
        let mut extraction = StatementExtraction::default();

        for sheet in sheets {
            let sheet_profile = extract_profile(&sheet.rows, self.config.profile_scan_rows);
            extraction.profile.merge(sheet_profile);

            let header_idx = match detect_header_row(&sheet.rows, self.config.header_scan_rows) {
                Some(idx) => idx,
                None => {
                    warn!("Sheet '{}' skipped: no header row found", sheet.name);
                    continue;
                }
            };

            let columns = map_columns(&sheet.rows[header_idx]);
            let before = extraction.transactions.len();
            for row in &sheet.rows[header_idx + 1..] {
                if let Some(transaction) = self.parse_row(&columns, row, filename, &sheet.name) {
                    extraction.transactions.push(transaction);
                }
            }
            debug!(
                "Sheet '{}': {} transactions",
                sheet.name,
                extraction.transactions.len() - before
            );
        }

        Ok(extraction)
    }

    fn parse_row(
        &self,
        columns: &ColumnMap,
        row: &[String],
        filename: &str,
        sheet: &str,
    ) -> Option<Transaction> {
        let cell = |idx: Option<usize>| {
            idx.and_then(|i| row.get(i))
                .map(String::as_str)
                .unwrap_or("")
        };

        let date_raw = cell(columns.date);
        let description = normalize_text(cell(columns.description));

        let credit = parse_amount(cell(columns.credit));
        let debit = parse_amount(cell(columns.debit));
        let balance = parse_amount(cell(columns.balance));
        let amount_col = parse_amount(cell(columns.amount));

        if credit == 0.0 && debit == 0.0 && amount_col == 0.0 && description.is_empty() {
            debug!("Row skipped: no usable fields");
            return None;
        }

        let date = if date_raw.trim().is_empty() {
            None
        } else {
            Some(normalize_date(date_raw))
        };

        let fields = resolve_columns(credit, debit, balance, amount_col, &description);
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
            source: Source::Excel,
            source_file: filename.to_string(),
            source_sheet: Some(sheet.to_string()),
            source_page: None,
        })
    }
}

impl Default for SheetParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Find the first row whose normalized text contains at least two of the
/// canonical header keywords.
fn detect_header_row(rows: &[Vec<String>], limit: Option<usize>) -> Option<usize> {
    let scan = limit.unwrap_or(rows.len());

    for (idx, row) in rows.iter().take(scan).enumerate() {
        let text = row
            .iter()
            .map(|c| normalize_text(c))
            .filter(|c| !c.is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        let hits = HEADER_KEYWORDS.iter().filter(|k| text.contains(*k)).count();
        if hits >= 2 {
            return Some(idx);
        }
    }

    None
}

/// Map header labels onto canonical columns by substring match. The first
/// label claiming a canonical slot wins; unrecognized columns are ignored.
fn map_columns(header: &[String]) -> ColumnMap {
    let mut map = ColumnMap::default();

    for (idx, cell) in header.iter().enumerate() {
        let label = normalize_text(cell);
        let slot = if label.contains("DATE") {
            &mut map.date
        } else if label.contains("DESC")
            || label.contains("NARRATION")
            || label.contains("PARTICULAR")
        {
            &mut map.description
        } else if label.contains("CREDIT") || label == "CR" {
            &mut map.credit
        } else if label.contains("DEBIT") || label == "DR" {
            &mut map.debit
        } else if label.contains("BAL") {
            &mut map.balance
        } else if label.contains("AMOUNT") {
            &mut map.amount
        } else {
            continue;
        };

        if slot.is_none() {
            *slot = Some(idx);
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::transaction::Category;

    fn grid(rows: &[&[&str]]) -> SheetGrid {
        SheetGrid::new(
            "Sheet1",
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_detect_header_row() {
        let rows = grid(&[
            &["BANK STATEMENT"],
            &["ACCOUNT HOLDER: RAVI"],
            &["Date", "Narration", "Debit", "Credit", "Balance"],
        ])
        .rows;
        assert_eq!(detect_header_row(&rows, None), Some(2));
    }

    #[test]
    fn test_detect_header_needs_two_keywords() {
        let rows = grid(&[&["Date", "Something"], &["Only text here"]]).rows;
        assert_eq!(detect_header_row(&rows, None), None);
    }

    #[test]
    fn test_detect_header_respects_limit() {
        let rows = grid(&[
            &["row one"],
            &["row two"],
            &["Date", "Debit", "Credit"],
        ])
        .rows;
        assert_eq!(detect_header_row(&rows, Some(2)), None);
        assert_eq!(detect_header_row(&rows, Some(3)), Some(2));
    }

    #[test]
    fn test_map_columns_label_variants() {
        let header: Vec<String> = ["Txn Date", "Particulars", "CR", "DR", "Closing Bal"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let map = map_columns(&header);
        assert_eq!(map.date, Some(0));
        assert_eq!(map.description, Some(1));
        assert_eq!(map.credit, Some(2));
        assert_eq!(map.debit, Some(3));
        assert_eq!(map.balance, Some(4));
        assert_eq!(map.amount, None);
    }

    #[test]
    fn test_map_columns_first_label_wins() {
        let header: Vec<String> = ["Date", "Value Date", "Description"]
            .iter()
            .map(|c| c.to_string())
            .collect();
        let map = map_columns(&header);
        assert_eq!(map.date, Some(0));
    }

    #[test]
    fn test_parse_credit_row() {
        let parser = SheetParser::new();
        let sheet = grid(&[
            &["Date", "Narration", "Debit", "Credit", "Balance"],
            &["01-Jan-2024", "UPI/AMAZON PAY/REF123", "0", "499.00", "10500.00"],
        ]);
        let extraction = parser.parse(&[sheet], "statement.xlsx").unwrap();

        assert_eq!(extraction.transactions.len(), 1);
        let txn = &extraction.transactions[0];
        assert_eq!(txn.date.as_deref(), Some("01/01/2024"));
        assert_eq!(txn.party.as_deref(), Some("AMAZON"));
        assert_eq!(txn.party_confidence, 0.95);
        assert_eq!(txn.credit, 499.0);
        assert_eq!(txn.debit, 0.0);
        assert_eq!(txn.amount, 499.0);
        assert_eq!(txn.balance, 10500.0);
        assert_eq!(txn.category, Category::UpiTransfer);
        assert!(txn.is_upi);
        assert!(!txn.is_transfer);
        assert_eq!(txn.source_sheet.as_deref(), Some("Sheet1"));
    }

    #[test]
    fn test_blank_rows_are_skipped() {
        let parser = SheetParser::new();
        let sheet = grid(&[
            &["Date", "Narration", "Debit", "Credit", "Balance"],
            &["", "", "", "", ""],
            &["02-Jan-2024", "ATM WDL", "2000.00", "0", "8500.00"],
            &["", "", "0", "0", "8500.00"],
        ]);
        let extraction = parser.parse(&[sheet], "statement.xlsx").unwrap();

        assert_eq!(extraction.transactions.len(), 1);
        assert_eq!(extraction.transactions[0].amount, -2000.0);
    }

    #[test]
    fn test_sheet_without_header_yields_nothing() {
        let parser = SheetParser::new();
        let sheet = grid(&[&["just"], &["free"], &["text"]]);
        let extraction = parser.parse(&[sheet], "statement.xlsx").unwrap();
        assert!(extraction.transactions.is_empty());
    }

    #[test]
    fn test_no_sheets_is_an_error() {
        let parser = SheetParser::new();
        assert!(matches!(
            parser.parse(&[], "statement.xlsx"),
            Err(ExtractionError::NoSheets)
        ));
    }

    #[test]
    fn test_profile_merges_across_sheets() {
        let parser = SheetParser::new();
        let first = grid(&[&["ACCOUNT NO: 50100123456"]]);
        let second = grid(&[&["ACCOUNT HOLDER: RAVI KUMAR"]]);
        let extraction = parser.parse(&[first, second], "statement.xlsx").unwrap();

        assert_eq!(
            extraction.profile.account_number.as_deref(),
            Some("50100123456")
        );
        assert_eq!(
            extraction.profile.account_holder_name.as_deref(),
            Some("RAVI KUMAR")
        );
    }

    #[test]
    fn test_amount_only_column_typed_by_narration() {
        let parser = SheetParser::new();
        let sheet = grid(&[
            &["Date", "Description", "Amount"],
            &["03-Jan-2024", "SALARY FOR JULY", "85000.00"],
            &["04-Jan-2024", "PAID TO LANDLORD", "-15000.00"],
        ]);
        let extraction = parser.parse(&[sheet], "statement.xlsx").unwrap();

        assert_eq!(extraction.transactions.len(), 2);
        assert_eq!(extraction.transactions[0].credit, 85000.0);
        assert_eq!(extraction.transactions[0].amount, 85000.0);
        assert_eq!(extraction.transactions[1].debit, 15000.0);
        assert_eq!(extraction.transactions[1].amount, -15000.0);
    }
}
