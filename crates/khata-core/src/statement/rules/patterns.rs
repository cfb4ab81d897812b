//! Shared regex tables for Indian bank statement parsing.
//!
//! Every pattern here assumes the narration normal form produced by
//! [`super::text::normalize_text`]: upper-case, single spaces, and no
//! characters outside word chars, whitespace and `/ @ . -`. Date and
//! amount token patterns are the exception; they also run against raw
//! statement lines before normalization.

use lazy_static::lazy_static;
use regex::Regex;

/// Canonical header keywords; a row containing at least two of these is
/// treated as the column header of a tabular statement.
pub const HEADER_KEYWORDS: [&str; 6] = [
    "DATE",
    "DESCRIPTION",
    "DEBIT",
    "CREDIT",
    "BALANCE",
    "AMOUNT",
];

/// Tokens never usable as a counterparty name in the generic fallback.
pub const FALLBACK_SKIP_WORDS: [&str; 13] = [
    "UPI", "ATM", "WDL", "DEPOSIT", "CASH", "CR", "DR", "TRANSFER", "PAYMENT",
    "BANK", "INDIA", "ONLINE", "MOBILE",
];

/// Additional skip tokens for free-text statements, where narrations carry
/// branch locations and fee codes that never name a counterparty.
pub const DOCUMENT_SKIP_WORDS: [&str; 16] = [
    "DEP", "SB", "CHARGES", "FEE", "GST", "CARD", "AMC", "INTEREST", "CASA",
    "CAPITALIZED", "NACH", "REVERSAL", "SELF", "MUMBAI", "KANDIVALI",
    "GOREGAON",
];

/// Statement boilerplate; free-text lines containing any of these phrases
/// are header/footer noise and are dropped before block segmentation.
pub const BOILERPLATE_PHRASES: [&str; 30] = [
    "STATEMENT OF ACCOUNT",
    "END OF STATEMENT",
    "STATEMENT SUMMARY",
    "OPENING BALANCE",
    "TOTAL DEBIT",
    "TOTAL CREDIT",
    "ACCOUNT NO",
    "ACCOUNT TYPE",
    "PRODUCT TYPE",
    "CUSTOMER NUMBER",
    "CURRENCY NAME",
    "JOINT HOLDER",
    "NOMINEE",
    "BRANCH ADDRESS",
    "FROM DATE",
    "TO DATE",
    "CHEQUE /",
    "TRANS VALUE",
    "DATE DATE",
    "DATEVALUE",
    "DATECHEQUE",
    "INSTRUMENT",
    "DEBITS CREDITS",
    "BALANCE",
    "DESCRIPTION",
    "IMPORTANT",
    "MAB",
    "EACHDEPOSITOR",
    "UNLESS",
    "CAPITALIZED",
];

lazy_static! {
    // Narration normal form
    pub static ref NON_NARRATION_CHARS: Regex = Regex::new(
        r"[^\w\s/@.\-]"
    ).unwrap();

    pub static ref WHITESPACE_RUN: Regex = Regex::new(
        r"\s+"
    ).unwrap();

    // Amount tokens (Indian statement format: 1,23,456.00)
    pub static ref AMOUNT_TOKEN: Regex = Regex::new(
        r"[\d,]+\.\d{2}"
    ).unwrap();

    pub static ref AMOUNT_SHAPED: Regex = Regex::new(
        r"^\d+\.\d+$"
    ).unwrap();

    // Date shapes
    pub static ref DATE_NUMERIC: Regex = Regex::new(
        r"\b(\d{1,2})[-/.](\d{1,2})[-/.](\d{4}|\d{2})\b"
    ).unwrap();

    pub static ref DATE_MON: Regex = Regex::new(
        r"\b(\d{1,2})-([A-Za-z]{3})-(\d{4}|\d{2})\b"
    ).unwrap();

    // Split layouts print "05-Mar-" with the year on the following line.
    pub static ref DATE_MON_DANGLING: Regex = Regex::new(
        r"\b(\d{2})-([A-Za-z]{3})-"
    ).unwrap();

    pub static ref YEAR_LEAD: Regex = Regex::new(
        r"^(\d{4})\s+(?:\d{4}|[A-Z])"
    ).unwrap();

    // Known merchant brands; matched name maps to the canonical brand.
    pub static ref KNOWN_MERCHANTS: Vec<(Regex, &'static str)> = vec![
        (Regex::new(r"\bAMAZON\b").unwrap(), "AMAZON"),
        (Regex::new(r"\bFLIPKART\b").unwrap(), "FLIPKART"),
        (Regex::new(r"\bSWIGGY\b").unwrap(), "SWIGGY"),
        (Regex::new(r"\bZOMATO\b").unwrap(), "ZOMATO"),
        (Regex::new(r"\bPAYTM\b").unwrap(), "PAYTM"),
        (Regex::new(r"\bPHONEPE\b").unwrap(), "PHONEPE"),
        (Regex::new(r"\bGPAY\b").unwrap(), "GOOGLE PAY"),
        (Regex::new(r"\bBHIM\b").unwrap(), "BHIM"),
        (Regex::new(r"\bUBER\b").unwrap(), "UBER"),
        (Regex::new(r"\bOLA\b").unwrap(), "OLA"),
        (Regex::new(r"\bNETFLIX\b").unwrap(), "NETFLIX"),
        (Regex::new(r"\bSPOTIFY\b").unwrap(), "SPOTIFY"),
        (Regex::new(r"\bIRCTC\b").unwrap(), "IRCTC"),
    ];

    // VPA suffix, e.g. "RAVI@OKHDFC"
    pub static ref UPI_HANDLE: Regex = Regex::new(
        r"@([A-Z0-9]+)"
    ).unwrap();

    // Structured transfer references, most specific first. All capture the
    // counterparty name in group 1.
    pub static ref STRUCTURED_PARTY: Vec<Regex> = vec![
        Regex::new(r"UPI/(?:CR|DR)/\d+/([A-Z][A-Z\s]+?)(?:\s|$)").unwrap(),
        Regex::new(r"UPI/(?:CR|DR)/([A-Z][A-Z\s]+?)(?:\s|$)").unwrap(),
        Regex::new(r"IMPS/\d+/([A-Z][A-Z\s]+?)(?:\s|$)").unwrap(),
        Regex::new(r"NEFT/([A-Z][A-Z\s]+?)(?:\s|$)").unwrap(),
        Regex::new(r"TRANSFER\s+TO\s+([A-Z][A-Z\s]{2,})").unwrap(),
        Regex::new(r"\bFROM\s+([A-Z][A-Z\s]{2,})").unwrap(),
        Regex::new(r"WDL\s+(?:AT\s+)?([A-Z][A-Z\s]+?)(?:\s*\d|$)").unwrap(),
        Regex::new(r"(?:DEPOSIT|CASH|PAYMENT|TRANSFER)\s+([A-Z][A-Z\s]+?)(?:\s*$|\d)").unwrap(),
    ];

    pub static ref PREPOSITIONAL_PARTY: Regex = Regex::new(
        r"\b(?:TO|FROM|BY)\s+([A-Z][A-Z\s]{2,})"
    ).unwrap();

    // Name cleaning
    pub static ref BUSINESS_SUFFIX: Regex = Regex::new(
        r"\b(TRADERS|AGENCIES|ENTERPRISES|SERVICES|SOLUTIONS|PVT|LTD|LIMITED|CORP|COMPANY|CO|GROUP|BANK|PAYMENTS|FINTECH)\b"
    ).unwrap();

    pub static ref DOCUMENT_NOISE_WORDS: Regex = Regex::new(
        r"\b(DEPOSIT|CASH|UPI|CR|DR|WDL|ATM|DEP|CHARGES|FEE|GST|CARD|AMC|SELF|IN|MUMBAI|KANDIVALI|GOREGAON|INDIA|TRANSFER|PAYMENT)\b"
    ).unwrap();

    pub static ref NON_NAME_CHARS: Regex = Regex::new(
        r"[^\w\s]"
    ).unwrap();

    // Credit/debit markers
    pub static ref CREDIT_MARKER: Regex = Regex::new(
        r"\b(CREDIT|CR|DEPOSIT|SALARY|INCOME)\b"
    ).unwrap();

    pub static ref DEBIT_MARKER: Regex = Regex::new(
        r"\b(DEBIT|DR|WDL|WITHDRAWAL|PAID)\b"
    ).unwrap();

    // Narration flags
    pub static ref UPI_FLAG: Regex = Regex::new(
        r"\b(UPI|@|GPAY|PHONEPE|PAYTM|BHIM)\b"
    ).unwrap();

    pub static ref TRANSFER_FLAG: Regex = Regex::new(
        r"\b(NEFT|IMPS|RTGS|TRANSFER|TRF)\b"
    ).unwrap();

    // Account profile
    pub static ref ACCOUNT_HOLDER: Regex = Regex::new(
        r"(?:ACCOUNT HOLDER|NAME)\s*[:\-]?\s*([A-Z\s]{3,})"
    ).unwrap();

    pub static ref ACCOUNT_NUMBER: Regex = Regex::new(
        r"ACCOUNT\s*(?:NO|NUMBER)?\s*[:\-]?\s*([A-Z0-9]{6,})"
    ).unwrap();
}
