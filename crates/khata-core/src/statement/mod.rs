//! Statement field extraction.
//!
//! Two entry points cover the two source shapes: [`SheetParser`] for
//! tabular (spreadsheet) statements and [`DocumentParser`] for free-text
//! (page-oriented) ones. Both produce the same canonical transaction
//! records.

pub mod assemble;
pub mod categorize;
pub mod document;
pub mod profile;
pub mod rules;
pub mod tabular;

pub use document::DocumentParser;
pub use tabular::{SheetGrid, SheetParser};

use crate::error::ExtractionError;
use crate::models::transaction::{AccountProfile, Transaction};

/// Result type for extraction operations.
pub type Result<T> = std::result::Result<T, ExtractionError>;

/// Everything extracted from one document.
#[derive(Debug, Clone, Default)]
pub struct StatementExtraction {
    pub transactions: Vec<Transaction>,
    pub profile: AccountProfile,
}
