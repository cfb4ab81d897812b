//! Error types for khata.

use thiserror::Error;

/// Top-level error type for khata operations.
#[derive(Error, Debug)]
pub enum KhataError {
    /// Statement extraction failed.
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Underlying I/O failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors from the statement extraction pipeline.
///
/// Row- and sheet-level problems never surface here; they are skipped
/// and logged. Only document-level failure reaches the caller.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Every sheet and page was scanned and nothing was produced.
    #[error("No valid transactions extracted from document")]
    NoTransactions,

    /// The workbook input carried no sheets.
    #[error("Workbook contains no sheets")]
    NoSheets,

    /// The document input carried no pages.
    #[error("Document contains no pages")]
    NoPages,
}

/// Result type alias using [`KhataError`].
pub type Result<T> = std::result::Result<T, KhataError>;
