//! Core library for khata - heuristic Indian bank statement extraction.
//!
//! This crate provides:
//! - Header detection and column mapping for tabular statements
//! - Date-anchored block segmentation for free-text statements
//! - Narration normalization, party extraction and rule-based categorization
//! - Canonical transaction models with provenance fields

pub mod error;
pub mod models;
pub mod statement;

pub use error::{ExtractionError, KhataError, Result};
pub use models::config::{ExtractionConfig, KhataConfig};
pub use models::transaction::{
    AccountProfile, BehavioralDeviation, Category, Source, Transaction,
};
pub use statement::{DocumentParser, SheetGrid, SheetParser, StatementExtraction};
