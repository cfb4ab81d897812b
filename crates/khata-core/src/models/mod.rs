//! Data models for the khata pipeline.

pub mod config;
pub mod transaction;

pub use config::{ExtractionConfig, KhataConfig};
pub use transaction::{
    round3, AccountProfile, BehavioralDeviation, Category, Source, Transaction,
};
