//! Canonical transaction and account profile models.
//!
//! Field names and formats are a stable output contract; downstream
//! consumers key on the serialized names.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Kind of statement a transaction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Excel,
    Pdf,
}

impl Source {
    pub fn as_str(&self) -> &'static str {
        match self {
            Source::Excel => "excel",
            Source::Pdf => "pdf",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Business category assigned by the rule-based categorizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Income,
    #[serde(rename = "Reward/Cashback")]
    RewardCashback,
    Refund,
    #[serde(rename = "Bill Payment")]
    BillPayment,
    Subscription,
    #[serde(rename = "EMI")]
    Emi,
    #[serde(rename = "UPI Transfer")]
    UpiTransfer,
    #[serde(rename = "Bank Transfer")]
    BankTransfer,
    #[serde(rename = "Cash Flow")]
    CashFlow,
    Loan,
    Investment,
    Expense,
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "Income",
            Category::RewardCashback => "Reward/Cashback",
            Category::Refund => "Refund",
            Category::BillPayment => "Bill Payment",
            Category::Subscription => "Subscription",
            Category::Emi => "EMI",
            Category::UpiTransfer => "UPI Transfer",
            Category::BankTransfer => "Bank Transfer",
            Category::CashFlow => "Cash Flow",
            Category::Loan => "Loan",
            Category::Investment => "Investment",
            Category::Expense => "Expense",
            Category::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label for how far a transaction sits from ordinary account behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BehavioralDeviation {
    Normal,
    #[serde(rename = "High Value")]
    HighValue,
    #[serde(rename = "Micro Transaction")]
    MicroTransaction,
    Uncategorized,
}

impl BehavioralDeviation {
    pub fn as_str(&self) -> &'static str {
        match self {
            BehavioralDeviation::Normal => "Normal",
            BehavioralDeviation::HighValue => "High Value",
            BehavioralDeviation::MicroTransaction => "Micro Transaction",
            BehavioralDeviation::Uncategorized => "Uncategorized",
        }
    }
}

impl fmt::Display for BehavioralDeviation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One extracted transaction; immutable once emitted. Declaration order
/// is serialization order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// `DD/MM/YYYY` when a known format matched, otherwise the normalized
    /// raw text; `None` when the source row carried no date at all.
    pub date: Option<String>,
    /// Normalized narration.
    pub description: String,
    /// Signed amount: positive credit, negative debit, 0 if indeterminate.
    pub amount: f64,
    pub credit: f64,
    pub debit: f64,
    /// Running balance, 0 when absent.
    pub balance: f64,
    pub party: Option<String>,
    pub detected_party: Option<String>,
    pub party_confidence: f64,
    pub category: Category,
    pub merchant_risk_score: f64,
    pub narration_risk_confidence: f64,
    pub behavioral_deviation: BehavioralDeviation,
    pub is_upi: bool,
    pub is_transfer: bool,
    pub source: Source,
    pub source_file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_sheet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page: Option<usize>,
}

/// Account holder details scraped from a sheet's leading rows.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AccountProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_holder_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account_number: Option<String>,
}

impl AccountProfile {
    pub fn is_empty(&self) -> bool {
        self.account_holder_name.is_none() && self.account_number.is_none()
    }

    /// Fold later findings in; present values overwrite, absent values
    /// never erase earlier ones.
    pub fn merge(&mut self, other: AccountProfile) {
        if other.account_holder_name.is_some() {
            self.account_holder_name = other.account_holder_name;
        }
        if other.account_number.is_some() {
            self.account_number = other.account_number;
        }
    }
}

/// Round a score to three decimals for output stability.
pub fn round3(value: f64) -> f64 {
    (value * 1000.0).round() / 1000.0
}
