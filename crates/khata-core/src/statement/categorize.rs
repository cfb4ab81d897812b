//! Rule-based transaction categorization and risk scoring.
//!
//! Patterns are matched against the lower-cased narration. Every pattern
//! in every category is tested and the longest matching pattern string
//! wins, so the outcome does not depend on table order.

use lazy_static::lazy_static;
use regex::Regex;

use crate::models::transaction::{round3, BehavioralDeviation, Category};

/// Risk score when a high-risk keyword (gambling, crypto, forex) matches.
pub const RISK_HIGH: f64 = 0.9;
/// Risk score for international/foreign-transaction keywords.
pub const RISK_MEDIUM: f64 = 0.6;
/// Risk score for salary/utility/government/bank keywords.
pub const RISK_LOW: f64 = 0.2;
/// Risk score when no keyword tier matches.
pub const RISK_BASELINE: f64 = 0.5;

/// Amounts above this are flagged as high-value deviations.
pub const HIGH_VALUE_THRESHOLD: f64 = 100_000.0;
/// Amounts below this are flagged as micro transactions.
pub const MICRO_THRESHOLD: f64 = 10.0;

lazy_static! {
    /// Category name to narration patterns, in fixed table order.
    static ref CATEGORY_PATTERNS: Vec<(Category, Vec<Regex>)> = vec![
        (
            Category::Income,
            compile(&[
                "salary", "payroll", "wages", "income", "credit.*salary", "employer",
                "pay.*credit", "salary.*credit", "salary.*transfer",
            ]),
        ),
        (
            Category::RewardCashback,
            compile(&[
                "reward", "cashback", "bonus", "cash.*back", "loyalty",
                "points.*credit", "reward.*points", "cashback.*credit",
            ]),
        ),
        (
            Category::Refund,
            compile(&[
                "refund", "reversal", "chargeback", "return.*refund", "refund.*credit",
                "payment.*reversal", "refund.*received",
            ]),
        ),
        (
            Category::BillPayment,
            compile(&[
                "electricity", "water", "gas", "utility", "bill.*payment",
                "phone.*bill", "mobile.*bill", "internet.*bill", "cable.*bill",
            ]),
        ),
        (
            Category::Subscription,
            compile(&[
                "subscription", "netflix", "spotify", "prime", "monthly.*fee",
                "annually", "recurring.*subscription", "auto.*debit.*subscription",
                "amazon.*prime", "youtube.*premium",
            ]),
        ),
        (
            Category::Emi,
            compile(&[
                "emi", "loan.*emi", "installment", "loan.*repayment",
                "equated.*monthly", "home.*loan.*emi", "car.*loan.*emi",
            ]),
        ),
        (
            Category::UpiTransfer,
            compile(&[
                "upi", "paytm", "phonepe", "gpay", "google.*pay", "upi.*transfer",
                "upi.*payment",
            ]),
        ),
        (
            Category::BankTransfer,
            compile(&[
                "neft", "rtgs", "imps", "bank.*transfer", "online.*transfer",
                "electronic.*transfer",
            ]),
        ),
        (
            Category::CashFlow,
            compile(&[
                "atm", "cash.*withdrawal", "cash.*atm", "withdrawal.*atm",
                "cash.*deposit",
            ]),
        ),
        (
            Category::Loan,
            compile(&[
                "loan.*disbursement", "personal.*loan", "loan.*credit",
                "loan.*disbursed",
            ]),
        ),
        (
            Category::Investment,
            compile(&[
                "investment", "mutual.*fund", "stocks", "shares", "fixed.*deposit",
                "fd", "rd", "sip.*investment",
            ]),
        ),
        (
            Category::Expense,
            compile(&[
                "expense", "purchase", "payment", "debit", "pos.*transaction",
                "card.*payment",
            ]),
        ),
    ];

    static ref HIGH_RISK: Vec<Regex> =
        compile(&["casino", "gambling", "betting", "crypto", "bitcoin", "forex"]);
    static ref MEDIUM_RISK: Vec<Regex> =
        compile(&["online.*payment", "international", "foreign.*transaction"]);
    static ref LOW_RISK: Vec<Regex> = compile(&["salary", "utility", "government", "bank"]);
}

fn compile(patterns: &[&str]) -> Vec<Regex> {
    patterns.iter().map(|p| Regex::new(p).unwrap()).collect()
}

/// Classification outcome for one transaction.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub category: Category,
    pub merchant_risk_score: f64,
    pub narration_risk_confidence: f64,
    pub behavioral_deviation: BehavioralDeviation,
}

/// Classify a transaction from its narration and resolved amounts.
///
/// With no pattern match the category falls back on the money direction:
/// credits default to `Income`, debits to `Expense`, otherwise `Unknown`.
pub fn categorize(description: &str, credit: f64, debit: f64) -> Classification {
    let narration = description.to_lowercase();

    let mut matched: Option<Category> = None;
    let mut match_length = 0;
    for (category, patterns) in CATEGORY_PATTERNS.iter() {
        for pattern in patterns {
            if pattern.as_str().len() > match_length && pattern.is_match(&narration) {
                match_length = pattern.as_str().len();
                matched = Some(*category);
            }
        }
    }

    let category = match matched {
        Some(category) => category,
        None if credit > 0.0 => Category::Income,
        None if debit > 0.0 => Category::Expense,
        None => Category::Unknown,
    };

    let narration_risk = if matched.is_some() {
        (0.5 + match_length as f64 / 100.0).min(0.95)
    } else {
        0.3
    };

    Classification {
        category,
        merchant_risk_score: round3(merchant_risk(&narration)),
        narration_risk_confidence: round3(narration_risk),
        behavioral_deviation: behavioral_deviation(credit, debit, category),
    }
}

fn merchant_risk(narration: &str) -> f64 {
    if HIGH_RISK.iter().any(|p| p.is_match(narration)) {
        return RISK_HIGH;
    }
    if MEDIUM_RISK.iter().any(|p| p.is_match(narration)) {
        return RISK_MEDIUM;
    }
    if LOW_RISK.iter().any(|p| p.is_match(narration)) {
        return RISK_LOW;
    }
    RISK_BASELINE
}

fn behavioral_deviation(credit: f64, debit: f64, category: Category) -> BehavioralDeviation {
    let amount = if credit > 0.0 { credit } else { debit };

    if amount > HIGH_VALUE_THRESHOLD {
        BehavioralDeviation::HighValue
    } else if amount < MICRO_THRESHOLD {
        BehavioralDeviation::MicroTransaction
    } else if category == Category::Unknown {
        BehavioralDeviation::Uncategorized
    } else {
        BehavioralDeviation::Normal
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_salary_is_income() {
        let result = categorize("SALARY CREDITED FOR JULY", 85000.0, 0.0);
        assert_eq!(result.category, Category::Income);
        assert_eq!(result.merchant_risk_score, 0.2);
        assert_eq!(result.behavioral_deviation, BehavioralDeviation::Normal);
    }

    #[test]
    fn test_longest_pattern_wins_across_categories() {
        // "upi.*payment" (12 chars) beats Expense's "payment" (7 chars)
        let result = categorize("UPI PAYMENT", 0.0, 450.0);
        assert_eq!(result.category, Category::UpiTransfer);
    }

    #[test]
    fn test_longest_pattern_wins_over_table_order() {
        // Income's "salary.*transfer" outweighs Bank Transfer's "neft"
        let result = categorize("NEFT SALARY TRANSFER", 85000.0, 0.0);
        assert_eq!(result.category, Category::Income);
        assert_eq!(result.narration_risk_confidence, 0.66);
    }

    #[test]
    fn test_atm_withdrawal_is_cash_flow() {
        let result = categorize("ATM WDL CASH WITHDRAWAL", 0.0, 2000.0);
        assert_eq!(result.category, Category::CashFlow);
    }

    #[test]
    fn test_unmatched_credit_defaults_to_income() {
        let result = categorize("ZZZZ", 500.0, 0.0);
        assert_eq!(result.category, Category::Income);
        assert_eq!(result.narration_risk_confidence, 0.3);
        assert_eq!(result.merchant_risk_score, 0.5);
    }

    #[test]
    fn test_unmatched_debit_defaults_to_expense() {
        let result = categorize("ZZZZ", 0.0, 500.0);
        assert_eq!(result.category, Category::Expense);
    }

    #[test]
    fn test_no_amounts_is_unknown_micro() {
        let result = categorize("ZZZZ", 0.0, 0.0);
        assert_eq!(result.category, Category::Unknown);
        assert_eq!(
            result.behavioral_deviation,
            BehavioralDeviation::MicroTransaction
        );
    }

    #[test]
    fn test_high_risk_keywords() {
        let result = categorize("ONLINE CASINO STAKE", 0.0, 5000.0);
        assert_eq!(result.merchant_risk_score, 0.9);
    }

    #[test]
    fn test_medium_risk_keywords() {
        let result = categorize("INTERNATIONAL PURCHASE", 0.0, 3000.0);
        assert_eq!(result.category, Category::Expense);
        assert_eq!(result.merchant_risk_score, 0.6);
    }

    #[test]
    fn test_high_value_deviation() {
        let result = categorize("SALARY CREDIT", 250000.0, 0.0);
        assert_eq!(result.behavioral_deviation, BehavioralDeviation::HighValue);
    }

    #[test]
    fn test_micro_transaction_deviation() {
        let result = categorize("UPI PAYMENT", 0.0, 5.0);
        assert_eq!(result.category, Category::UpiTransfer);
        assert_eq!(
            result.behavioral_deviation,
            BehavioralDeviation::MicroTransaction
        );
    }

    #[test]
    fn test_narration_risk_scales_with_match_length() {
        // "cash.*withdrawal" is 16 chars: 0.5 + 0.16
        let result = categorize("CASH WITHDRAWAL AT BRANCH", 0.0, 2000.0);
        assert_eq!(result.narration_risk_confidence, 0.66);
    }

    #[test]
    fn test_narration_risk_is_capped() {
        // "auto.*debit.*subscription" is 25 chars: 0.5 + 0.25 stays under cap
        let result = categorize("AUTO DEBIT SUBSCRIPTION NETFLIX", 0.0, 649.0);
        assert_eq!(result.category, Category::Subscription);
        assert_eq!(result.narration_risk_confidence, 0.75);
    }
}
