//! Resolution of scanned amounts and explicit columns into money fields.

use super::rules::amounts::{AmountScan, BALANCE_MAX};
use super::rules::direction::{infer_direction, Direction};

/// Resolved monetary fields of one transaction candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MoneyFields {
    /// Signed: positive credit, negative debit, 0 if indeterminate.
    pub amount: f64,
    pub credit: f64,
    pub debit: f64,
    pub balance: f64,
}

/// Resolve a free-text block's amount list by count of plausible amounts.
///
/// One or two amounts mean a primary amount (typed by `direction`) with
/// an optional balance behind it. Exactly three plausible amounts with no
/// separate trailing balance is the classic debit/credit/balance column
/// triple. Anything longer keeps the first amount as primary and the last
/// as balance, ignoring the middle.
pub fn resolve_amounts(scan: &AmountScan, direction: Direction) -> MoneyFields {
    let amounts = &scan.amounts;
    let trailing = scan.trailing_balance;

    match (amounts.len(), trailing) {
        (0, _) => MoneyFields {
            balance: trailing.unwrap_or(0.0),
            ..MoneyFields::default()
        },
        (1, _) => directed(amounts[0], direction, trailing.unwrap_or(0.0)),
        (2, _) => directed(amounts[0], direction, trailing.unwrap_or(amounts[1])),
        (3, None) => MoneyFields {
            amount: amounts[1] - amounts[0],
            credit: amounts[1],
            debit: amounts[0],
            balance: amounts[2],
        },
        _ => {
            let balance = trailing.unwrap_or(amounts[amounts.len() - 1]);
            directed(amounts[0], direction, balance)
        }
    }
}

/// Resolve explicit tabular columns into money fields.
///
/// Credit and debit columns take precedence over a generic amount column;
/// a generic amount is typed by its sign, or by the narration when
/// positive. Balances beyond the sanity bound are zeroed, not dropped.
pub fn resolve_columns(
    credit: f64,
    debit: f64,
    balance: f64,
    amount_col: f64,
    description: &str,
) -> MoneyFields {
    let balance = if balance.abs() > BALANCE_MAX { 0.0 } else { balance };

    if credit > 0.0 {
        return MoneyFields {
            amount: credit,
            credit,
            debit,
            balance,
        };
    }
    if debit > 0.0 {
        return MoneyFields {
            amount: -debit,
            credit,
            debit,
            balance,
        };
    }
    if amount_col < 0.0 {
        return MoneyFields {
            amount: amount_col,
            credit: 0.0,
            debit: -amount_col,
            balance,
        };
    }
    if amount_col > 0.0 {
        return directed(amount_col, infer_direction(description), balance);
    }

    MoneyFields {
        amount: 0.0,
        credit,
        debit,
        balance,
    }
}

fn directed(primary: f64, direction: Direction, balance: f64) -> MoneyFields {
    match direction {
        Direction::Credit => MoneyFields {
            amount: primary,
            credit: primary,
            debit: 0.0,
            balance,
        },
        Direction::Debit => MoneyFields {
            amount: -primary,
            credit: 0.0,
            debit: primary,
            balance,
        },
    }
}
