//! Rule-based field extraction primitives for statement narrations.

pub mod amounts;
pub mod dates;
pub mod direction;
pub mod party;
pub mod patterns;
pub mod text;

pub use amounts::{is_plausible, parse_amount, scan_amounts, AmountScan};
pub use dates::{date_from_numeric, month_number, normalize_date};
pub use direction::{infer_direction, Direction};
pub use party::{clean_party_name, PartyExtractor};
pub use text::normalize_text;
pub use patterns::*;
