//! Voucher lookup: text canonicalization plus fuzzy best-match selection
//! over a snapshot of [`vouchly_core::VoucherRecord`]s.

pub mod engine;
pub mod error;
pub mod normalize;

pub use engine::{best_match, DEFAULT_MIN_SCORE};
pub use error::MatchError;
pub use normalize::normalize_text;
