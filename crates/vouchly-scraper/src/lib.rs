//! Source adapters that turn upstream voucher sites into [`RawListing`]s,
//! plus the shared fetch/retry, identity-rotation, anti-bot, pagination,
//! and normalization machinery they build on.

pub mod block;
pub mod error;
pub mod identity;
pub mod normalize;
pub mod pagination;
pub mod sources;
pub mod types;

mod retry;

pub use error::ScrapeError;
pub use identity::{FixedIdentity, IdentityPolicy, RotatingIdentity};
pub use normalize::normalize_listing;
pub use pagination::discover_page_count;
pub use sources::{AmazonSource, MaxMoneySource, VoucherSource};
pub use types::RawListing;
