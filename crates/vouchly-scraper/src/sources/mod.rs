//! The source adapters and the interface they share.

use async_trait::async_trait;
use vouchly_core::SourceId;

use crate::types::RawListing;

pub mod amazon;
pub mod maxmoney;

pub use amazon::AmazonSource;
pub use maxmoney::MaxMoneySource;

/// One upstream voucher source.
///
/// `fetch_all` is best-effort and infallible by contract: implementations
/// contain their own failures, log them, and return whatever listings they
/// accumulated, possibly none. One source can therefore never abort a
/// scrape cycle or another source.
#[async_trait]
pub trait VoucherSource: Send + Sync {
    /// Stable identifier stamped onto this source's records.
    fn id(&self) -> SourceId;

    /// Fetch every listing this source currently offers.
    async fn fetch_all(&self) -> Vec<RawListing>;
}
