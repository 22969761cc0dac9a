use serde::{Deserialize, Serialize};

/// Placeholder stored when a source yields a listing without a product link.
pub const URL_UNAVAILABLE: &str = "N/A";

/// Identifies which upstream source produced a record.
///
/// The lowercase string form doubles as the per-source document name on
/// disk, so variants must stay stable once shipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceId {
    Amazon,
    MaxMoney,
}

impl SourceId {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SourceId::Amazon => "amazon",
            SourceId::MaxMoney => "maxmoney",
        }
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical discounted-voucher listing, identical in shape across sources.
///
/// `discount_pct` is an integer percent-off in `0..=100`. `url` falls back
/// to [`URL_UNAVAILABLE`] when the source had no link for the listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoucherRecord {
    pub name: String,
    pub discount_pct: u8,
    pub url: String,
    pub image_url: Option<String>,
    pub site_name: SourceId,
    pub in_stock: bool,
}
