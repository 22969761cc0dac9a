//! Normalization from [`RawListing`] to [`vouchly_core::VoucherRecord`].
//!
//! Total and per-listing: a listing either becomes a record or is dropped,
//! never an error. A single junk listing must not cost the page.

use vouchly_core::{SourceId, VoucherRecord, URL_UNAVAILABLE};

use crate::types::RawListing;

/// Converts one raw listing into a canonical record.
///
/// The display name is the title up to the first `|` (sources append promo
/// text after it), trimmed; listings whose name comes out empty are
/// discarded. Discounts are clamped into `0..=100` and rounded; a missing
/// discount means 0. A missing stock flag means in stock; a missing URL
/// becomes [`URL_UNAVAILABLE`].
#[must_use]
pub fn normalize_listing(raw: RawListing, source: SourceId) -> Option<VoucherRecord> {
    let base = match raw.title.split_once('|') {
        Some((head, _)) => head,
        None => raw.title.as_str(),
    };
    let name = base.trim();
    if name.is_empty() {
        return None;
    }

    let discount = raw.discount_pct.unwrap_or(0.0);
    let discount = if discount.is_finite() {
        discount.clamp(0.0, 100.0).round()
    } else {
        0.0
    };
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)] // clamped to 0..=100 above
    let discount_pct = discount as u8;

    let url = raw
        .url
        .filter(|u| !u.trim().is_empty())
        .unwrap_or_else(|| URL_UNAVAILABLE.to_string());

    Some(VoucherRecord {
        name: name.to_string(),
        discount_pct,
        url,
        image_url: raw.image_url.filter(|u| !u.trim().is_empty()),
        site_name: source,
        in_stock: raw.in_stock.unwrap_or(true),
    })
}
