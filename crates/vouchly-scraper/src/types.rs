/// One listing as a source yielded it, before normalization.
///
/// Sources disagree on what they can supply; everything beyond the title is
/// optional and resolved to canonical defaults by
/// [`crate::normalize::normalize_listing`]. `discount_pct` stays a raw
/// float here because the partner API reports fractional percents.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    pub title: String,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub discount_pct: Option<f64>,
    pub in_stock: Option<bool>,
}
