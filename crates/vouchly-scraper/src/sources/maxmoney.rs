//! MaxMoney partner adapter: one authenticated JSON request.
//!
//! The upstream is a partner API, not a scraping target. A failure is a
//! configuration or outage problem surfaced once per cycle, so there is no
//! retry loop and any error collapses to an empty result.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use vouchly_core::SourceId;

use crate::error::ScrapeError;
use crate::sources::VoucherSource;
use crate::types::RawListing;

const MAXMONEY_API_BASE: &str = "https://savemax.maximize.money";

/// Customer-facing portal; used for link construction and the
/// origin/referer the API expects.
const MAXMONEY_PORTAL: &str = "https://www.maximize.money";

pub struct MaxMoneySource {
    client: reqwest::Client,
    token: String,
    base_url: String,
}

#[derive(Debug, Deserialize)]
struct GiftCardList {
    #[serde(default)]
    data: Vec<GiftCard>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GiftCard {
    gift_card_name: String,
    #[serde(default)]
    discount: Option<f64>,
    #[serde(default)]
    gift_card_logo: Option<String>,
    brand: String,
    id: i64,
    #[serde(default)]
    stock: Option<bool>,
}

impl MaxMoneySource {
    /// Creates an adapter holding the partner bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(timeout_secs: u64, token: &str) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            token: token.to_string(),
            base_url: MAXMONEY_API_BASE.to_string(),
        })
    }

    /// Points the adapter at a different API host (tests run against a
    /// local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    async fn fetch_cards(&self) -> Result<Vec<GiftCard>, ScrapeError> {
        let url = format!("{}/api/savemax/giftcard/list-all2", self.base_url);
        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .header(reqwest::header::ACCEPT, "application/json, text/plain, */*")
            .header(reqwest::header::ORIGIN, MAXMONEY_PORTAL)
            .header(reqwest::header::REFERER, format!("{MAXMONEY_PORTAL}/"))
            .header(reqwest::header::USER_AGENT, "Mozilla/5.0")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::UnexpectedStatus {
                status: status.as_u16(),
                url,
            });
        }

        let body = response.text().await?;
        let parsed =
            serde_json::from_str::<GiftCardList>(&body).map_err(|e| ScrapeError::Deserialize {
                context: format!("gift card list from {url}"),
                source: e,
            })?;
        Ok(parsed.data)
    }
}

#[async_trait]
impl VoucherSource for MaxMoneySource {
    fn id(&self) -> SourceId {
        SourceId::MaxMoney
    }

    async fn fetch_all(&self) -> Vec<RawListing> {
        match self.fetch_cards().await {
            Ok(cards) => cards.into_iter().map(to_listing).collect(),
            Err(error) => {
                tracing::warn!(source = %self.id(), error = %error, "gift card list fetch failed");
                Vec::new()
            }
        }
    }
}

fn to_listing(card: GiftCard) -> RawListing {
    RawListing {
        url: Some(format!(
            "{MAXMONEY_PORTAL}/gift-cards/{}/{}",
            card.brand, card.id
        )),
        title: card.gift_card_name,
        image_url: card.gift_card_logo,
        discount_pct: card.discount,
        in_stock: card.stock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn card_maps_onto_a_listing_with_a_portal_url() {
        let card = GiftCard {
            gift_card_name: "Croma Gift Card".to_string(),
            discount: Some(4.5),
            gift_card_logo: Some("https://cdn.example.com/croma.png".to_string()),
            brand: "croma".to_string(),
            id: 812,
            stock: Some(true),
        };
        let listing = to_listing(card);
        assert_eq!(listing.title, "Croma Gift Card");
        assert_eq!(
            listing.url.as_deref(),
            Some("https://www.maximize.money/gift-cards/croma/812")
        );
        assert_eq!(listing.discount_pct, Some(4.5));
        assert_eq!(listing.in_stock, Some(true));
    }

    #[test]
    fn missing_optional_fields_stay_absent() {
        let card = GiftCard {
            gift_card_name: "Bare Card".to_string(),
            discount: None,
            gift_card_logo: None,
            brand: "bare".to_string(),
            id: 1,
            stock: None,
        };
        let listing = to_listing(card);
        assert!(listing.image_url.is_none());
        assert!(listing.discount_pct.is_none());
        assert!(listing.in_stock.is_none());
    }
}
