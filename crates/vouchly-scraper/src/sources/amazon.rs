//! Amazon gift-card category adapter: paginated HTML search results.
//!
//! Page 1 doubles as the pagination probe. Each page fetch presents a
//! rotated user-agent and is retried on transient failures; a page that
//! stays dead after the retry budget ends the walk with whatever was
//! accumulated, while a blocked page contributes nothing and the walk
//! continues.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use scraper::{Html, Selector};
use vouchly_core::SourceId;

use crate::block::is_block_page;
use crate::error::ScrapeError;
use crate::identity::IdentityPolicy;
use crate::pagination::discover_page_count;
use crate::retry::retry_with_backoff;
use crate::sources::VoucherSource;
use crate::types::RawListing;

const AMAZON_BASE_URL: &str = "https://www.amazon.in";

/// Category browse query for discounted gift cards, sorted by popularity.
const SEARCH_PATH: &str = "/s?i=gift-cards&s=popularity-rank&rh=n%3A6681889031";

pub struct AmazonSource {
    client: reqwest::Client,
    identity: Arc<dyn IdentityPolicy>,
    base_url: String,
    page_attempts: u32,
    retry_backoff_secs: u64,
    max_pages: usize,
}

impl AmazonSource {
    /// Creates an adapter with the given transport timeout, identity policy,
    /// per-page retry budget (total attempts), fixed backoff, and cap on the
    /// discovered page count.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        identity: Arc<dyn IdentityPolicy>,
        page_attempts: u32,
        retry_backoff_secs: u64,
        max_pages: usize,
    ) -> Result<Self, ScrapeError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            client,
            identity,
            base_url: AMAZON_BASE_URL.to_string(),
            page_attempts,
            retry_backoff_secs,
            max_pages,
        })
    }

    /// Points the adapter at a different site root (tests run against a
    /// local mock server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn search_url(&self, page: usize) -> String {
        format!("{}{SEARCH_PATH}&page={page}", self.base_url)
    }

    /// Fetches one search page, retrying transient failures. The user-agent
    /// is re-drawn from the identity policy on every attempt.
    async fn fetch_page(&self, page: usize) -> Result<String, ScrapeError> {
        let url = self.search_url(page);
        retry_with_backoff(self.page_attempts, self.retry_backoff_secs, || {
            let url = url.clone();
            async move {
                let response = self
                    .client
                    .get(&url)
                    .header(reqwest::header::USER_AGENT, self.identity.user_agent())
                    .header(reqwest::header::ACCEPT, "text/html")
                    .header(reqwest::header::ACCEPT_LANGUAGE, "en-US,en;q=0.9")
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
                if is_block_page(&body) {
                    return Err(ScrapeError::Blocked { url });
                }
                Ok(body)
            }
        })
        .await
    }
}

#[async_trait]
impl VoucherSource for AmazonSource {
    fn id(&self) -> SourceId {
        SourceId::Amazon
    }

    async fn fetch_all(&self) -> Vec<RawListing> {
        let first = match self.fetch_page(1).await {
            Ok(html) => html,
            Err(ScrapeError::Blocked { url }) => {
                tracing::warn!(source = %self.id(), url = %url, "first page is an anti-bot interstitial");
                return Vec::new();
            }
            Err(error) => {
                tracing::warn!(source = %self.id(), error = %error, "first page fetch failed");
                return Vec::new();
            }
        };

        let page_count = discover_page_count(&first, self.max_pages);
        let mut listings = extract_listings(&first, &self.base_url);
        tracing::debug!(
            source = %self.id(),
            page = 1,
            page_count,
            listings = listings.len(),
            "extracted search page"
        );

        for page in 2..=page_count {
            tokio::time::sleep(self.identity.page_delay()).await;

            match self.fetch_page(page).await {
                Ok(html) => {
                    let page_listings = extract_listings(&html, &self.base_url);
                    tracing::debug!(
                        source = %self.id(),
                        page,
                        listings = page_listings.len(),
                        "extracted search page"
                    );
                    listings.extend(page_listings);
                }
                Err(ScrapeError::Blocked { url }) => {
                    tracing::warn!(source = %self.id(), page, url = %url, "page is an anti-bot interstitial; zero listings");
                }
                Err(error) => {
                    tracing::warn!(
                        source = %self.id(),
                        page,
                        error = %error,
                        "page dead after retry budget; stopping pagination"
                    );
                    break;
                }
            }
        }

        listings
    }
}

/// Pulls raw listings out of one search results page.
///
/// A result container yields a listing only if its title is present and
/// non-empty. The percent-off comes from a `Flat N% off` fragment in the
/// (still `|`-decorated) title; relative product links are absolutized
/// against `base_url`. Search results only show purchasable cards, so
/// everything extracted here is in stock.
fn extract_listings(html: &str, base_url: &str) -> Vec<RawListing> {
    let doc = Html::parse_document(html);
    let result = Selector::parse("div.s-result-item[data-asin]").expect("valid result selector");
    let title = Selector::parse("h2 span").expect("valid title selector");
    let link = Selector::parse("a.a-link-normal[href]").expect("valid link selector");
    let image = Selector::parse("img.s-image").expect("valid image selector");
    let discount_re = Regex::new(r"(?i)flat\s+(\d+)%\s+off").expect("valid discount regex");

    let mut listings = Vec::new();
    for item in doc.select(&result) {
        let Some(title_el) = item.select(&title).next() else {
            continue;
        };
        let title_text = title_el.text().collect::<String>().trim().to_string();
        if title_text.is_empty() {
            continue;
        }

        let url = item
            .select(&link)
            .next()
            .and_then(|a| a.value().attr("href"))
            .map(|href| absolutize(href, base_url));

        let image_url = item
            .select(&image)
            .next()
            .and_then(|img| img.value().attr("src"))
            .map(str::to_string);

        let discount_pct = discount_re
            .captures(&title_text)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<f64>().ok());

        listings.push(RawListing {
            title: title_text,
            url,
            image_url,
            discount_pct,
            in_stock: Some(true),
        });
    }
    listings
}

fn absolutize(href: &str, base_url: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        href.to_string()
    } else {
        format!("{base_url}{href}")
    }
}
