//! Anti-bot interstitial detection for marketplace pages.

use scraper::{Html, Selector};

/// Body phrases that only appear on the marketplace's robot-check page.
const CAPTCHA_PHRASES: &[&str] = &[
    "enter the characters you see below",
    "we just need to make sure you're not a robot",
];

/// Returns `true` when the document is a block/robot-check interstitial
/// rather than a results page: a CAPTCHA phrase in the body or a "sorry"
/// title.
#[must_use]
pub fn is_block_page(html: &str) -> bool {
    let lowered = html.to_lowercase();
    if CAPTCHA_PHRASES.iter().any(|phrase| lowered.contains(phrase)) {
        return true;
    }

    let doc = Html::parse_document(html);
    let title = Selector::parse("title").expect("valid title selector");
    doc.select(&title)
        .next()
        .is_some_and(|el| el.text().collect::<String>().to_lowercase().contains("sorry"))
}
