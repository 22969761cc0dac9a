//! Page-count discovery from a marketplace's first results page.
//!
//! The pagination strip mixes numeric page links, the current page marker,
//! ellipses, and prev/next controls; only numeric-only tokens count. The
//! strip is not guaranteed to be sorted, so the discovered count is the
//! maximum numeric token seen.

use scraper::{Html, Selector};

/// Scans `html` for pagination markers and returns the number of result
/// pages to walk: the maximum numeric marker, defaulting to 1 when the
/// strip is absent or holds no numeric tokens, capped at `max_pages`.
#[must_use]
pub fn discover_page_count(html: &str, max_pages: usize) -> usize {
    let doc = Html::parse_document(html);
    let marker = Selector::parse(".s-pagination-item").expect("valid pagination selector");

    let mut count = 1usize;
    for el in doc.select(&marker) {
        let text: String = el.text().collect();
        if let Ok(n) = text.trim().parse::<usize>() {
            count = count.max(n);
        }
    }

    count.min(max_pages.max(1))
}
