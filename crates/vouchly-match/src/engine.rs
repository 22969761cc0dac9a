//! Best-match selection over a voucher snapshot.
//!
//! Scoring uses a subsequence matcher: a record either matches loosely
//! (some score) or not at all. The score only gates candidacy against
//! `min_score`; ranking among candidates is stock-first, then discount.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use vouchly_core::VoucherRecord;

use crate::error::MatchError;
use crate::normalize::normalize_text;

/// Default minimum score a candidate must reach before it can win.
pub const DEFAULT_MIN_SCORE: i64 = 25;

/// Pick the best voucher for `query` out of `records`.
///
/// Every record's normalized name is scored against the normalized query.
/// Records the scorer rejects outright are not candidates; candidates below
/// `min_score` are dropped. Among the survivors an in-stock record beats any
/// out-of-stock one, higher discount wins within the same stock state, and
/// ties keep the earliest record in `records` order.
///
/// The returned reference always points into `records`.
///
/// # Errors
///
/// - [`MatchError::EmptyCorpus`] when `records` is empty.
/// - [`MatchError::InvalidQuery`] when the query normalizes to nothing.
/// - [`MatchError::NoLooseMatch`] when no record matches at any score.
/// - [`MatchError::BelowThreshold`] when matches exist but none reaches
///   `min_score`; carries the best score seen.
pub fn best_match<'a>(
    records: &'a [VoucherRecord],
    query: &str,
    min_score: i64,
) -> Result<&'a VoucherRecord, MatchError> {
    if records.is_empty() {
        return Err(MatchError::EmptyCorpus);
    }

    let needle = normalize_text(query);
    if needle.trim().is_empty() {
        return Err(MatchError::InvalidQuery);
    }

    let matcher = SkimMatcherV2::default();
    let mut best_loose: Option<i64> = None;
    let mut winner: Option<&VoucherRecord> = None;

    for record in records {
        let haystack = normalize_text(&record.name);
        let Some(score) = matcher.fuzzy_match(&haystack, &needle) else {
            continue;
        };
        best_loose = Some(best_loose.map_or(score, |best| best.max(score)));
        if score < min_score {
            continue;
        }
        let take = match winner {
            None => true,
            Some(current) => ranks_above(record, current),
        };
        if take {
            winner = Some(record);
        }
    }

    match (winner, best_loose) {
        (Some(record), _) => Ok(record),
        (None, Some(best_score)) => Err(MatchError::BelowThreshold {
            best_score,
            min_score,
        }),
        (None, None) => Err(MatchError::NoLooseMatch),
    }
}

/// Strict ordering between two candidates: stock state dominates, then
/// discount. Returning `false` on full ties keeps the earlier record.
fn ranks_above(challenger: &VoucherRecord, incumbent: &VoucherRecord) -> bool {
    if challenger.in_stock != incumbent.in_stock {
        return challenger.in_stock;
    }
    challenger.discount_pct > incumbent.discount_pct
}
