use thiserror::Error;

/// Why a lookup produced no record.
///
/// `EmptyCorpus` and `InvalidQuery` reject the request itself;
/// `NoLooseMatch` and `BelowThreshold` are genuine not-found outcomes.
#[derive(Debug, Error)]
pub enum MatchError {
    #[error("no voucher data available to search")]
    EmptyCorpus,

    #[error("query is empty after normalization")]
    InvalidQuery,

    #[error("no voucher loosely matches the query")]
    NoLooseMatch,

    #[error("best candidate scored {best_score}, below the minimum of {min_score}")]
    BelowThreshold { best_score: i64, min_score: i64 },
}
