use axum::{
    extract::{Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use vouchly_core::VoucherRecord;
use vouchly_match::best_match;

use super::{map_match_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct BestVoucherParams {
    query: Option<String>,
}

#[derive(Debug, Serialize)]
pub(super) struct SnapshotResponse {
    pub refreshed_at: DateTime<Utc>,
    pub record_count: usize,
    pub records: Vec<VoucherRecord>,
}

/// `GET /api/v1/best-voucher?query=...`: the best-ranked loose match for
/// the query, straight from the published snapshot.
pub(super) async fn best_voucher(
    State(state): State<AppState>,
    Query(params): Query<BestVoucherParams>,
) -> Result<Json<VoucherRecord>, ApiError> {
    let Some(query) = params.query.filter(|q| !q.trim().is_empty()) else {
        return Err(ApiError::new(
            "invalid_query",
            "the query parameter is required and must not be blank",
        ));
    };

    let snapshot = state.snapshot.current().await;
    let winner = best_match(&snapshot.records, &query, state.min_score)
        .map_err(|error| map_match_error(&error))?;
    Ok(Json(winner.clone()))
}

/// `GET /api/v1/snapshot`: the corpus as currently served, for diagnostics.
pub(super) async fn snapshot(State(state): State<AppState>) -> Json<SnapshotResponse> {
    let snapshot = state.snapshot.current().await;
    Json(SnapshotResponse {
        refreshed_at: snapshot.refreshed_at,
        record_count: snapshot.records.len(),
        records: snapshot.records.clone(),
    })
}
