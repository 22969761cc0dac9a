mod voucher;

use axum::{
    extract::State,
    http::{header, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use vouchly_match::MatchError;
use vouchly_store::SnapshotHandle;

#[derive(Clone)]
pub struct AppState {
    pub snapshot: SnapshotHandle,
    pub min_score: i64,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize)]
struct HealthData {
    status: &'static str,
    record_count: usize,
    refreshed_at: DateTime<Utc>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "no_match" => StatusCode::NOT_FOUND,
            "invalid_query" => StatusCode::BAD_REQUEST,
            "no_data" => StatusCode::SERVICE_UNAVAILABLE,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_match_error(error: &MatchError) -> ApiError {
    let code = match error {
        MatchError::EmptyCorpus => "no_data",
        MatchError::InvalidQuery => "invalid_query",
        MatchError::NoLooseMatch | MatchError::BelowThreshold { .. } => "no_match",
    };
    ApiError::new(code, error.to_string())
}

fn build_cors(origin: Option<&str>) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE]);

    match origin {
        Some(raw) => match raw.parse::<HeaderValue>() {
            Ok(value) => layer.allow_origin(value),
            Err(_) => {
                tracing::warn!(origin = raw, "unparseable CORS origin; allowing any");
                layer.allow_origin(tower_http::cors::Any)
            }
        },
        None => layer.allow_origin(tower_http::cors::Any),
    }
}

pub fn build_app(state: AppState, cors_origin: Option<&str>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health))
        .route("/api/v1/best-voucher", get(voucher::best_voucher))
        .route("/api/v1/snapshot", get(voucher::snapshot))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors(cors_origin)),
        )
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<HealthData> {
    let snapshot = state.snapshot.current().await;
    Json(HealthData {
        status: "ok",
        record_count: snapshot.records.len(),
        refreshed_at: snapshot.refreshed_at,
    })
}
