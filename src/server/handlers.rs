use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::location::{raw_location_from_json, RawLocation, Resolution};

use super::state::AppState;

// ─── Error response ──────────────────────────────────────────────

#[derive(Serialize)]
struct ApiErrorBody {
    error: String,
    code: u16,
}

pub(super) struct ApiError(StatusCode, String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ApiErrorBody {
            error: self.1,
            code: self.0.as_u16(),
        };
        (self.0, Json(body)).into_response()
    }
}

fn api_error(status: StatusCode, msg: impl Into<String>) -> ApiError {
    ApiError(status, msg.into())
}

// ─── GET /health ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub regions: usize,
    pub vocabulary: String,
}

pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let vocab = state.resolver.vocabulary();
    Json(HealthResponse {
        status: "ok",
        regions: vocab.len(),
        vocabulary: vocab.source().to_string(),
    })
}

// ─── GET /api/regions ────────────────────────────────────────────

pub async fn region_list(State(state): State<Arc<AppState>>) -> Json<Vec<String>> {
    Json(
        state
            .resolver
            .vocabulary()
            .region_names()
            .map(str::to_string)
            .collect(),
    )
}

// ─── GET /api/regions/{region}/sub-regions ───────────────────────

#[derive(Serialize)]
pub struct SubRegionsResponse {
    pub region: String,
    pub sub_regions: Vec<String>,
}

pub async fn sub_region_list(
    State(state): State<Arc<AppState>>,
    Path(region): Path<String>,
) -> Result<Json<SubRegionsResponse>, Response> {
    let vocab = state.resolver.vocabulary();
    let (canonical, subs) = vocab
        .canonical_region(&region)
        .zip(vocab.sub_region_names(&region))
        .ok_or_else(|| {
            api_error(StatusCode::NOT_FOUND, format!("Unknown region '{}'", region)).into_response()
        })?;

    Ok(Json(SubRegionsResponse {
        region: canonical.to_string(),
        sub_regions: subs.into_iter().map(str::to_string).collect(),
    }))
}

// ─── GET /api/resolve ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResolveQuery {
    pub region: Option<String>,
    pub sub_region: Option<String>,
    #[serde(default)]
    pub explain: bool,
}

pub async fn resolve(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ResolveQuery>,
) -> Response {
    let start = Instant::now();
    let raw = RawLocation {
        region_text: params.region,
        sub_region_text: params.sub_region,
    };

    let resolution = state.resolver.resolve_detailed(&raw);
    log_resolution("GET /api/resolve", &raw, &resolution, start);
    render(resolution, params.explain)
}

// ─── POST /api/resolve/address ───────────────────────────────────

#[derive(Deserialize)]
pub struct ExplainQuery {
    #[serde(default)]
    pub explain: bool,
}

pub async fn resolve_address(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExplainQuery>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, Response> {
    let start = Instant::now();
    let raw = raw_location_from_json(&body).map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, format!("Invalid address payload: {}", e)).into_response()
    })?;

    let resolution = state.resolver.resolve_detailed(&raw);
    log_resolution("POST /api/resolve/address", &raw, &resolution, start);
    Ok(render(resolution, params.explain))
}

// ─── Helpers ─────────────────────────────────────────────────────

fn render(resolution: Resolution, explain: bool) -> Response {
    if explain {
        Json(resolution).into_response()
    } else {
        Json(resolution.location).into_response()
    }
}

fn log_resolution(route: &str, raw: &RawLocation, resolution: &Resolution, start: Instant) {
    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    let loc = &resolution.location;
    if let Some(ref w) = loc.warning {
        warn!("{} region={:?} sub_region={:?} -> {}", route, raw.region_text, raw.sub_region_text, w);
    }
    info!(
        "{} region={:?} sub_region={:?} -> {:?}/{:?} ({:.1}ms)",
        route, raw.region_text, raw.sub_region_text, loc.region, loc.sub_region, elapsed_ms,
    );
}
