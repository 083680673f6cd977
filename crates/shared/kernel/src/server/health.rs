use super::state::ApiState;
use axum::Json;
use axum::extract::State;
use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};
use shop_derive::{api_handler, api_model};
use shop_domain::constants::SYSTEM_TAG;
use std::sync::LazyLock;
use std::time::Instant;
use utoipa::ToSchema;

static STARTED: LazyLock<Instant> = LazyLock::new(Instant::now);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
enum HealthStatus {
    /// Database reachable
    Up,
    /// Serving, but the database did not answer
    Degraded,
}

#[api_model]
/// Liveness report
struct HealthResponse {
    status: HealthStatus,
    version: String,
    /// Seconds since the first health probe
    uptime: u64,
    database: bool,
    /// Live sessions
    sessions: u64,
}

#[api_handler(
    get,
    path = "/health",
    responses((status = OK, description = "Server and database liveness", body = HealthResponse)),
    tag = SYSTEM_TAG,
)]
pub(super) async fn health_handler(State(state): State<ApiState>) -> Response {
    let database = state.database.health().await.is_ok();
    let report = HealthResponse {
        status: if database { HealthStatus::Up } else { HealthStatus::Degraded },
        version: env!("CARGO_PKG_VERSION").to_owned(),
        uptime: STARTED.elapsed().as_secs(),
        database,
        sessions: state.sessions.len(),
    };

    let mut response = Json(report).into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store, max-age=0"));
    response
}
