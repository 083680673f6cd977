use super::{health, state::ApiState};
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

/// Routes owned by the kernel itself (`/health`).
pub fn system_router() -> OpenApiRouter<ApiState> {
    OpenApiRouter::new().routes(routes!(health::health_handler))
}
