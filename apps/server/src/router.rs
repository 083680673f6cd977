use axum::Router;
use axum::middleware::from_fn_with_state;
use shop::domain::constants::{CART_TAG, CATALOG_TAG, SYSTEM_TAG};
use shop::kernel::prelude::{ApiState, session_middleware};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_axum::router::OpenApiRouter;
use utoipa_scalar::{Scalar, Servable};

#[derive(OpenApi)]
#[openapi(
    info(title = "Storefront API"),
    tags(
        (name = CATALOG_TAG, description = "Products and stock"),
        (name = CART_TAG, description = "The visitor's session cart"),
        (name = SYSTEM_TAG, description = "Health and diagnostics"),
    )
)]
struct ApiDoc;

#[allow(unreachable_pub)]
pub fn init(state: ApiState) -> Router {
    let api = ApiDoc::openapi();
    let static_dir = ServeDir::new(&state.config.storage.static_dir);
    let sessions = state.sessions.clone();

    // Separate the OpenAPI routes and the API documentation object
    let (openapi_routes, api_doc) = OpenApiRouter::with_openapi(api)
        .merge(shop::server::router::feature_router())
        .merge(shop::server::router::system_router())
        .layer(from_fn_with_state(sessions, session_middleware))
        .with_state(state)
        .split_for_parts();

    // Create the Scalar UI routes
    let scalar_routes = Scalar::with_url("/api", api_doc);

    // Static files skip the session layer; the trace layer covers everything
    Router::new()
        .merge(openapi_routes)
        .merge(scalar_routes)
        .nest_service("/static", static_dir)
        .layer(TraceLayer::new_for_http())
}
