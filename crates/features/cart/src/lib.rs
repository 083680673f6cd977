//! Cart feature slice: the session cart, its page and its JSON view.

#[cfg(feature = "server")]
mod api;
#[cfg(feature = "server")]
mod error;
#[cfg(feature = "server")]
mod pages;
#[cfg(feature = "server")]
mod service;

#[cfg(feature = "server")]
pub use api::{CartLineResponse, CartResponse};
#[cfg(feature = "server")]
pub use error::{CartError, CartErrorExt};
#[cfg(feature = "server")]
pub use pages::{CartPage, CartPageProps};
#[cfg(feature = "server")]
pub use service::CartService;

#[cfg(feature = "server")]
use shop_kernel::{domain::registry::InitializedSlice, server::ApiState};

/// Cart feature state
#[cfg(feature = "server")]
#[shop_derive::shop_slice(name = "cart")]
pub struct CartFeature {
    pub service: CartService,
}

#[cfg(feature = "server")]
#[must_use]
pub fn init(database: &shop_database::Database) -> InitializedSlice {
    let products = shop_catalog::ProductRepository::new(database.clone());
    tracing::info!("Cart server slice initialized");
    CartFeature::new(CartFeatureInner { service: CartService::new(products) }).register()
}

/// `POST /add_to_cart`, `GET /cart`, `POST /update_cart` and the documented `/api/cart`.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<ApiState> {
    use axum::routing::{get, post};
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(api::get_cart))
        .route("/add_to_cart", post(pages::add_to_cart))
        .route("/cart", get(pages::view_cart))
        .route("/update_cart", post(pages::update_cart))
}
