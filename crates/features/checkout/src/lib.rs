//! Checkout feature slice: the shipping form, its server-side check and the confirmation page.

#[cfg(feature = "server")]
mod error;
#[cfg(feature = "server")]
mod pages;
#[cfg(feature = "server")]
mod service;

#[cfg(feature = "server")]
pub use error::{CheckoutError, CheckoutErrorExt};
#[cfg(feature = "server")]
pub use pages::{CheckoutPage, CheckoutPageProps, SuccessPage, SuccessPageProps};
#[cfg(feature = "server")]
pub use service::{CheckoutService, OrderConfirmation};

#[cfg(feature = "server")]
use shop_kernel::{domain::registry::InitializedSlice, server::ApiState};

/// Checkout feature state
#[cfg(feature = "server")]
#[shop_derive::shop_slice(name = "checkout")]
pub struct Checkout {
    pub service: CheckoutService,
}

#[cfg(feature = "server")]
#[must_use]
pub fn init(database: &shop_database::Database) -> InitializedSlice {
    let products = shop_catalog::ProductRepository::new(database.clone());
    tracing::info!("Checkout server slice initialized");
    Checkout::new(CheckoutInner { service: CheckoutService::new(products) }).register()
}

/// `GET /checkout` and `POST /checkout`.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<ApiState> {
    use axum::routing::get;

    utoipa_axum::router::OpenApiRouter::new()
        .route("/checkout", get(pages::checkout_page).post(pages::place_order))
}
