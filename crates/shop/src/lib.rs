//! The storefront as one dependency: domain types, kernel plumbing and the three feature
//! slices (catalog, cart, checkout).
//!
//! A server registers the output of [`init`] in its `ApiState` and mounts
//! [`server::router::feature_router`] next to the system routes.

pub use shop_domain as domain;
pub use shop_kernel as kernel;

#[cfg(feature = "server")]
pub mod server {
    pub mod router {
        pub use shop_kernel::server::router::system_router;

        use shop_kernel::server::ApiState;
        use utoipa_axum::router::OpenApiRouter;

        /// Routes of every enabled feature slice.
        #[must_use]
        pub fn feature_router() -> OpenApiRouter<ApiState> {
            OpenApiRouter::new()
                .merge(crate::features::catalog::router())
                .merge(crate::features::cart::router())
                .merge(crate::features::checkout::router())
        }
    }
}

pub mod features {
    pub use shop_cart as cart;
    pub use shop_catalog as catalog;
    pub use shop_checkout as checkout;
}

/// Builds the state of every slice against `database`.
#[cfg(feature = "server")]
#[must_use]
pub fn init(database: &shop_database::Database) -> Vec<domain::registry::InitializedSlice> {
    let slices = vec![
        features::catalog::init(database),
        features::cart::init(database),
        features::checkout::init(database),
    ];
    tracing::debug!(count = slices.len(), "Feature slices initialized");
    slices
}
