//! Catalog feature slice: the product grid, product detail pages and the product JSON API.

#[cfg(feature = "server")]
mod api;
#[cfg(feature = "server")]
mod error;
#[cfg(feature = "server")]
mod pages;
#[cfg(feature = "server")]
mod repository;

#[cfg(feature = "server")]
pub use api::ProductResponse;
#[cfg(feature = "server")]
pub use error::{CatalogError, CatalogErrorExt};
#[cfg(feature = "server")]
pub use pages::{ProductDetail, ProductDetailProps, ProductGrid, ProductGridProps};
#[cfg(feature = "server")]
pub use repository::ProductRepository;

#[cfg(feature = "server")]
use shop_kernel::{domain::registry::InitializedSlice, server::ApiState};

/// Catalog feature state
#[cfg(feature = "server")]
#[shop_derive::shop_slice(name = "catalog")]
pub struct Catalog {
    pub repository: ProductRepository,
}

/// Registers the catalog slice over `database`.
#[cfg(feature = "server")]
#[must_use]
pub fn init(database: &shop_database::Database) -> InitializedSlice {
    tracing::info!("Catalog server slice initialized");
    Catalog::new(CatalogInner { repository: ProductRepository::new(database.clone()) }).register()
}

/// `GET /`, `GET /product/{id}` and the documented `/api/products` routes.
#[cfg(feature = "server")]
pub fn router() -> utoipa_axum::router::OpenApiRouter<ApiState> {
    use axum::routing::get;
    use utoipa_axum::routes;

    utoipa_axum::router::OpenApiRouter::new()
        .routes(routes!(api::list_products))
        .routes(routes!(api::get_product))
        .route("/", get(pages::index))
        .route("/product/{id}", get(pages::detail))
}
