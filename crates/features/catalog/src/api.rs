use crate::Catalog;
use axum::Json;
use axum::extract::{Path, State};
use shop_derive::{api_handler, api_model};
use shop_domain::catalog::Product;
use shop_domain::constants::CATALOG_TAG;
use shop_kernel::server::{ApiError, ApiState};

#[api_model]
/// Product as served by the JSON API
pub struct ProductResponse {
    pub id: u32,
    pub name: String,
    /// Price in minor units (cents)
    pub price: u64,
    /// Price formatted as `units.cents`
    pub price_display: String,
    pub description: Option<String>,
    /// Path under `/static`
    pub image: Option<String>,
    pub stock: u32,
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self {
            id: product.id,
            price: product.price.minor(),
            price_display: product.price.to_string(),
            name: product.name,
            description: product.description,
            image: product.image,
            stock: product.stock,
        }
    }
}

#[api_handler(
    get,
    path = "/api/products",
    responses((status = OK, description = "All products ordered by id", body = [ProductResponse])),
    tag = CATALOG_TAG,
)]
pub(crate) async fn list_products(
    State(state): State<ApiState>,
) -> Result<Json<Vec<ProductResponse>>, ApiError> {
    let products = state.try_get_slice::<Catalog>()?.repository.clone();
    let products = products.list().await?;
    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

#[api_handler(
    get,
    path = "/api/products/{id}",
    params(("id" = u32, Path, description = "Product id")),
    responses(
        (status = OK, description = "The product", body = ProductResponse),
        (status = NOT_FOUND, description = "No product with this id"),
    ),
    tag = CATALOG_TAG,
)]
pub(crate) async fn get_product(
    State(state): State<ApiState>,
    Path(id): Path<u32>,
) -> Result<Json<ProductResponse>, ApiError> {
    let products = state.try_get_slice::<Catalog>()?.repository.clone();
    Ok(Json(products.require(id).await?.into()))
}
