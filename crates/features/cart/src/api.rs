use crate::CartFeature;
use axum::Json;
use axum::extract::State;
use shop_derive::{api_handler, api_model};
use shop_domain::cart::CartSummary;
use shop_domain::constants::CART_TAG;
use shop_kernel::server::{ApiError, ApiState, Session};

#[api_model]
/// One cart line
pub struct CartLineResponse {
    pub product_id: u32,
    pub name: String,
    pub quantity: u32,
    /// Unit price in minor units
    pub unit_price: u64,
    /// Line subtotal in minor units
    pub subtotal: u64,
}

#[api_model]
/// The visitor's cart
pub struct CartResponse {
    pub lines: Vec<CartLineResponse>,
    /// Number of items across all lines
    pub item_count: u64,
    /// Total in minor units
    pub total: u64,
    /// Total formatted as `units.cents`
    pub total_display: String,
}

impl From<CartSummary> for CartResponse {
    fn from(summary: CartSummary) -> Self {
        let item_count = summary.item_count();
        let lines: Vec<CartLineResponse> = summary
            .lines
            .into_iter()
            .map(|line| CartLineResponse {
                product_id: line.product.id,
                unit_price: line.product.price.minor(),
                name: line.product.name,
                quantity: line.quantity,
                subtotal: line.subtotal.minor(),
            })
            .collect();

        Self {
            lines,
            item_count,
            total: summary.total.minor(),
            total_display: summary.total.to_string(),
        }
    }
}

#[api_handler(
    get,
    path = "/api/cart",
    responses((status = OK, description = "Lines and total of the session cart", body = CartResponse)),
    tag = CART_TAG,
)]
pub(crate) async fn get_cart(
    State(state): State<ApiState>,
    session: Session,
) -> Result<Json<CartResponse>, ApiError> {
    let service = state.try_get_slice::<CartFeature>()?.service.clone();
    Ok(Json(service.summary(&session).await?.into()))
}
