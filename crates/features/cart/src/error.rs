use shop_catalog::CatalogError;
use shop_domain::constants::{FLASH_INVALID_QUANTITY, FLASH_NOT_ENOUGH_STOCK, FLASH_PRODUCT_NOT_FOUND};
use shop_domain::flash::FlashMessage;
use shop_kernel::server::ApiError;
use std::borrow::Cow;

#[shop_derive::shop_error]
pub enum CartError {
    #[error("Requested {requested} but only {available} in stock")]
    NotEnoughStock { requested: u32, available: u32 },

    #[error("Product {id} not found")]
    ProductNotFound { id: u32 },

    #[error("Quantity must be at least 1, got {quantity}")]
    InvalidQuantity { quantity: i64 },

    #[error("Catalog error{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },
}

impl CartError {
    /// Flash shown to the shopper when an add is refused. `None` for server faults.
    #[must_use]
    pub fn flash(&self) -> Option<FlashMessage> {
        let text = match self {
            Self::NotEnoughStock { .. } => FLASH_NOT_ENOUGH_STOCK,
            Self::ProductNotFound { .. } => FLASH_PRODUCT_NOT_FOUND,
            Self::InvalidQuantity { .. } => FLASH_INVALID_QUANTITY,
            Self::Catalog { .. } => return None,
        };
        Some(FlashMessage::error(text))
    }
}

impl From<CartError> for ApiError {
    fn from(err: CartError) -> Self {
        match err {
            CartError::Catalog { source, .. } => source.into(),
            CartError::ProductNotFound { id } => Self::not_found(format!("product {id}")),
            other => Self::bad_request(other.to_string()),
        }
    }
}
