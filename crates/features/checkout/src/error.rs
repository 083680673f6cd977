use shop_catalog::CatalogError;
use shop_domain::checkout::MissingRequiredField;
use shop_domain::constants::{FLASH_CART_EMPTY, FLASH_REQUIRED_FIELDS};
use shop_domain::flash::FlashMessage;
use shop_kernel::server::ApiError;
use std::borrow::Cow;

#[shop_derive::shop_error]
pub enum CheckoutError {
    #[error("Checkout rejected{}: {source}", format_context(.context))]
    MissingRequiredField { source: MissingRequiredField, context: Option<Cow<'static, str>> },

    #[error("Checkout with an empty cart")]
    EmptyCart {},

    #[error("Catalog error{}: {source}", format_context(.context))]
    Catalog { source: CatalogError, context: Option<Cow<'static, str>> },
}

impl CheckoutError {
    /// Flash shown to the shopper and the page to send them to. `None` for server faults.
    #[must_use]
    pub fn flash(&self) -> Option<(FlashMessage, &'static str)> {
        match self {
            Self::EmptyCart {} => Some((FlashMessage::info(FLASH_CART_EMPTY), "/")),
            Self::MissingRequiredField { .. } => {
                Some((FlashMessage::error(FLASH_REQUIRED_FIELDS), "/checkout"))
            },
            Self::Catalog { .. } => None,
        }
    }
}

impl From<CheckoutError> for ApiError {
    fn from(err: CheckoutError) -> Self {
        match err {
            CheckoutError::Catalog { source, .. } => source.into(),
            other => Self::bad_request(other.to_string()),
        }
    }
}
