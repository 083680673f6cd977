use shop_kernel::server::ApiError;
use std::borrow::Cow;

#[shop_derive::shop_error]
pub enum CatalogError {
    #[error("Product query failed{}: {source}", format_context(.context))]
    Query { source: surrealdb::Error, context: Option<Cow<'static, str>> },

    #[error("Product {id} not found")]
    NotFound { id: u32 },

    /// A stored row does not fit the product model.
    #[error("Invalid product record{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { id } => Self::not_found(format!("product {id}")),
            other => Self::Internal { message: other.to_string().into(), context: None },
        }
    }
}
