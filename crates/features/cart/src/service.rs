use crate::error::{CartError, CartErrorExt};
use shop_catalog::ProductRepository;
use shop_domain::cart::{Cart, CartSummary};
use shop_domain::constants::CART_QTY_PREFIX;
use shop_kernel::server::Session;
use tracing::{debug, instrument};

/// Cart operations over the visitor's session.
#[derive(Debug, Clone)]
pub struct CartService {
    products: ProductRepository,
}

impl CartService {
    #[must_use]
    pub const fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Adds `quantity` of a product to the session cart.
    ///
    /// The requested quantity alone is checked against stock; stock is not reserved.
    ///
    /// # Errors
    /// [`CartError::InvalidQuantity`] below 1, [`CartError::ProductNotFound`] for unknown ids,
    /// [`CartError::NotEnoughStock`] when the request exceeds stock.
    #[instrument(skip(self, session), fields(session = session.id()))]
    pub async fn add(&self, session: &Session, product_id: u32, quantity: i64) -> Result<u32, CartError> {
        let requested = u32::try_from(quantity)
            .ok()
            .filter(|&q| q > 0)
            .ok_or(CartError::InvalidQuantity { quantity })?;

        let product = self
            .products
            .get(product_id)
            .await
            .context("Checking stock")?
            .ok_or(CartError::ProductNotFound { id: product_id })?;

        if !product.has_stock_for(requested) {
            return Err(CartError::NotEnoughStock { requested, available: product.stock });
        }

        let total = session.with(|data| {
            data.cart.add(product_id, requested);
            data.cart.quantity(product_id)
        });
        debug!(product_id, requested, total, "Added to cart");
        Ok(total)
    }

    /// Applies every `qty_<id>` field to the session cart. Returns the number of fields applied.
    pub fn update(&self, session: &Session, fields: &[(String, String)]) -> usize {
        session.with(|data| apply_quantity_fields(&mut data.cart, fields))
    }

    /// Lines and total of the session cart, priced from the catalog.
    ///
    /// # Errors
    /// Catalog query failures.
    pub async fn summary(&self, session: &Session) -> Result<CartSummary, CartError> {
        let cart = session.cart();
        let products =
            self.products.find_many(cart.product_ids()).await.context("Pricing cart")?;
        Ok(CartSummary::build(&cart, &products))
    }
}

/// `qty_<id>` fields set their line; values that do not parse count as 0, and 0 or less
/// removes the line. Fields with other names or non-numeric ids are ignored.
pub(crate) fn apply_quantity_fields(cart: &mut Cart, fields: &[(String, String)]) -> usize {
    let mut applied = 0;
    for (key, value) in fields {
        let Some(id) = key.strip_prefix(CART_QTY_PREFIX).and_then(|id| id.parse::<u32>().ok())
        else {
            continue;
        };
        cart.set(id, value.trim().parse::<i64>().unwrap_or(0));
        applied += 1;
    }
    applied
}
