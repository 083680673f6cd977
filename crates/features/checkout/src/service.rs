use crate::error::{CheckoutError, CheckoutErrorExt};
use shop_catalog::ProductRepository;
use shop_domain::cart::{Cart, CartSummary};
use shop_domain::checkout::{CheckoutDetails, CheckoutForm};
use shop_kernel::server::Session;
use tracing::{info, instrument};

/// A placed order. Nothing is persisted; stock is left untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfirmation {
    pub details: CheckoutDetails,
    pub summary: CartSummary,
}

#[derive(Debug, Clone)]
pub struct CheckoutService {
    products: ProductRepository,
}

impl CheckoutService {
    #[must_use]
    pub const fn new(products: ProductRepository) -> Self {
        Self { products }
    }

    /// Priced cart of the session, refusing an empty one.
    ///
    /// # Errors
    /// [`CheckoutError::EmptyCart`] when nothing is in the cart.
    pub async fn review(&self, session: &Session) -> Result<CartSummary, CheckoutError> {
        self.price(&session.cart()).await
    }

    async fn price(&self, cart: &Cart) -> Result<CartSummary, CheckoutError> {
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart {});
        }
        let products =
            self.products.find_many(cart.product_ids()).await.context("Pricing checkout")?;
        Ok(CartSummary::build(cart, &products))
    }

    /// Validates the shipping details and takes the ordered items out of the session cart.
    /// Items added to the cart while the order was being placed are kept.
    ///
    /// The form is checked with the same trim rule the browser applies, so a bypassed
    /// client check cannot place an order with blank fields.
    ///
    /// # Errors
    /// [`CheckoutError::EmptyCart`] or [`CheckoutError::MissingRequiredField`]; the cart is
    /// kept in both cases.
    #[instrument(skip_all, fields(session = session.id()))]
    pub async fn place_order(
        &self,
        session: &Session,
        form: &CheckoutForm,
    ) -> Result<OrderConfirmation, CheckoutError> {
        let ordered = session.cart();
        let summary = self.price(&ordered).await?;
        let details = form.validate().context("Validating shipping details")?;

        session.with(|data| data.cart.subtract(&ordered));
        info!(lines = summary.lines.len(), total = %summary.total, "Order placed");
        Ok(OrderConfirmation { details, summary })
    }
}
