use crate::catalog::{Money, Product};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Quantities per product id. Every stored quantity is greater than zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: BTreeMap<u32, u32>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `quantity` to the line for `product_id`. A zero quantity is ignored.
    pub fn add(&mut self, product_id: u32, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let line = self.items.entry(product_id).or_default();
        *line = line.saturating_add(quantity);
    }

    /// Replaces the quantity of a line; non-positive quantities remove it.
    pub fn set(&mut self, product_id: u32, quantity: i64) {
        if quantity <= 0 {
            self.items.remove(&product_id);
        } else {
            self.items.insert(product_id, u32::try_from(quantity).unwrap_or(u32::MAX));
        }
    }

    #[must_use]
    pub fn quantity(&self, product_id: u32) -> u32 {
        self.items.get(&product_id).copied().unwrap_or_default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn product_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.items.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        self.items.iter().map(|(&id, &q)| (id, q))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Takes the quantities of `ordered` out of this cart. Items added after `ordered`
    /// was read stay in the cart.
    pub fn subtract(&mut self, ordered: &Self) {
        for (product_id, quantity) in ordered.iter() {
            let left = i64::from(self.quantity(product_id)) - i64::from(quantity);
            self.set(product_id, left);
        }
    }
}

/// A priced cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    pub product: Product,
    pub quantity: u32,
    pub subtotal: Money,
}

/// The cart joined with catalog data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartSummary {
    pub lines: Vec<CartLine>,
    pub total: Money,
}

impl CartSummary {
    /// Prices every cart line that has a matching product. Lines for products
    /// that no longer exist are left out.
    #[must_use]
    pub fn build(cart: &Cart, products: &[Product]) -> Self {
        let lines: Vec<CartLine> = cart
            .iter()
            .filter_map(|(id, quantity)| {
                let product = products.iter().find(|p| p.id == id)?;
                Some(CartLine {
                    subtotal: product.price.times(quantity),
                    product: product.clone(),
                    quantity,
                })
            })
            .collect();
        let total = lines.iter().map(|line| line.subtotal).sum();
        Self { lines, total }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of items across the priced lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }
}
