use serde::{Deserialize, Serialize};
use std::fmt;

/// Monetary amount in minor units (cents).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(u64);

impl Money {
    pub const ZERO: Self = Self(0);

    #[must_use]
    pub const fn from_minor(minor: u64) -> Self {
        Self(minor)
    }

    #[must_use]
    pub const fn minor(self) -> u64 {
        self.0
    }

    /// Price of `quantity` items. Saturates instead of wrapping.
    #[must_use]
    pub const fn times(self, quantity: u32) -> Self {
        Self(self.0.saturating_mul(quantity as u64))
    }

    #[must_use]
    pub const fn saturating_add(self, other: Self) -> Self {
        Self(self.0.saturating_add(other.0))
    }
}

impl std::iter::Sum for Money {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Self::saturating_add)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}

/// A product offered in the storefront.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub price: Money,
    pub description: Option<String>,
    /// Path relative to the static directory, e.g. `images/shirt.png`.
    pub image: Option<String>,
    pub stock: u32,
}

impl Product {
    /// Whether `quantity` more items can be taken from stock.
    #[must_use]
    pub const fn has_stock_for(&self, quantity: u32) -> bool {
        quantity <= self.stock
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_formats_with_two_decimals() {
        assert_eq!(Money::from_minor(29_900).to_string(), "299.00");
        assert_eq!(Money::from_minor(5).to_string(), "0.05");
        assert_eq!(Money::from_minor(123_456).to_string(), "1234.56");
    }

    #[test]
    fn money_multiplies_and_sums() {
        let price = Money::from_minor(89_900);
        assert_eq!(price.times(2), Money::from_minor(179_800));
        let total: Money = [price, Money::from_minor(100)].into_iter().sum();
        assert_eq!(total.minor(), 90_000);
        assert_eq!(Money::from_minor(u64::MAX).times(2).minor(), u64::MAX);
    }

    #[test]
    fn stock_check_is_inclusive() {
        let product = Product {
            id: 4,
            name: "Classic Watch".to_owned(),
            price: Money::from_minor(199_900),
            description: None,
            image: None,
            stock: 3,
        };
        assert!(product.has_stock_for(3));
        assert!(!product.has_stock_for(4));
    }
}
