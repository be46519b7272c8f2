use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::product::{Product, ProductId};

/// A line list that breaks the cart's rules.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InvalidCart {
    #[error("Product {0} appears more than once")]
    DuplicateId(ProductId),
    #[error("Product {0} is held with amount 0")]
    ZeroAmount(ProductId),
}

/// Ordered line items, at most one per product id, each held at least once.
///
/// Every mutation returns a new `Cart`; the snapshot it was derived from is
/// never touched, so readers holding an older snapshot keep a consistent view.
/// Deserialization goes through [`Cart::validate`], so stored data that breaks
/// the rules is rejected instead of loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Product>", into = "Vec<Product>")]
pub struct Cart(Vec<Product>);

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks that ids are unique and every amount is positive.
    pub fn validate(&self) -> Result<(), InvalidCart> {
        let mut seen = HashSet::with_capacity(self.0.len());
        for product in &self.0 {
            if !seen.insert(product.id) {
                return Err(InvalidCart::DuplicateId(product.id));
            }
            if product.amount == 0 {
                return Err(InvalidCart::ZeroAmount(product.id));
            }
        }
        Ok(())
    }

    pub fn items(&self) -> &[Product] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn find(&self, id: ProductId) -> Option<&Product> {
        self.0.iter().find(|product| product.id == id)
    }

    /// Units of `id` currently held, zero when absent.
    pub fn amount_of(&self, id: ProductId) -> u32 {
        self.find(id).map_or(0, |product| product.amount)
    }

    /// One more unit of `fetched`.
    ///
    /// An existing line is replaced in place by the fetched catalog data with
    /// its amount bumped; otherwise the product is appended with amount 1.
    #[must_use]
    pub fn with_unit_added(&self, fetched: &Product) -> Self {
        match self.find(fetched.id) {
            Some(existing) => {
                let amount = existing.amount + 1;
                self.0
                    .iter()
                    .map(|product| {
                        if product.id == fetched.id {
                            fetched.with_amount(amount)
                        } else {
                            product.clone()
                        }
                    })
                    .collect()
            }
            None => {
                let mut items = self.0.clone();
                items.push(fetched.with_amount(1));
                Self(items)
            }
        }
    }

    /// Everything except the line for `id`, relative order kept.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        self.0
            .iter()
            .filter(|product| product.id != id)
            .cloned()
            .collect()
    }

    /// Same lines, with the amount of `id` replaced.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        self.0
            .iter()
            .map(|product| {
                if product.id == id {
                    product.with_amount(amount)
                } else {
                    product.clone()
                }
            })
            .collect()
    }
}

impl TryFrom<Vec<Product>> for Cart {
    type Error = InvalidCart;

    fn try_from(items: Vec<Product>) -> Result<Self, Self::Error> {
        let cart = Self(items);
        cart.validate()?;
        Ok(cart)
    }
}

impl From<Cart> for Vec<Product> {
    fn from(cart: Cart) -> Self {
        cart.0
    }
}

impl FromIterator<Product> for Cart {
    fn from_iter<I: IntoIterator<Item = Product>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Cart {
    type Item = Product;
    type IntoIter = std::vec::IntoIter<Product>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
