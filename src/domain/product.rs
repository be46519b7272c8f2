use serde::{Deserialize, Serialize};

/// Catalog identifier shared by products and their stock records.
pub type ProductId = u64;

/// A product as held in the cart.
///
/// Display fields (`title`, `price`, `image`) are carried through untouched;
/// only `id` and `amount` take part in cart logic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub image: String,
    /// Quantity held in the cart. Catalog lookups may omit it.
    #[serde(default)]
    pub amount: u32,
}

impl Product {
    pub fn new(id: ProductId, title: impl Into<String>, price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            price,
            image: image.into(),
            amount: 0,
        }
    }

    /// Copy of this product with `amount` replaced.
    #[must_use]
    pub fn with_amount(&self, amount: u32) -> Self {
        Self {
            amount,
            ..self.clone()
        }
    }
}

/// Inventory record: the most units of a product that can be held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    pub id: ProductId,
    pub amount: u32,
}

impl Stock {
    pub fn new(id: ProductId, amount: u32) -> Self {
        Self { id, amount }
    }
}

/// Payload for changing the quantity of a line item.
///
/// `amount` is signed so that non-positive requests can be represented and
/// rejected instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateProductAmount {
    pub product_id: ProductId,
    pub amount: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_json_without_amount_defaults_to_zero() {
        let json = r#"{"id":7,"title":"Tênis","price":139.9,"image":"https://img/7.jpg"}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, 7);
        assert_eq!(product.amount, 0);
        assert_eq!(product.title, "Tênis");
    }

    #[test]
    fn with_amount_leaves_original_untouched() {
        let product = Product::new(1, "Shoe", 10.0, "").with_amount(2);
        let bumped = product.with_amount(3);
        assert_eq!(product.amount, 2);
        assert_eq!(bumped.amount, 3);
        assert_eq!(bumped.title, product.title);
    }
}
