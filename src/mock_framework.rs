//! # Mock Framework
//!
//! Test doubles for the cart's collaborators.
//!
//! - [`MockLookup`] serves scripted products and stock, can fail on demand,
//!   counts calls, and can hold stock lookups in flight until released.
//! - [`RecordingNotifier`] collects every message the cart reports.
//! - [`create_mock_client`] plus the `expect_*` helpers test [`CartClient`]
//!   against a channel we control instead of a running service.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot, Semaphore};

use crate::cart_actor::{CartError, CartRequest};
use crate::clients::CartClient;
use crate::domain::{Cart, Product, ProductId, Stock};
use crate::lookup::{LookupError, StockLookup};
use crate::notify::Notifier;

#[derive(Default)]
struct Catalog {
    products: HashMap<ProductId, Product>,
    stock: HashMap<ProductId, u32>,
    failing_products: HashSet<ProductId>,
    failing_stock: HashSet<ProductId>,
}

/// Scriptable [`StockLookup`].
pub struct MockLookup {
    catalog: Mutex<Catalog>,
    product_calls: AtomicUsize,
    stock_calls: AtomicUsize,
    gate: Option<Semaphore>,
}

impl MockLookup {
    pub fn new() -> Self {
        Self {
            catalog: Mutex::new(Catalog::default()),
            product_calls: AtomicUsize::new(0),
            stock_calls: AtomicUsize::new(0),
            gate: None,
        }
    }

    /// Stock lookups wait until [`release`](MockLookup::release) hands out a permit.
    pub fn gated() -> Self {
        Self {
            gate: Some(Semaphore::new(0)),
            ..Self::new()
        }
    }

    pub fn with_product(self, id: ProductId, stock: u32) -> Self {
        {
            let mut catalog = self.catalog.lock().unwrap();
            catalog
                .products
                .insert(id, Product::new(id, format!("Product {id}"), 99.9, format!("https://img/{id}.jpg")));
            catalog.stock.insert(id, stock);
        }
        self
    }

    pub fn set_product(&self, product: Product) {
        self.catalog.lock().unwrap().products.insert(product.id, product);
    }

    pub fn set_stock(&self, id: ProductId, amount: u32) {
        self.catalog.lock().unwrap().stock.insert(id, amount);
    }

    pub fn fail_product(&self, id: ProductId) {
        self.catalog.lock().unwrap().failing_products.insert(id);
    }

    pub fn fail_stock(&self, id: ProductId) {
        self.catalog.lock().unwrap().failing_stock.insert(id);
    }

    pub fn release(&self, permits: usize) {
        if let Some(gate) = &self.gate {
            gate.add_permits(permits);
        }
    }

    pub fn product_calls(&self) -> usize {
        self.product_calls.load(Ordering::SeqCst)
    }

    pub fn stock_calls(&self) -> usize {
        self.stock_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StockLookup for MockLookup {
    async fn get_product(&self, id: ProductId) -> Result<Product, LookupError> {
        self.product_calls.fetch_add(1, Ordering::SeqCst);
        let catalog = self.catalog.lock().unwrap();
        if catalog.failing_products.contains(&id) {
            return Err(LookupError::Status {
                status: 500,
                url: format!("/products/{id}"),
            });
        }
        catalog.products.get(&id).cloned().ok_or(LookupError::NotFound(id))
    }

    async fn get_stock(&self, id: ProductId) -> Result<Stock, LookupError> {
        self.stock_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
        let catalog = self.catalog.lock().unwrap();
        if catalog.failing_stock.contains(&id) {
            return Err(LookupError::Transport("connection reset".to_string()));
        }
        catalog
            .stock
            .get(&id)
            .map(|amount| Stock::new(id, *amount))
            .ok_or(LookupError::NotFound(id))
    }
}

/// Notifier that remembers every message.
#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<String>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify_error(&self, message: &str) {
        self.messages.lock().unwrap().push(message.to_string());
    }
}

/// Creates a client wired to a receiver the test drives by hand.
pub fn create_mock_client(buffer_size: usize) -> (CartClient, mpsc::Receiver<CartRequest>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (CartClient::new(sender), receiver)
}

/// Helper to verify that the next message is a GetCart request
pub async fn expect_get_cart(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<oneshot::Sender<Result<Cart, CartError>>> {
    match receiver.recv().await {
        Some(CartRequest::GetCart { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is an AddProduct request
pub async fn expect_add_product(
    receiver: &mut mpsc::Receiver<CartRequest>,
) -> Option<(ProductId, oneshot::Sender<Result<(), CartError>>)> {
    match receiver.recv().await {
        Some(CartRequest::AddProduct { product_id, respond_to }) => Some((product_id, respond_to)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn scripted_lookup_and_failures() {
        let lookup = MockLookup::new().with_product(1, 3);
        assert_eq!(lookup.get_stock(1).await, Ok(Stock::new(1, 3)));
        assert_eq!(lookup.get_product(2).await, Err(LookupError::NotFound(2)));

        lookup.fail_stock(1);
        assert!(matches!(lookup.get_stock(1).await, Err(LookupError::Transport(_))));
        assert_eq!(lookup.stock_calls(), 2);
        assert_eq!(lookup.product_calls(), 1);
    }
}
