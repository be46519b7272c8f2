//! Remote product and stock records.

mod http;

pub use http::HttpStockLookup;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Product, ProductId, Stock};

/// Errors raised by a lookup service.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum LookupError {
    #[error("Record not found: {0}")]
    NotFound(ProductId),
    #[error("Lookup request failed: {0}")]
    Transport(String),
    #[error("Lookup returned HTTP {status} for {url}")]
    Status { status: u16, url: String },
    #[error("Lookup response could not be decoded: {0}")]
    Decode(String),
}

/// Read-only source of truth for products and their stock.
///
/// Implementations must not cache: every call reflects the service's state
/// at the time of the call.
#[async_trait]
pub trait StockLookup: Send + Sync {
    async fn get_product(&self, id: ProductId) -> Result<Product, LookupError>;

    async fn get_stock(&self, id: ProductId) -> Result<Stock, LookupError>;
}
