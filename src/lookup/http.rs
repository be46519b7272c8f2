use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{LookupError, StockLookup};
use crate::domain::{Product, ProductId, Stock};

/// Lookup over a JSON REST API exposing `/products/{id}` and `/stock/{id}`.
#[derive(Debug, Clone)]
pub struct HttpStockLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStockLookup {
    /// # Errors
    /// Returns `LookupError::Transport` if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, LookupError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self::with_client(client, base_url))
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { client, base_url }
    }

    fn url(&self, resource: &str, id: ProductId) -> String {
        format!("{}/{resource}/{id}", self.base_url)
    }

    async fn fetch<T: DeserializeOwned>(&self, resource: &str, id: ProductId) -> Result<T, LookupError> {
        let url = self.url(resource, id);
        debug!(%url, "Sending request");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        match response.status() {
            status if status.is_success() => response
                .json::<T>()
                .await
                .map_err(|e| LookupError::Decode(e.to_string())),
            StatusCode::NOT_FOUND => Err(LookupError::NotFound(id)),
            status => Err(LookupError::Status {
                status: status.as_u16(),
                url,
            }),
        }
    }
}

#[async_trait]
impl StockLookup for HttpStockLookup {
    #[instrument(skip(self))]
    async fn get_product(&self, id: ProductId) -> Result<Product, LookupError> {
        self.fetch("products", id).await
    }

    #[instrument(skip(self))]
    async fn get_stock(&self, id: ProductId) -> Result<Stock, LookupError> {
        self.fetch("stock", id).await
    }
}
