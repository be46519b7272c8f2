use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

use super::error::{CartError, CartOperation};
use super::messages::{CartRequest, ServiceResponse, ServiceResult};
use crate::clients::CartClient;
use crate::domain::{Cart, ProductId, UpdateProductAmount};
use crate::lookup::StockLookup;
use crate::notify::Notifier;
use crate::persisted::PersistedValue;

/// Owns the persisted cart and applies mutations in arrival order.
///
/// Every mutation either commits a complete new snapshot through
/// [`PersistedValue::set`] or leaves the cart untouched and reports exactly
/// one message to the notifier.
pub struct CartService {
    receiver: mpsc::Receiver<CartRequest>,
    cart: PersistedValue<Cart>,
    lookup: Arc<dyn StockLookup>,
    notifier: Arc<dyn Notifier>,
}

impl CartService {
    pub fn new(
        buffer_size: usize,
        cart: PersistedValue<Cart>,
        lookup: Arc<dyn StockLookup>,
        notifier: Arc<dyn Notifier>,
    ) -> (Self, CartClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let service = Self {
            receiver,
            cart,
            lookup,
            notifier,
        };
        let client = CartClient::new(sender);
        (service, client)
    }

    #[instrument(name = "cart_service", skip(self))]
    pub async fn run(mut self) {
        info!(key = %self.cart.key(), items = self.snapshot().len(), "CartService starting");
        while let Some(msg) = self.receiver.recv().await {
            match msg {
                CartRequest::GetCart { respond_to } => {
                    let _ = respond_to.send(Ok(self.snapshot()));
                }
                CartRequest::AddProduct { product_id, respond_to } => {
                    self.handle_add_product(product_id, respond_to).await;
                }
                CartRequest::RemoveProduct { product_id, respond_to } => {
                    self.handle_remove_product(product_id, respond_to);
                }
                CartRequest::UpdateProductAmount { update, respond_to } => {
                    self.handle_update_product_amount(update, respond_to).await;
                }
                CartRequest::Shutdown => {
                    info!("CartService shutting down");
                    break;
                }
            }
        }
        info!("CartService stopped");
    }

    /// Current cart; a cleared value reads as empty.
    fn snapshot(&self) -> Cart {
        self.cart.value().cloned().unwrap_or_default()
    }

    #[instrument(skip(self, respond_to))]
    async fn handle_add_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing add_product request");
        let result = self.add_product(product_id).await;
        self.respond(result, respond_to);
    }

    #[instrument(skip(self, respond_to))]
    fn handle_remove_product(&mut self, product_id: ProductId, respond_to: ServiceResponse<(), CartError>) {
        debug!("Processing remove_product request");
        let result = self.remove_product(product_id);
        self.respond(result, respond_to);
    }

    #[instrument(fields(product_id = update.product_id, amount = update.amount), skip(self, update, respond_to))]
    async fn handle_update_product_amount(
        &mut self,
        update: UpdateProductAmount,
        respond_to: ServiceResponse<(), CartError>,
    ) {
        debug!("Processing update_product_amount request");
        let result = self.update_product_amount(update).await;
        self.respond(result, respond_to);
    }

    /// Reports a failure to the notifier, then answers the caller.
    fn respond(&self, result: ServiceResult<(), CartError>, respond_to: ServiceResponse<(), CartError>) {
        if let Err(e) = &result {
            warn!(error = %e, "Cart operation rejected");
            self.notifier.notify_error(e.user_message());
        }
        let _ = respond_to.send(result);
    }

    async fn add_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let operation = CartOperation::AddProduct;
        let (product, stock) = tokio::try_join!(
            self.lookup.get_product(product_id),
            self.lookup.get_stock(product_id),
        )
        .map_err(|source| CartError::LookupFailed { operation, source })?;

        let cart = self.snapshot();
        let current = cart.amount_of(product_id);
        if stock.amount <= current {
            return Err(CartError::OutOfStock {
                product_id,
                requested: i64::from(current) + 1,
                available: stock.amount,
            });
        }

        self.commit(cart.with_unit_added(&product), operation)?;
        info!(amount = current + 1, "Product added");
        Ok(())
    }

    fn remove_product(&mut self, product_id: ProductId) -> Result<(), CartError> {
        let operation = CartOperation::RemoveProduct;
        let cart = self.snapshot();
        if cart.find(product_id).is_none() {
            return Err(CartError::NotFound { product_id, operation });
        }

        self.commit(cart.without(product_id), operation)?;
        info!("Product removed");
        Ok(())
    }

    async fn update_product_amount(&mut self, update: UpdateProductAmount) -> Result<(), CartError> {
        let operation = CartOperation::UpdateProductAmount;
        let UpdateProductAmount { product_id, amount } = update;

        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }

        let cart = self.snapshot();
        if cart.find(product_id).is_none() {
            return Err(CartError::NotFound { product_id, operation });
        }

        let stock = self
            .lookup
            .get_stock(product_id)
            .await
            .map_err(|source| CartError::LookupFailed { operation, source })?;

        // amount == stock is allowed here, unlike add_product.
        let new_amount = u32::try_from(amount)
            .ok()
            .filter(|requested| *requested <= stock.amount)
            .ok_or(CartError::OutOfStock {
                product_id,
                requested: amount,
                available: stock.amount,
            })?;

        self.commit(cart.with_amount(product_id, new_amount), operation)?;
        info!(amount = new_amount, "Product amount updated");
        Ok(())
    }

    fn commit(&mut self, cart: Cart, operation: CartOperation) -> Result<(), CartError> {
        self.cart.set(cart).map_err(|e| CartError::PersistFailed {
            operation,
            reason: e.to_string(),
        })
    }
}
