use tokio::sync::mpsc;
use tracing::{debug, error, instrument};

use crate::cart_actor::{CartError, CartRequest};
use crate::domain::{Cart, ProductId, UpdateProductAmount};

/// Cloneable handle to a running [`CartService`](crate::cart_actor::CartService).
///
/// This is the cart as the rest of the application sees it: a snapshot
/// read and three mutations. Mutations never return an error; failures are
/// delivered to the service's notifier and leave the cart unchanged.
#[derive(Debug, Clone)]
pub struct CartClient {
    sender: mpsc::Sender<CartRequest>,
}

impl CartClient {
    pub fn new(sender: mpsc::Sender<CartRequest>) -> Self {
        Self { sender }
    }

    /// Adds one unit of `product_id` if stock allows.
    pub async fn add_product(&self, product_id: ProductId) {
        Self::settle(self.try_add_product(product_id).await);
    }

    /// Drops the line for `product_id`.
    pub async fn remove_product(&self, product_id: ProductId) {
        Self::settle(self.try_remove_product(product_id).await);
    }

    /// Sets the held quantity of a line already in the cart.
    pub async fn update_product_amount(&self, update: UpdateProductAmount) {
        Self::settle(self.try_update_product_amount(update).await);
    }

    fn settle(result: Result<(), CartError>) {
        match result {
            Ok(()) => {}
            Err(e @ CartError::ActorCommunicationError(_)) => error!(error = %e, "Cart service unreachable"),
            Err(e) => debug!(error = %e, "Cart operation rejected"),
        }
    }

    #[instrument(skip(self))]
    pub(crate) async fn request_shutdown(&self) -> Result<(), CartError> {
        self.sender
            .send(CartRequest::Shutdown)
            .await
            .map_err(|_| CartError::ActorCommunicationError("Actor closed".to_string()))
    }
}

client_method!(CartClient => pub fn get_cart() -> Cart as CartRequest::GetCart, Error = CartError);
client_method!(CartClient => pub(crate) fn try_add_product(product_id: ProductId) -> () as CartRequest::AddProduct, Error = CartError);
client_method!(CartClient => pub(crate) fn try_remove_product(product_id: ProductId) -> () as CartRequest::RemoveProduct, Error = CartError);
client_method!(CartClient => pub(crate) fn try_update_product_amount(update: UpdateProductAmount) -> () as CartRequest::UpdateProductAmount, Error = CartError);
