use tokio::sync::oneshot;

use super::error::CartError;
use crate::domain::{Cart, ProductId, UpdateProductAmount};

pub type ServiceResult<T, E> = std::result::Result<T, E>;
pub type ServiceResponse<T, E> = oneshot::Sender<ServiceResult<T, E>>;

/// Messages understood by [`CartService`](super::CartService).
#[derive(Debug)]
pub enum CartRequest {
    GetCart {
        respond_to: ServiceResponse<Cart, CartError>,
    },
    AddProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<(), CartError>,
    },
    RemoveProduct {
        product_id: ProductId,
        respond_to: ServiceResponse<(), CartError>,
    },
    UpdateProductAmount {
        update: UpdateProductAmount,
        respond_to: ServiceResponse<(), CartError>,
    },
    Shutdown,
}
