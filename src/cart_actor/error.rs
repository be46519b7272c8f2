use std::fmt;

use thiserror::Error;

use crate::domain::ProductId;
use crate::lookup::LookupError;

pub const OUT_OF_STOCK_MESSAGE: &str = "Quantidade solicitada fora de estoque";
pub const ADD_FAILED_MESSAGE: &str = "Erro na adição do produto";
pub const REMOVE_FAILED_MESSAGE: &str = "Erro na remoção do produto";
pub const UPDATE_FAILED_MESSAGE: &str = "Erro na alteração de quantidade do produto";
pub const CART_UNAVAILABLE_MESSAGE: &str = "Carrinho indisponível";

/// Cart mutation that produced an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CartOperation {
    AddProduct,
    RemoveProduct,
    UpdateProductAmount,
}

impl CartOperation {
    /// Generic failure message shown for this operation.
    pub const fn failure_message(self) -> &'static str {
        match self {
            Self::AddProduct => ADD_FAILED_MESSAGE,
            Self::RemoveProduct => REMOVE_FAILED_MESSAGE,
            Self::UpdateProductAmount => UPDATE_FAILED_MESSAGE,
        }
    }
}

impl fmt::Display for CartOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AddProduct => "add_product",
            Self::RemoveProduct => "remove_product",
            Self::UpdateProductAmount => "update_product_amount",
        };
        f.write_str(name)
    }
}

/// Errors that can occur during cart operations.
///
/// Callers of the public cart interface never see these; they are turned
/// into [`user_message`](CartError::user_message) strings for the
/// notification sink.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Lookup failed during {operation}: {source}")]
    LookupFailed {
        operation: CartOperation,
        #[source]
        source: LookupError,
    },
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    OutOfStock {
        product_id: ProductId,
        requested: i64,
        available: u32,
    },
    #[error("Product {product_id} not in cart during {operation}")]
    NotFound {
        product_id: ProductId,
        operation: CartOperation,
    },
    #[error("Invalid amount: {0}")]
    InvalidAmount(i64),
    #[error("Failed to persist cart during {operation}: {reason}")]
    PersistFailed {
        operation: CartOperation,
        reason: String,
    },
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

impl CartError {
    /// Fixed message for the notification sink.
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::OutOfStock { .. } | Self::InvalidAmount(_) => OUT_OF_STOCK_MESSAGE,
            Self::LookupFailed { operation, .. }
            | Self::NotFound { operation, .. }
            | Self::PersistFailed { operation, .. } => operation.failure_message(),
            Self::ActorCommunicationError(_) => CART_UNAVAILABLE_MESSAGE,
        }
    }
}
