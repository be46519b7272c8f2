use thiserror::Error;

use crate::lookup::LookupError;
use crate::persisted::PersistError;

/// Errors that can occur while starting or stopping the cart system.
#[derive(Debug, Error)]
pub enum SystemError {
    #[error("Failed to load cart: {0}")]
    Persist(#[from] PersistError),
    #[error("Failed to build lookup service: {0}")]
    Lookup(#[from] LookupError),
    #[error("Actor task failed: {0}")]
    ActorTask(String),
}
