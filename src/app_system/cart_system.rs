use std::sync::Arc;

use tracing::{error, info, warn};

use super::SystemError;
use crate::cart_actor::CartService;
use crate::clients::CartClient;
use crate::config::{CartConfig, CorruptCartPolicy};
use crate::domain::Cart;
use crate::lookup::{HttpStockLookup, StockLookup};
use crate::notify::{Notifier, TracingNotifier};
use crate::persisted::{PersistError, PersistedValue};
use crate::storage::{FileStore, KeyValueStore};

/// Owns the running cart service.
///
/// Responsible for rehydrating the cart, starting the service, and
/// handling shutdown. `cart_client` is the handle to pass to whatever
/// composes the UI.
pub struct CartSystem {
    pub cart_client: CartClient,
    handle: tokio::task::JoinHandle<()>,
}

impl CartSystem {
    /// Starts a cart service from injected collaborators.
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns `SystemError::Persist` when the store cannot be read, or when
    /// the stored cart is corrupt and the policy is [`CorruptCartPolicy::Fail`].
    pub fn start(
        config: &CartConfig,
        store: Arc<dyn KeyValueStore>,
        lookup: Arc<dyn StockLookup>,
        notifier: Arc<dyn Notifier>,
    ) -> Result<Self, SystemError> {
        info!(key = %config.storage_key, "Starting cart system");

        let cart = match PersistedValue::initialize(Arc::clone(&store), &config.storage_key, Cart::new()) {
            Ok(cart) => cart,
            Err(e @ PersistError::Corrupt { .. }) if config.corrupt_policy == CorruptCartPolicy::Discard => {
                warn!(error = %e, "Discarding unreadable cart, starting empty");
                PersistedValue::detached(store, &config.storage_key, Cart::new())
            }
            Err(e) => {
                error!(error = %e, "Failed to load cart");
                return Err(e.into());
            }
        };

        let (service, cart_client) = CartService::new(config.queue_size, cart, lookup, notifier);
        let handle = tokio::spawn(service.run());

        Ok(Self { cart_client, handle })
    }

    /// Starts a cart backed by [`FileStore`] and [`HttpStockLookup`],
    /// reporting failures through [`TracingNotifier`].
    pub fn from_config(config: &CartConfig) -> Result<Self, SystemError> {
        let store = Arc::new(FileStore::new(config.storage_dir.clone()));
        let lookup = Arc::new(HttpStockLookup::new(&config.api_base_url, config.lookup_timeout)?);
        Self::start(config, store, lookup, Arc::new(TracingNotifier))
    }

    pub async fn shutdown(self) -> Result<(), SystemError> {
        info!("Shutting down cart system...");

        // Clones of the client may outlive us, so ask the service to stop
        // instead of relying on the channel closing.
        if let Err(e) = self.cart_client.request_shutdown().await {
            warn!(error = %e, "Cart service already stopped");
        }
        drop(self.cart_client);

        if let Err(e) = self.handle.await {
            error!("Actor task failed: {:?}", e);
            return Err(SystemError::ActorTask(e.to_string()));
        }

        info!("Cart system shutdown complete.");
        Ok(())
    }
}
