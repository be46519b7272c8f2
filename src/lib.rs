//! # Cart Actor
//!
//! A shopping cart that enforces stock limits against a remote inventory
//! and survives restarts by persisting itself to a durable key-value store.
//!
//! ## Pieces
//!
//! - **Domain types** - [`Product`], [`Stock`], and the id-unique [`Cart`]
//! - **Durable storage** - the [`KeyValueStore`] capability with
//!   [`MemoryStore`] and [`FileStore`], wrapped by the typed [`PersistedValue`]
//! - **Collaborators** - [`StockLookup`] for product and stock records
//!   ([`HttpStockLookup`] over REST), [`Notifier`] for user-facing messages
//! - **Service** - [`CartService`] owns the cart and applies one request at a
//!   time; [`CartClient`] is the cloneable handle the application holds
//! - **System** - [`CartSystem`] rehydrates, starts, and shuts down the service;
//!   [`setup_tracing`] configures logging
//!
//! ## Example Usage
//!
//! ```no_run
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! use cart_actor::{CartConfig, CartSystem, UpdateProductAmount};
//!
//! let system = CartSystem::from_config(&CartConfig::from_env()?)?;
//! let cart = system.cart_client.clone();
//!
//! cart.add_product(1).await;
//! cart.update_product_amount(UpdateProductAmount { product_id: 1, amount: 3 }).await;
//! cart.remove_product(1).await;
//! println!("{:?}", cart.get_cart().await?);
//!
//! system.shutdown().await?;
//! # Ok(())
//! # }
//! ```

pub mod app_system;
pub mod cart_actor;
pub mod clients;
pub mod config;
pub mod domain;
pub mod lookup;
pub mod notify;
pub mod persisted;
pub mod storage;

#[cfg(test)]
mod mock_framework;

pub use app_system::{setup_tracing, CartSystem, SystemError};
pub use cart_actor::{CartError, CartOperation, CartService};
pub use clients::CartClient;
pub use config::{CartConfig, ConfigError, CorruptCartPolicy};
pub use domain::{Cart, InvalidCart, Product, ProductId, Stock, UpdateProductAmount};
pub use lookup::{HttpStockLookup, LookupError, StockLookup};
pub use notify::{Notifier, TracingNotifier};
pub use persisted::{PersistError, PersistedValue};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StorageError};
