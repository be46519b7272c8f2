//! Handles for talking to running services.

#[macro_use]
mod macros;
mod cart_client;

pub use cart_client::*;
