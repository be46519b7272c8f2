//! System orchestration, startup, and shutdown logic.

pub mod cart_system;
pub mod telemetry;
pub mod error;

pub use cart_system::*;
pub use telemetry::*;
pub use error::*;
