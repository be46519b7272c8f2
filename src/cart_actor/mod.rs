//! The cart service: a single task owning the persisted cart.
//!
//! Requests are processed one at a time, so an add that is waiting on the
//! lookup service holds back later mutations instead of racing them.

pub mod error;
pub mod messages;
pub mod service;

pub use error::*;
pub use messages::*;
pub use service::*;
