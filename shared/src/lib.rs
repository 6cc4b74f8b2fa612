//! Shared types for the VOC service
//!
//! Domain models used by both the server and clients: catalog items,
//! the category-keyed detail union, voucher records and payment enums.

pub mod models;
pub mod types;

// Re-exports
pub use serde::{Deserialize, Serialize};
