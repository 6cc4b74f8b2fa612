//! Domain Models

pub mod catalog;
pub mod voucher;

// Re-exports
pub use catalog::{CatalogFilter, CatalogItem, ItemDetails, ItemType};
pub use voucher::{
    PaymentMethod, PaymentType, PaymentUpdate, Refund, Voucher, VoucherCreate, VoucherLine,
};
