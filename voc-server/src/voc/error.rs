//! 凭证提交错误类型

use thiserror::Error;

/// Errors surfaced by the storage collaborators
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Item not found: {0}")]
    NotFound(String),

    #[error("Insufficient stock for {0}")]
    InsufficientStock(String),

    #[error("Storage error: {0}")]
    Backend(String),
}

/// 凭证提交错误
///
/// 提交前的每一个失败都不会产生任何副作用；凭证落库之后的
/// 库存扣减失败由编排器记录日志并继续。
#[derive(Debug, Error)]
pub enum VocError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Cannot commit an empty cart")]
    EmptyCart,

    #[error("Deposit amount must be greater than zero")]
    InvalidDeposit,

    /// 行数量必须 ≥ 1；报出违规商品的名称
    #[error("Invalid quantity for {0}")]
    InvalidQuantity(String),

    /// 复核失败的条目名称集合 (缺货的带 "(insufficient quantity)" 后缀)
    #[error("Invalid items in cart: {}", .0.join(", "))]
    StockConflict(Vec<String>),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("Failed to persist voucher: {0}")]
    Persistence(String),
}

/// Result type for voucher commit operations
pub type VocResult<T> = Result<T, VocError>;
