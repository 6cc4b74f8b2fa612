//! 凭证提交编排
//!
//! 一次提交 (commit) 的流程：
//!
//! 1. 前置校验 (凭证号、客户名、非空购物车、订金金额)
//! 2. 并发复核每条购物车行的当前库存，聚合全部冲突后整体拒绝
//! 3. 核算支付金额并落库凭证 —— 持久化成功即为提交成功
//! 4. 逐行扣减库存，单行失败只记录日志，不回滚凭证
//! 5. 清空购物车
//!
//! 存储协作方通过 [`CatalogStore`] / [`VoucherStore`] 注入，
//! 生产实现见 `db::repository`。

mod error;
mod service;

pub use error::{StoreError, VocError, VocResult};
pub use service::VocService;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::Deserialize;
use shared::models::{CatalogFilter, CatalogItem, ItemType, PaymentMethod, PaymentType};
use shared::models::{Voucher, VoucherCreate};
use shared::types::Store;

/// 目录存储接口
#[async_trait]
pub trait CatalogStore: Send + Sync {
    /// Query one category, scoped to a store where the category is
    /// store-scoped.
    async fn query(
        &self,
        item_type: ItemType,
        store: Store,
        filter: &CatalogFilter,
    ) -> Result<Vec<CatalogItem>, StoreError>;

    /// Read a single item by its "table:key" record ID
    async fn read(&self, id: &str) -> Result<CatalogItem, StoreError>;

    /// Atomically decrement stock, failing if fewer than `amount`
    /// units remain.
    async fn decrement(&self, id: &str, amount: i32) -> Result<(), StoreError>;
}

/// 凭证存储接口
#[async_trait]
pub trait VoucherStore: Send + Sync {
    /// Persist a voucher and return the stored record
    async fn create(&self, data: VoucherCreate) -> Result<Voucher, StoreError>;
}

/// 提交时随购物车一起提供的单据头字段
#[derive(Debug, Clone, Deserialize)]
pub struct VocHeader {
    pub voc_number: String,
    pub customer_name: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    #[serde(default)]
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    /// 订金金额；全款时忽略
    #[serde(default, with = "rust_decimal::serde::float")]
    pub deposit_amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests;
