//! 购物车模型
//!
//! 纯内存的订单组装模型。每一行绑定选入时的商品快照 (名称、单价、
//! 详情) 和当时的可售数量 `available`，数量增减永远不超过
//! `available`；降到零即整行移除。总额随行实时推导，不另存字段。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shared::models::{CatalogItem, ItemDetails, VoucherLine};
use thiserror::Error;

/// 购物车操作错误
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CartError {
    #[error("{0} is out of stock")]
    OutOfStock(String),

    #[error("Cannot add more {name}: only {available} in stock")]
    LimitReached { name: String, available: i32 },

    #[error("Only {available} of {name} in stock")]
    InsufficientStock { name: String, available: i32 },

    #[error("Line {0} does not exist")]
    LineNotFound(usize),
}

/// 购物车行 - 选入时的商品快照加数量
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    /// Catalog record ID in "table:key" form
    pub item_id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub details: ItemDetails,
    pub quantity: i32,
    /// Units on hand when the item was selected; quantity never
    /// exceeds this.
    #[serde(default)]
    pub available: i32,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    /// Freeze this line into a voucher line
    pub fn to_voucher_line(&self) -> VoucherLine {
        VoucherLine {
            item_id: self.item_id.clone(),
            name: self.name.clone(),
            quantity: self.quantity,
            price: self.price,
            category: self.category.clone(),
            details: self.details.clone(),
        }
    }
}

/// 数量变更的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityChange {
    /// 行仍在，数量已调整
    Updated(i32),
    /// 数量降到零，整行已移除
    Removed,
}

/// 购物车
///
/// 行的插入顺序就是展示顺序。
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a cart from previously assembled lines
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// 选入一个商品
    ///
    /// 已在购物车中的商品数量加一；新商品追加为数量 1 的行，
    /// 每个商品至多一行。零库存商品拒绝选入，数量达到选入时的
    /// 可售上限后拒绝加一。
    pub fn add_or_increment(&mut self, item: &CatalogItem) -> Result<(), CartError> {
        if item.qty <= 0 {
            return Err(CartError::OutOfStock(item.name.clone()));
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item.id) {
            if line.quantity >= line.available {
                return Err(CartError::LimitReached {
                    name: line.name.clone(),
                    available: line.available,
                });
            }
            line.quantity += 1;
            return Ok(());
        }

        self.lines.push(CartLine {
            item_id: item.id.clone(),
            name: item.name.clone(),
            price: item.price,
            category: item.category.clone(),
            details: item.details.clone(),
            quantity: 1,
            available: item.qty,
        });
        Ok(())
    }

    /// 按增量调整某一行的数量
    ///
    /// 降到零或以下时整行移除；超出选入时的可售上限则报错且
    /// 该行保持原样。
    pub fn change_quantity(
        &mut self,
        index: usize,
        delta: i32,
    ) -> Result<QuantityChange, CartError> {
        let line = self
            .lines
            .get_mut(index)
            .ok_or(CartError::LineNotFound(index))?;

        let next = line.quantity + delta;
        if next <= 0 {
            self.lines.remove(index);
            return Ok(QuantityChange::Removed);
        }
        if next > line.available {
            return Err(CartError::InsufficientStock {
                name: line.name.clone(),
                available: line.available,
            });
        }

        line.quantity = next;
        Ok(QuantityChange::Updated(next))
    }

    /// 移除一行
    pub fn remove(&mut self, index: usize) -> Result<CartLine, CartError> {
        if index >= self.lines.len() {
            return Err(CartError::LineNotFound(index));
        }
        Ok(self.lines.remove(index))
    }

    /// 实时总额 (所有行的单价 × 数量之和)
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(|l| l.line_total()).sum()
    }

    /// 冻结为凭证行
    pub fn snapshot(&self) -> Vec<VoucherLine> {
        self.lines.iter().map(|l| l.to_voucher_line()).collect()
    }

    /// 清空 (提交成功后调用)
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}
