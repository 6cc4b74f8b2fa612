//! 凭证提交编排器

use std::sync::Arc;

use futures::future::join_all;
use rust_decimal::Decimal;
use shared::models::{PaymentType, Voucher, VoucherCreate};
use shared::types::Store;
use tracing::{error, info};

use crate::cart::Cart;
use crate::payment;

use super::{CatalogStore, StoreError, VocError, VocHeader, VocResult, VoucherStore};

/// 凭证提交编排器
///
/// 持久化凭证是唯一的持久性边界：落库之前的任何失败都不留副作用，
/// 落库之后的库存扣减失败只记录日志。
#[derive(Clone)]
pub struct VocService {
    catalog: Arc<dyn CatalogStore>,
    vouchers: Arc<dyn VoucherStore>,
}

impl VocService {
    pub fn new(catalog: Arc<dyn CatalogStore>, vouchers: Arc<dyn VoucherStore>) -> Self {
        Self { catalog, vouchers }
    }

    /// 提交一张销售凭证
    ///
    /// 成功返回已落库的凭证并清空购物车；任何提交前的失败都保持
    /// 购物车原样。
    pub async fn create_voc(
        &self,
        store: Store,
        staff_email: &str,
        header: VocHeader,
        cart: &mut Cart,
    ) -> VocResult<Voucher> {
        // 1. 前置校验
        if header.voc_number.trim().is_empty() {
            return Err(VocError::MissingField("voc_number"));
        }
        if header.customer_name.trim().is_empty() {
            return Err(VocError::MissingField("customer_name"));
        }
        if cart.is_empty() {
            return Err(VocError::EmptyCart);
        }
        if let Some(line) = cart.lines().iter().find(|l| l.quantity < 1) {
            return Err(VocError::InvalidQuantity(line.name.clone()));
        }
        if header.payment_type == PaymentType::Deposit && header.deposit_amount <= Decimal::ZERO {
            return Err(VocError::InvalidDeposit);
        }

        // 2. 并发复核库存，聚合全部冲突
        self.revalidate(cart).await?;

        // 3. 核算金额并落库 —— 持久性边界
        let summary = payment::reconcile(cart.total(), header.payment_type, header.deposit_amount);
        let deposit = match header.payment_type {
            PaymentType::Deposit => header.deposit_amount,
            PaymentType::Full => Decimal::ZERO,
        };

        let data = VoucherCreate {
            voc_number: header.voc_number,
            customer_name: header.customer_name,
            customer_phone: header.customer_phone,
            payment_type: header.payment_type,
            payment_method: header.payment_method,
            total_amount: summary.total,
            paid_amount: summary.paid,
            balance_amount: summary.balance,
            deposit_amount: deposit,
            notes: header.notes,
            items: cart.snapshot(),
            store,
            staff_email: staff_email.to_string(),
        };

        let voucher = self
            .vouchers
            .create(data)
            .await
            .map_err(|e| VocError::Persistence(e.to_string()))?;

        // 4. 逐行扣减库存；单行失败只记录，不回滚凭证
        for line in cart.lines() {
            if let Err(e) = self.catalog.decrement(&line.item_id, line.quantity).await {
                error!(
                    item = %line.name,
                    item_id = %line.item_id,
                    quantity = line.quantity,
                    error = %e,
                    "Stock decrement failed after voucher persist"
                );
            }
        }

        // 5. 清空购物车
        cart.clear();

        info!(
            voc_number = %voucher.voc_number,
            store = %voucher.store,
            total = %voucher.total_amount,
            items = voucher.items.len(),
            "Voucher committed"
        );

        Ok(voucher)
    }

    /// 复核购物车请求的当前库存
    ///
    /// 同一商品可能拆成多行，先按商品汇总请求数量再并发读取；
    /// 缺失的条目记名称，存量不足的记 "名称 (insufficient
    /// quantity)"。发现任何冲突则整体拒绝。
    async fn revalidate(&self, cart: &Cart) -> VocResult<()> {
        let mut requested: Vec<(&str, &str, i32)> = Vec::new();
        for line in cart.lines() {
            match requested.iter_mut().find(|(id, _, _)| *id == line.item_id) {
                Some(entry) => entry.2 += line.quantity,
                None => requested.push((&line.item_id, &line.name, line.quantity)),
            }
        }

        let reads = requested.iter().map(|&(id, name, quantity)| async move {
            let current = self.catalog.read(id).await;
            (name, quantity, current)
        });

        let mut conflicts = Vec::new();
        for (name, quantity, current) in join_all(reads).await {
            match current {
                Ok(item) if item.qty >= quantity => {}
                Ok(_) => conflicts.push(format!("{} (insufficient quantity)", name)),
                Err(StoreError::NotFound(_)) => conflicts.push(name.to_string()),
                Err(e) => return Err(VocError::Catalog(e.to_string())),
            }
        }

        if conflicts.is_empty() {
            Ok(())
        } else {
            Err(VocError::StockConflict(conflicts))
        }
    }
}
