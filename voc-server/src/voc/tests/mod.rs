//! 凭证提交测试
//!
//! 使用内存假目录/假凭证存储验证编排器的副作用顺序和失败语义。

mod test_flows;

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use shared::models::{
    CatalogFilter, CatalogItem, ItemDetails, ItemType, PaymentMethod, PaymentType, Voucher,
    VoucherCreate,
};
use shared::types::Store;

use crate::cart::Cart;
use crate::voc::{CatalogStore, StoreError, VocHeader, VoucherStore};

// ===== 假目录存储 =====

pub struct FakeCatalog {
    items: Mutex<HashMap<String, CatalogItem>>,
    pub reads: AtomicUsize,
    pub decrements: AtomicUsize,
    fail_decrement: Mutex<HashSet<String>>,
}

impl FakeCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            items: Mutex::new(items.into_iter().map(|i| (i.id.clone(), i)).collect()),
            reads: AtomicUsize::new(0),
            decrements: AtomicUsize::new(0),
            fail_decrement: Mutex::new(HashSet::new()),
        }
    }

    /// 令指定条目的扣减失败
    pub fn fail_decrement_for(&self, id: &str) {
        self.fail_decrement.lock().unwrap().insert(id.to_string());
    }

    pub fn qty_of(&self, id: &str) -> i32 {
        self.items.lock().unwrap().get(id).map(|i| i.qty).unwrap_or(-1)
    }
}

#[async_trait]
impl CatalogStore for FakeCatalog {
    async fn query(
        &self,
        item_type: ItemType,
        _store: Store,
        _filter: &CatalogFilter,
    ) -> Result<Vec<CatalogItem>, StoreError> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .values()
            .filter(|i| i.item_type() == item_type)
            .cloned()
            .collect())
    }

    async fn read(&self, id: &str) -> Result<CatalogItem, StoreError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        self.items
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    async fn decrement(&self, id: &str, amount: i32) -> Result<(), StoreError> {
        self.decrements.fetch_add(1, Ordering::SeqCst);
        if self.fail_decrement.lock().unwrap().contains(id) {
            return Err(StoreError::Backend("injected decrement failure".into()));
        }
        let mut items = self.items.lock().unwrap();
        let item = items
            .get_mut(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        if item.qty < amount {
            return Err(StoreError::InsufficientStock(item.name.clone()));
        }
        item.qty -= amount;
        Ok(())
    }
}

// ===== 假凭证存储 =====

#[derive(Default)]
pub struct FakeVouchers {
    pub created: Mutex<Vec<Voucher>>,
    pub creates: AtomicUsize,
    pub fail_create: std::sync::atomic::AtomicBool,
}

impl FakeVouchers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        let v = Self::default();
        v.fail_create.store(true, Ordering::SeqCst);
        v
    }
}

#[async_trait]
impl VoucherStore for FakeVouchers {
    async fn create(&self, data: VoucherCreate) -> Result<Voucher, StoreError> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        if self.fail_create.load(Ordering::SeqCst) {
            return Err(StoreError::Backend("injected persist failure".into()));
        }
        let voucher = Voucher {
            id: Some(format!("voucher:{}", self.creates.load(Ordering::SeqCst))),
            voc_number: data.voc_number,
            customer_name: data.customer_name,
            customer_phone: data.customer_phone,
            payment_type: data.payment_type,
            payment_method: data.payment_method,
            total_amount: data.total_amount,
            paid_amount: data.paid_amount,
            balance_amount: data.balance_amount,
            deposit_amount: data.deposit_amount,
            notes: data.notes,
            items: data.items,
            store: data.store,
            staff_email: data.staff_email,
            created_at: Utc::now(),
            refund: None,
        };
        self.created.lock().unwrap().push(voucher.clone());
        Ok(voucher)
    }
}

// ===== 测试数据构造 =====

pub fn frame_item(id: &str, name: &str, price: i64, qty: i32) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        code: None,
        category: None,
        price: Decimal::from(price),
        qty,
        details: ItemDetails::Frame { color: None },
    }
}

pub fn lens_item(id: &str, name: &str, price: i64, qty: i32) -> CatalogItem {
    CatalogItem {
        id: id.to_string(),
        name: name.to_string(),
        code: None,
        category: Some("CR-39".to_string()),
        price: Decimal::from(price),
        qty,
        details: ItemDetails::Lens {
            sph: None,
            cyl: None,
            axis: None,
            lens_type: Some("Single Vision".to_string()),
        },
    }
}

/// 把目录条目按数量装入购物车
pub fn cart_with(entries: &[(&CatalogItem, i32)]) -> Cart {
    let mut cart = Cart::new();
    for (item, quantity) in entries {
        for _ in 0..*quantity {
            cart.add_or_increment(item).unwrap();
        }
    }
    cart
}

/// 未经 Cart 操作约束的原始行 (模拟 HTTP 提交的载荷)
pub fn raw_line(item: &CatalogItem, quantity: i32) -> crate::cart::CartLine {
    crate::cart::CartLine {
        item_id: item.id.clone(),
        name: item.name.clone(),
        price: item.price,
        category: item.category.clone(),
        details: item.details.clone(),
        quantity,
        available: item.qty,
    }
}

pub fn header(voc_number: &str, payment_type: PaymentType, deposit: i64) -> VocHeader {
    VocHeader {
        voc_number: voc_number.to_string(),
        customer_name: "U Ba".to_string(),
        customer_phone: Some("09-123456".to_string()),
        payment_type,
        payment_method: PaymentMethod::Cash,
        deposit_amount: Decimal::from(deposit),
        notes: None,
    }
}
