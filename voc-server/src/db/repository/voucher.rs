//! Voucher Repository
//!
//! 凭证落库即为销售提交的持久性边界。`created_at` 由仓储在落库时
//! 统一打点，固定毫秒精度，保证字符串范围过滤与时间顺序一致。

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use surrealdb::Surreal;
use surrealdb::engine::local::Db;

use shared::models::{PaymentType, PaymentUpdate, Refund, Voucher, VoucherCreate};
use shared::types::Store;

use crate::payment;
use crate::voc::{StoreError, VoucherStore};

use super::{BaseRepository, RepoError, RepoResult, record_id};

const TABLE: &str = "voucher";

const SELECT_VOUCHER: &str = "SELECT *, <string>id AS id FROM voucher";

/// 列表查询的时间范围
#[derive(Debug, Clone, Copy)]
pub enum VoucherPeriod {
    Day(NaiveDate),
    Month { year: i32, month: u32 },
    Year(i32),
}

impl VoucherPeriod {
    /// Half-open [from, to) bounds, formatted like stored timestamps
    fn bounds(&self) -> Option<(String, String)> {
        let (from, to) = match self {
            VoucherPeriod::Day(day) => (*day, day.succ_opt()?),
            VoucherPeriod::Month { year, month } => {
                let from = NaiveDate::from_ymd_opt(*year, *month, 1)?;
                let to = if *month == 12 {
                    NaiveDate::from_ymd_opt(year + 1, 1, 1)?
                } else {
                    NaiveDate::from_ymd_opt(*year, month + 1, 1)?
                };
                (from, to)
            }
            VoucherPeriod::Year(year) => (
                NaiveDate::from_ymd_opt(*year, 1, 1)?,
                NaiveDate::from_ymd_opt(year + 1, 1, 1)?,
            ),
        };
        Some((
            format!("{}T00:00:00.000Z", from.format("%Y-%m-%d")),
            format!("{}T00:00:00.000Z", to.format("%Y-%m-%d")),
        ))
    }
}

/// Fixed-precision timestamp, lexicographically ordered
fn format_ts(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// 支付字段更新载荷 (金额按浮点写入)
#[derive(Serialize)]
struct PaymentFields {
    payment_type: PaymentType,
    payment_method: shared::models::PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    paid_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    balance_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    deposit_amount: Decimal,
    updated_at: String,
}

#[derive(Clone)]
pub struct VoucherRepository {
    base: BaseRepository,
}

impl VoucherRepository {
    pub fn new(db: Surreal<Db>) -> Self {
        Self {
            base: BaseRepository::new(db),
        }
    }

    /// Persist a voucher, stamping `created_at`
    pub async fn create(&self, data: VoucherCreate) -> RepoResult<Voucher> {
        let mut payload = serde_json::to_value(&data)
            .map_err(|e| RepoError::Validation(format!("Unserializable voucher: {}", e)))?;
        payload["created_at"] = serde_json::Value::String(format_ts(Utc::now()));

        let mut result = self
            .base
            .db()
            .query("LET $created = (CREATE voucher CONTENT $data);")
            .query("SELECT *, <string>id AS id FROM $created")
            .bind(("data", payload))
            .await?;
        let vouchers: Vec<Voucher> = result.take(1)?;
        vouchers
            .into_iter()
            .next()
            .ok_or_else(|| RepoError::Database("Failed to create voucher".to_string()))
    }

    /// List vouchers, newest first
    pub async fn list(
        &self,
        store: Option<Store>,
        period: Option<VoucherPeriod>,
    ) -> RepoResult<Vec<Voucher>> {
        let mut sql = String::from(SELECT_VOUCHER);
        let mut clauses: Vec<&str> = Vec::new();
        if store.is_some() {
            clauses.push("store = $store");
        }
        let bounds = match period {
            Some(p) => Some(p.bounds().ok_or_else(|| {
                RepoError::Validation("Invalid period".to_string())
            })?),
            None => None,
        };
        if bounds.is_some() {
            clauses.push("created_at >= $from AND created_at < $to");
        }
        if !clauses.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&clauses.join(" AND "));
        }
        sql.push_str(" ORDER BY created_at DESC");

        let mut query = self.base.db().query(sql);
        if let Some(store) = store {
            query = query.bind(("store", store.as_str()));
        }
        if let Some((from, to)) = bounds {
            query = query.bind(("from", from)).bind(("to", to));
        }

        let vouchers: Vec<Voucher> = query.await?.take(0)?;
        Ok(vouchers)
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Voucher>> {
        let rid = record_id(TABLE, id);
        let mut result = self
            .base
            .db()
            .query("SELECT *, <string>id AS id FROM $rid")
            .bind(("rid", rid))
            .await?;
        let vouchers: Vec<Voucher> = result.take(0)?;
        Ok(vouchers.into_iter().next())
    }

    /// 修改支付方式并重新核算金额
    ///
    /// 总额不变；paid/balance 按新的支付方式从总额重新推导。
    pub async fn update_payment(&self, id: &str, update: PaymentUpdate) -> RepoResult<Voucher> {
        if update.payment_type == PaymentType::Deposit && update.deposit_amount <= Decimal::ZERO {
            return Err(RepoError::Validation(
                "Deposit amount must be greater than zero".to_string(),
            ));
        }

        let current = self
            .find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Voucher {} not found", id)))?;

        let summary = payment::reconcile(
            current.total_amount,
            update.payment_type,
            update.deposit_amount,
        );
        let deposit = match update.payment_type {
            PaymentType::Deposit => update.deposit_amount,
            PaymentType::Full => Decimal::ZERO,
        };

        let fields = PaymentFields {
            payment_type: update.payment_type,
            payment_method: update.payment_method,
            paid_amount: summary.paid,
            balance_amount: summary.balance,
            deposit_amount: deposit,
            updated_at: format_ts(Utc::now()),
        };

        let rid = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $rid MERGE $data")
            .bind(("rid", rid))
            .bind(("data", fields))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Voucher {} not found", id)))
    }

    /// 登记退款记录 (一张凭证至多一条)
    pub async fn record_refund(&self, id: &str, refund: Refund) -> RepoResult<Voucher> {
        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Voucher {} not found", id)))?;

        let payload = serde_json::json!({
            "refund": refund,
            "updated_at": format_ts(Utc::now()),
        });

        let rid = record_id(TABLE, id);
        self.base
            .db()
            .query("UPDATE $rid MERGE $data")
            .bind(("rid", rid))
            .bind(("data", payload))
            .await?;

        self.find_by_id(id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Voucher {} not found", id)))
    }

    /// Hard delete a voucher
    pub async fn delete(&self, id: &str) -> RepoResult<bool> {
        if self.find_by_id(id).await?.is_none() {
            return Ok(false);
        }
        let rid = record_id(TABLE, id);
        self.base
            .db()
            .query("DELETE $rid")
            .bind(("rid", rid))
            .await?;
        Ok(true)
    }
}

#[async_trait]
impl VoucherStore for VoucherRepository {
    async fn create(&self, data: VoucherCreate) -> Result<Voucher, StoreError> {
        VoucherRepository::create(self, data)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}
