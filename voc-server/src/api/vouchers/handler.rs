//! Voucher API Handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;

use shared::models::{PaymentUpdate, Refund, Voucher};
use shared::types::Store;

use crate::cart::{Cart, CartLine};
use crate::core::ServerState;
use crate::db::repository::{VoucherPeriod, VoucherRepository};
use crate::utils::{AppError, AppResponse, AppResult, ok};
use crate::voc::VocHeader;

#[derive(Deserialize)]
pub struct ListParams {
    pub store: Option<Store>,
    /// 按日过滤 (YYYY-MM-DD)
    pub date: Option<NaiveDate>,
    /// 按月过滤 (YYYY-MM)
    pub month: Option<String>,
    /// 按年过滤
    pub year: Option<i32>,
}

impl ListParams {
    /// 过滤优先级: date > month > year
    fn period(&self) -> Result<Option<VoucherPeriod>, AppError> {
        if let Some(date) = self.date {
            return Ok(Some(VoucherPeriod::Day(date)));
        }
        if let Some(month) = &self.month {
            let (year, month) = month
                .split_once('-')
                .and_then(|(y, m)| Some((y.parse().ok()?, m.parse().ok()?)))
                .filter(|(_, m)| (1..=12).contains(m))
                .ok_or_else(|| {
                    AppError::validation(format!("Invalid month filter: {}", month))
                })?;
            return Ok(Some(VoucherPeriod::Month { year, month }));
        }
        Ok(self.year.map(VoucherPeriod::Year))
    }
}

/// 提交请求：单据头 + 店铺 + 经手人 + 购物车行
#[derive(Deserialize)]
pub struct CreateVocRequest {
    pub store: Store,
    pub staff_email: String,
    #[serde(flatten)]
    pub header: VocHeader,
    pub items: Vec<CartLine>,
}

#[derive(Deserialize)]
pub struct RefundRequest {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub reason: String,
}

/// GET /api/vouchers - 按店铺和时间范围列出凭证 (新的在前)
pub async fn list(
    State(state): State<ServerState>,
    Query(params): Query<ListParams>,
) -> AppResult<Json<Vec<Voucher>>> {
    let period = params.period()?;
    let vouchers = VoucherRepository::new(state.get_db())
        .list(params.store, period)
        .await?;
    Ok(Json(vouchers))
}

/// POST /api/vouchers - 提交一张销售凭证
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CreateVocRequest>,
) -> AppResult<Json<Voucher>> {
    let mut cart = Cart::from_lines(payload.items);
    let voucher = state
        .voc
        .create_voc(payload.store, &payload.staff_email, payload.header, &mut cart)
        .await?;
    Ok(Json(voucher))
}

/// GET /api/vouchers/:id - 获取单张凭证
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<Voucher>> {
    let voucher = VoucherRepository::new(state.get_db())
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Voucher {}", id)))?;
    Ok(Json(voucher))
}

/// PUT /api/vouchers/:id/payment - 修改支付方式并重新核算金额
pub async fn update_payment(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<PaymentUpdate>,
) -> AppResult<Json<Voucher>> {
    let voucher = VoucherRepository::new(state.get_db())
        .update_payment(&id, payload)
        .await?;
    Ok(Json(voucher))
}

/// POST /api/vouchers/:id/refund - 登记退款
pub async fn refund(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<RefundRequest>,
) -> AppResult<Json<Voucher>> {
    if payload.amount <= Decimal::ZERO {
        return Err(AppError::validation("Refund amount must be greater than zero"));
    }
    let refund = Refund {
        amount: payload.amount,
        reason: payload.reason,
        date: Utc::now(),
    };
    let voucher = VoucherRepository::new(state.get_db())
        .record_refund(&id, refund)
        .await?;
    Ok(Json(voucher))
}

/// DELETE /api/vouchers/:id - 删除凭证
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<AppResponse<bool>>> {
    let deleted = VoucherRepository::new(state.get_db()).delete(&id).await?;
    if !deleted {
        return Err(AppError::not_found(format!("Voucher {}", id)));
    }
    Ok(ok(deleted))
}
