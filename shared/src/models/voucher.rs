//! Voucher Models
//!
//! A voucher (VOC) is the persisted record of one sale: the committed
//! cart lines plus customer, payment and provenance fields. Payment is
//! either settled in full at commit or opened as a deposit with an
//! outstanding balance.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::Store;

use super::catalog::ItemDetails;

/// How the sale is settled at commit time
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    #[default]
    Full,
    Deposit,
}

/// Payment channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PaymentMethod {
    #[serde(rename = "CASH")]
    Cash,
    #[serde(rename = "KPAY")]
    KPay,
    #[serde(rename = "YUAN")]
    Yuan,
    #[serde(rename = "BANK_TRANSFER")]
    BankTransfer,
}

/// Refund issued against a voucher after the sale
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Refund {
    #[serde(with = "rust_decimal::serde::float")]
    pub amount: Decimal,
    pub reason: String,
    pub date: DateTime<Utc>,
}

/// One committed sale line
///
/// Prices and details are frozen at commit time; later catalog edits do
/// not affect existing vouchers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoucherLine {
    /// Catalog record ID the line was sold from
    pub item_id: String,
    pub name: String,
    pub quantity: i32,
    /// Unit price at commit time
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(flatten)]
    pub details: ItemDetails,
}

impl VoucherLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }
}

/// Payload for creating a voucher. The repository stamps `created_at`
/// and assigns the record ID.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VoucherCreate {
    pub voc_number: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_amount: Decimal,
    /// Deposit taken at commit; zero for full payments
    #[serde(with = "rust_decimal::serde::float")]
    pub deposit_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<VoucherLine>,
    pub store: Store,
    pub staff_email: String,
}

/// Persisted voucher
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Voucher {
    /// Record ID in "table:key" form; absent only before persist
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub voc_number: String,
    pub customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_phone: Option<String>,
    pub payment_type: PaymentType,
    pub payment_method: PaymentMethod,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub deposit_amount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub items: Vec<VoucherLine>,
    pub store: Store,
    pub staff_email: String,
    pub created_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refund: Option<Refund>,
}

/// Payment fields that may be revised after commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentUpdate {
    pub payment_type: PaymentType,
    /// Deposit for the revised payment; ignored for full payments
    #[serde(default, with = "rust_decimal::serde::float")]
    pub deposit_amount: Decimal,
    pub payment_method: PaymentMethod,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_enums_wire_names() {
        assert_eq!(
            serde_json::to_string(&PaymentType::Deposit).unwrap(),
            "\"DEPOSIT\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::BankTransfer).unwrap(),
            "\"BANK_TRANSFER\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentMethod::KPay).unwrap(),
            "\"KPAY\""
        );
    }

    #[test]
    fn test_line_total() {
        let line = VoucherLine {
            item_id: "frame:abc".to_string(),
            name: "Aviator".to_string(),
            quantity: 3,
            price: Decimal::from(2500),
            category: None,
            details: ItemDetails::Frame { color: None },
        };
        assert_eq!(line.line_total(), Decimal::from(7500));
    }

    #[test]
    fn test_voucher_line_flattens_details() {
        let line = VoucherLine {
            item_id: "lens:xyz".to_string(),
            name: "CR-39 1.56".to_string(),
            quantity: 2,
            price: Decimal::from(12000),
            category: Some("CR-39".to_string()),
            details: ItemDetails::Lens {
                sph: Some("-2.00".to_string()),
                cyl: Some("-0.50".to_string()),
                axis: Some("180".to_string()),
                lens_type: Some("Single Vision".to_string()),
            },
        };
        let json = serde_json::to_value(&line).unwrap();
        assert_eq!(json["item_type"], "LENS");
        assert_eq!(json["sph"], "-2.00");
        let back: VoucherLine = serde_json::from_value(json).unwrap();
        assert_eq!(back, line);
    }
}
