//! 支付核算
//!
//! 从购物车总额和支付方式纯推导出 total/paid/balance 三个金额，
//! 不做任何 IO。全款时 paid == total 且 balance == 0；订金时
//! paid == deposit 且 balance == total - deposit。

use rust_decimal::Decimal;
use serde::Serialize;
use shared::models::PaymentType;

/// 核算结果
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PaymentSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub paid: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub balance: Decimal,
}

/// 推导支付金额
///
/// `deposit` 只在 [`PaymentType::Deposit`] 下生效；全款时忽略。
pub fn reconcile(total: Decimal, payment_type: PaymentType, deposit: Decimal) -> PaymentSummary {
    match payment_type {
        PaymentType::Full => PaymentSummary {
            total,
            paid: total,
            balance: Decimal::ZERO,
        },
        PaymentType::Deposit => PaymentSummary {
            total,
            paid: deposit,
            balance: total - deposit,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_payment_settles_everything() {
        let summary = reconcile(Decimal::from(7000), PaymentType::Full, Decimal::ZERO);
        assert_eq!(summary.paid, summary.total);
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn test_full_payment_ignores_deposit() {
        let summary = reconcile(Decimal::from(7000), PaymentType::Full, Decimal::from(3000));
        assert_eq!(summary.paid, Decimal::from(7000));
        assert_eq!(summary.balance, Decimal::ZERO);
    }

    #[test]
    fn test_deposit_splits_total() {
        let summary = reconcile(Decimal::from(7000), PaymentType::Deposit, Decimal::from(3000));
        assert_eq!(summary.paid, Decimal::from(3000));
        assert_eq!(summary.balance, Decimal::from(4000));
        assert_eq!(summary.paid + summary.balance, summary.total);
    }

    #[test]
    fn test_zero_total() {
        let summary = reconcile(Decimal::ZERO, PaymentType::Full, Decimal::ZERO);
        assert_eq!(summary.paid, Decimal::ZERO);
        assert_eq!(summary.balance, Decimal::ZERO);
    }
}
