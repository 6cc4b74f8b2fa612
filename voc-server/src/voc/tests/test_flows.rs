//! 端到端提交流程

use std::sync::Arc;
use std::sync::atomic::Ordering;

use rust_decimal::Decimal;
use shared::models::{PaymentType, Voucher};
use shared::types::Store;

use crate::voc::VocService;

use super::{FakeCatalog, FakeVouchers, cart_with, frame_item, header, lens_item};

fn stored(vouchers: &FakeVouchers) -> Voucher {
    vouchers.created.lock().unwrap()[0].clone()
}

#[tokio::test]
async fn test_full_payment_flow() {
    let lens = lens_item("lens:cr39", "CR-39 1.56", 2000, 10);
    let frame = frame_item("frame:a", "Aviator", 3000, 4);
    let catalog = Arc::new(FakeCatalog::new(vec![lens.clone(), frame.clone()]));
    let vouchers = Arc::new(FakeVouchers::new());
    let service = VocService::new(catalog.clone(), vouchers.clone());

    let mut cart = cart_with(&[(&lens, 2), (&frame, 1)]);
    assert_eq!(cart.total(), Decimal::from(7000));

    let voucher = service
        .create_voc(
            Store::Yangon,
            "staff@example.com",
            header("VOC-100", PaymentType::Full, 0),
            &mut cart,
        )
        .await
        .unwrap();

    assert_eq!(voucher.total_amount, Decimal::from(7000));
    assert_eq!(voucher.paid_amount, Decimal::from(7000));
    assert_eq!(voucher.balance_amount, Decimal::ZERO);
    assert_eq!(voucher.deposit_amount, Decimal::ZERO);
    assert_eq!(voucher.store, Store::Yangon);
    assert_eq!(voucher.staff_email, "staff@example.com");

    // 每行按数量扣减
    assert_eq!(catalog.qty_of("lens:cr39"), 8);
    assert_eq!(catalog.qty_of("frame:a"), 3);
    assert_eq!(catalog.decrements.load(Ordering::SeqCst), 2);

    // 凭证行是选入时的快照
    let persisted = stored(&vouchers);
    assert_eq!(persisted.items.len(), 2);
    assert_eq!(persisted.items[0].quantity, 2);
    assert_eq!(persisted.items[0].price, Decimal::from(2000));

    assert!(cart.is_empty());
}

#[tokio::test]
async fn test_deposit_payment_flow() {
    let lens = lens_item("lens:cr39", "CR-39 1.56", 2000, 10);
    let frame = frame_item("frame:a", "Aviator", 3000, 4);
    let catalog = Arc::new(FakeCatalog::new(vec![lens.clone(), frame.clone()]));
    let vouchers = Arc::new(FakeVouchers::new());
    let service = VocService::new(catalog, vouchers.clone());

    let mut cart = cart_with(&[(&lens, 2), (&frame, 1)]);
    let voucher = service
        .create_voc(
            Store::Pwint,
            "staff@example.com",
            header("VOC-101", PaymentType::Deposit, 3000),
            &mut cart,
        )
        .await
        .unwrap();

    assert_eq!(voucher.total_amount, Decimal::from(7000));
    assert_eq!(voucher.paid_amount, Decimal::from(3000));
    assert_eq!(voucher.balance_amount, Decimal::from(4000));
    assert_eq!(voucher.deposit_amount, Decimal::from(3000));
    assert_eq!(
        voucher.paid_amount + voucher.balance_amount,
        voucher.total_amount
    );
}

#[tokio::test]
async fn test_consecutive_commits_reuse_cart() {
    let frame = frame_item("frame:a", "Aviator", 3000, 10);
    let catalog = Arc::new(FakeCatalog::new(vec![frame.clone()]));
    let vouchers = Arc::new(FakeVouchers::new());
    let service = VocService::new(catalog.clone(), vouchers.clone());

    let mut cart = cart_with(&[(&frame, 2)]);
    service
        .create_voc(
            Store::Win,
            "staff@example.com",
            header("VOC-102", PaymentType::Full, 0),
            &mut cart,
        )
        .await
        .unwrap();
    assert!(cart.is_empty());

    // 同一购物车装入下一单
    cart.add_or_increment(&frame_item("frame:a", "Aviator", 3000, 8))
        .unwrap();
    service
        .create_voc(
            Store::Win,
            "staff@example.com",
            header("VOC-103", PaymentType::Full, 0),
            &mut cart,
        )
        .await
        .unwrap();

    assert_eq!(vouchers.creates.load(Ordering::SeqCst), 2);
    assert_eq!(catalog.qty_of("frame:a"), 7);
}
