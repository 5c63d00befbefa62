// Tests for return settlement projection
//
// projected_remaining = current_remaining - refund_amount
// cash_settlement_needed = |projected_remaining| when negative, else 0

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use shop_ledger::returns::models::ReturnProjection;
use shop_ledger::returns::SettlementProjector;

#[test]
fn test_refund_absorbed_by_debt() {
    let result = SettlementProjector::project_return_settlement(dec!(200000), dec!(150000));

    assert_eq!(result.projected_remaining, dec!(50000));
    assert_eq!(result.cash_settlement_needed, dec!(0));
    assert!(result.is_absorbed());
}

#[test]
fn test_refund_exceeds_debt_cash_back() {
    let result = SettlementProjector::project_return_settlement(dec!(100000), dec!(150000));

    assert_eq!(result.projected_remaining, dec!(-50000));
    assert_eq!(result.cash_settlement_needed, dec!(50000));
}

/// Invoice 32M, 9M paid, all goods returned: shop hands back the 9M paid
#[test]
fn test_full_return_of_partially_paid_invoice() {
    let projection = ReturnProjection {
        invoice_remaining_amount: dec!(23000000),
        refund_amount: dec!(32000000),
    };

    let result = SettlementProjector::project(&projection);

    assert_eq!(result.projected_remaining, dec!(-9000000));
    assert_eq!(result.cash_settlement_needed, dec!(9000000));
}

#[test]
fn test_zero_refund_changes_nothing() {
    let result = SettlementProjector::project_return_settlement(dec!(45000), dec!(0));
    assert_eq!(result.projected_remaining, dec!(45000));
    assert!(result.is_absorbed());
}

proptest! {
    #[test]
    fn prop_settlement_identity(
        remaining in 0u64..100_000_000u64,
        refund in 0u64..100_000_000u64,
    ) {
        let remaining = Decimal::from(remaining);
        let refund = Decimal::from(refund);

        let result = SettlementProjector::project_return_settlement(remaining, refund);

        prop_assert_eq!(result.projected_remaining, remaining - refund);
        prop_assert!(result.cash_settlement_needed >= Decimal::ZERO);
        // Cash back plus debt left always accounts for the whole projection
        prop_assert_eq!(
            result.projected_remaining.max(Decimal::ZERO) - result.cash_settlement_needed,
            result.projected_remaining
        );

        let again = SettlementProjector::project_return_settlement(remaining, refund);
        prop_assert_eq!(result, again);
    }
}
