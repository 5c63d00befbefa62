use rust_decimal::Decimal;
use tracing::debug;

use crate::modules::returns::models::{ReturnProjection, SettlementProjection};

/// Projects the balance left after a pending return is processed
pub struct SettlementProjector;

impl SettlementProjector {
    /// Net a refund against the invoice's current (pre-return) balance.
    ///
    /// A negative result means the refund exceeds what the customer still
    /// owes; the difference is paid out in cash.
    pub fn project_return_settlement(
        current_remaining: Decimal,
        refund_amount: Decimal,
    ) -> SettlementProjection {
        Self::project(&ReturnProjection {
            invoice_remaining_amount: current_remaining,
            refund_amount,
        })
    }

    pub fn project(projection: &ReturnProjection) -> SettlementProjection {
        let projected_remaining = projection.projected_remaining();
        let cash_settlement_needed = if projected_remaining < Decimal::ZERO {
            projected_remaining.abs()
        } else {
            Decimal::ZERO
        };

        debug!(
            current_remaining = %projection.invoice_remaining_amount,
            refund = %projection.refund_amount,
            projected_remaining = %projected_remaining,
            cash_settlement = %cash_settlement_needed,
            "Return settlement projected"
        );

        SettlementProjection {
            projected_remaining,
            cash_settlement_needed,
        }
    }
}
