//! Normalisation applied to raw form input before it reaches the engine.
//!
//! The allocation engine assumes non-negative amounts and per-invoice entries
//! already within `[0, remaining_amount]`. This layer owns those guarantees,
//! including the clamp of the payment amount to the customer's total debt.

use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::debug;

use crate::modules::payments::models::{
    AllocationMap, InvoiceId, ManualAllocationMap, OutstandingInvoice,
};

/// Missing or negative input becomes zero
pub fn normalize_amount(raw: Option<Decimal>) -> Decimal {
    raw.filter(|amount| *amount > Decimal::ZERO)
        .unwrap_or(Decimal::ZERO)
}

/// Cap the entered payment at what the customer owes
pub fn clamp_payment_amount(raw: Option<Decimal>, total_debt: Decimal) -> Decimal {
    let amount = normalize_amount(raw);
    let ceiling = total_debt.max(Decimal::ZERO);

    if amount > ceiling {
        debug!(entered = %amount, total_debt = %ceiling, "Payment clamped to total debt");
        ceiling
    } else {
        amount
    }
}

/// Clamp one manual row into `[0, remaining]`
pub fn clamp_manual_entry(raw: Option<Decimal>, remaining: Decimal) -> Decimal {
    normalize_amount(raw).min(remaining.max(Decimal::ZERO))
}

/// Clamp a whole manual map against the invoice list.
///
/// Rows for unknown invoices and rows that clamp to zero are dropped.
pub fn clamp_manual_allocations(
    raw: &ManualAllocationMap,
    invoices: &[OutstandingInvoice],
) -> ManualAllocationMap {
    let remaining: HashMap<InvoiceId, Decimal> = invoices
        .iter()
        .map(|inv| (inv.id, inv.remaining_amount))
        .collect();

    raw.iter()
        .filter_map(|(id, amount)| {
            let ceiling = remaining.get(&id)?;
            let clamped = clamp_manual_entry(Some(amount), *ceiling);
            (clamped > Decimal::ZERO).then_some((id, clamped))
        })
        .collect::<AllocationMap>()
}
