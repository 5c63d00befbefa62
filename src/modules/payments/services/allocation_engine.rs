use std::collections::HashSet;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::modules::payments::models::{
    total_outstanding, AllocationMap, AllocationMode, InvoiceId, ManualAllocationMap,
    OutstandingInvoice, PaymentPreview, Reconciliation,
};

/// Payment allocation previews for the "record payment" form.
///
/// Every function here is pure and total over non-negative amounts. Nothing is
/// clamped or re-sorted; callers normalise input first (see `input_guard`) and
/// pass invoices oldest-first.
pub struct AllocationEngine;

impl AllocationEngine {
    /// Allocate a payment across invoices in the given order, oldest first.
    ///
    /// Each invoice receives at most its remaining balance. Invoices with no
    /// balance are skipped without an entry. A payment larger than the total
    /// debt leaves the excess unallocated.
    pub fn allocate_fifo(
        payment_amount: Decimal,
        invoices: &[OutstandingInvoice],
    ) -> AllocationMap {
        Self::allocate_sequential(payment_amount, invoices.iter())
    }

    /// FIFO restricted to the invoices the user ticked.
    ///
    /// Order still comes from `invoices`; ids in `selected` that are not in
    /// the list are ignored.
    pub fn allocate_fifo_within(
        payment_amount: Decimal,
        invoices: &[OutstandingInvoice],
        selected: &[InvoiceId],
    ) -> AllocationMap {
        let selected: HashSet<InvoiceId> = selected.iter().copied().collect();
        Self::allocate_sequential(
            payment_amount,
            invoices.iter().filter(|inv| selected.contains(&inv.id)),
        )
    }

    fn allocate_sequential<'a>(
        payment_amount: Decimal,
        invoices: impl Iterator<Item = &'a OutstandingInvoice>,
    ) -> AllocationMap {
        let mut allocations = AllocationMap::new();
        let mut remaining = payment_amount;

        for invoice in invoices {
            if remaining <= Decimal::ZERO {
                break;
            }
            if invoice.remaining_amount <= Decimal::ZERO {
                continue;
            }

            let alloc = remaining.min(invoice.remaining_amount);
            allocations.insert(invoice.id, alloc);
            remaining -= alloc;
        }

        if remaining > Decimal::ZERO {
            warn!(
                payment = %payment_amount,
                unallocated = %remaining,
                "Payment exceeds outstanding debt, excess left unallocated"
            );
        }

        debug!(
            payment = %payment_amount,
            invoices = allocations.len(),
            allocated = %allocations.total(),
            "FIFO allocation computed"
        );

        allocations
    }

    /// Compare a hand-entered allocation with the payment amount.
    ///
    /// A zero (or negative) payment always matches so an empty form is not
    /// flagged. Per-invoice bounds are not re-checked here.
    pub fn validate_manual_allocation(
        manual: &ManualAllocationMap,
        payment_amount: Decimal,
        tolerance: Decimal,
    ) -> Reconciliation {
        let total = manual.total();
        let difference = total - payment_amount;
        let matches = if payment_amount > Decimal::ZERO {
            difference.abs() < tolerance
        } else {
            true
        };

        debug!(
            payment = %payment_amount,
            total = %total,
            difference = %difference,
            matches,
            "Manual allocation reconciled"
        );

        Reconciliation {
            matches,
            total,
            difference,
        }
    }

    /// Compute what the payment form shows for the chosen mode.
    ///
    /// In manual mode only entries for invoices in `invoices` are kept, so a
    /// stale row from a previous customer cannot leak into the total.
    pub fn preview(
        mode: AllocationMode,
        payment_amount: Decimal,
        invoices: &[OutstandingInvoice],
        manual: &ManualAllocationMap,
        tolerance: Decimal,
    ) -> PaymentPreview {
        let (allocations, reconciliation) = match mode {
            AllocationMode::Auto => (Self::allocate_fifo(payment_amount, invoices), None),
            AllocationMode::Manual => {
                let known: AllocationMap = invoices
                    .iter()
                    .filter(|inv| manual.contains(inv.id))
                    .map(|inv| (inv.id, manual.get(inv.id)))
                    .collect();
                let reconciliation =
                    Self::validate_manual_allocation(&known, payment_amount, tolerance);
                (known, Some(reconciliation))
            }
        };

        Self::build_preview(mode, payment_amount, allocations, reconciliation, None)
    }

    /// Auto preview limited to a selection of invoices
    pub fn preview_within(
        payment_amount: Decimal,
        invoices: &[OutstandingInvoice],
        selected: &[InvoiceId],
    ) -> PaymentPreview {
        let allocations = Self::allocate_fifo_within(payment_amount, invoices, selected);
        Self::build_preview(
            AllocationMode::Auto,
            payment_amount,
            allocations,
            None,
            Some(selected.to_vec()),
        )
    }

    fn build_preview(
        mode: AllocationMode,
        payment_amount: Decimal,
        allocations: AllocationMap,
        reconciliation: Option<Reconciliation>,
        selected_invoice_ids: Option<Vec<InvoiceId>>,
    ) -> PaymentPreview {
        let allocated_total = allocations.total();
        let unallocated = (payment_amount - allocated_total).max(Decimal::ZERO);

        PaymentPreview {
            mode,
            payment_amount,
            allocations,
            allocated_total,
            unallocated,
            reconciliation,
            selected_invoice_ids,
        }
    }

    /// Amount still owed on an invoice after the preview is applied
    pub fn remaining_after(invoice: &OutstandingInvoice, allocations: &AllocationMap) -> Decimal {
        invoice.remaining_amount - allocations.get(invoice.id)
    }

    /// Customer debt left once the preview is applied
    pub fn debt_after(invoices: &[OutstandingInvoice], allocations: &AllocationMap) -> Decimal {
        total_outstanding(invoices) - allocations.total()
    }
}
