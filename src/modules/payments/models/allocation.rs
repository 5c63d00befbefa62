use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::core::{checked_sum, saturating_sum};

/// Backend-assigned invoice identifier
pub type InvoiceId = i64;

/// An invoice with an unpaid balance at the moment the form was opened.
///
/// Lists of these are expected oldest-first; nothing in the engine reorders them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutstandingInvoice {
    pub id: InvoiceId,
    pub remaining_amount: Decimal,
}

impl OutstandingInvoice {
    pub fn new(id: InvoiceId, remaining_amount: Decimal) -> Self {
        Self {
            id,
            remaining_amount,
        }
    }
}

/// Sum of remaining balances across a list of outstanding invoices,
/// saturating at the `Decimal` range
pub fn total_outstanding(invoices: &[OutstandingInvoice]) -> Decimal {
    saturating_sum(invoices.iter().map(|inv| inv.remaining_amount))
}

/// Like [`total_outstanding`], `None` when the sum overflows
pub fn checked_total_outstanding(invoices: &[OutstandingInvoice]) -> Option<Decimal> {
    checked_sum(invoices.iter().map(|inv| inv.remaining_amount))
}

/// Invoice id -> allocated amount. Absent ids are implicitly zero.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AllocationMap(BTreeMap<InvoiceId, Decimal>);

/// Allocation entered by hand, one entry per edited invoice row
pub type ManualAllocationMap = AllocationMap;

impl AllocationMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, invoice_id: InvoiceId, amount: Decimal) {
        self.0.insert(invoice_id, amount);
    }

    /// Allocated amount for an invoice, zero when absent
    pub fn get(&self, invoice_id: InvoiceId) -> Decimal {
        self.0.get(&invoice_id).copied().unwrap_or(Decimal::ZERO)
    }

    pub fn contains(&self, invoice_id: InvoiceId) -> bool {
        self.0.contains_key(&invoice_id)
    }

    /// Saturates at the `Decimal` range
    pub fn total(&self) -> Decimal {
        saturating_sum(self.0.values().copied())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (InvoiceId, Decimal)> + '_ {
        self.0.iter().map(|(id, amount)| (*id, *amount))
    }

    pub fn invoice_ids(&self) -> Vec<InvoiceId> {
        self.0.keys().copied().collect()
    }
}

impl FromIterator<(InvoiceId, Decimal)> for AllocationMap {
    fn from_iter<I: IntoIterator<Item = (InvoiceId, Decimal)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Which allocator the payment form uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllocationMode {
    /// Oldest invoices first, each up to its remaining balance
    #[default]
    Auto,
    /// Amounts typed per invoice, checked against the payment total
    Manual,
}

impl AllocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for AllocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Result of checking a manual allocation against the payment amount
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reconciliation {
    pub matches: bool,
    pub total: Decimal,
    /// `total - payment_amount`: positive is over-allocated, negative under-allocated
    pub difference: Decimal,
}

impl Reconciliation {
    pub fn is_over_allocated(&self) -> bool {
        !self.matches && self.difference > Decimal::ZERO
    }

    pub fn is_under_allocated(&self) -> bool {
        !self.matches && self.difference < Decimal::ZERO
    }
}

/// Everything the payment form needs to render its allocation table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentPreview {
    pub mode: AllocationMode,
    pub payment_amount: Decimal,
    pub allocations: AllocationMap,
    pub allocated_total: Decimal,
    /// Part of the payment no invoice could absorb
    pub unallocated: Decimal,
    /// Present in manual mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<Reconciliation>,
    /// Set when the allocation was restricted to a subset of invoices
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_invoice_ids: Option<Vec<InvoiceId>>,
}

impl PaymentPreview {
    /// Whether the form may be submitted as is
    pub fn is_submittable(&self) -> bool {
        self.payment_amount > Decimal::ZERO
            && self.reconciliation.map_or(true, |r| r.matches)
    }
}
