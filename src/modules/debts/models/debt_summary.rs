use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::modules::payments::models::{InvoiceId, OutstandingInvoice};

/// Invoice lifecycle as reported by the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Processing,
    Paid,
    Cancelled,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Paid => "paid",
            Self::Cancelled => "cancelled",
        }
    }

    /// Processing and cancelled invoices never count as debt
    pub fn counts_as_debt(&self) -> bool {
        matches!(self, Self::Pending | Self::Paid)
    }
}

impl std::fmt::Display for InvoiceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Balance snapshot of one customer invoice
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceBalance {
    pub id: InvoiceId,
    #[serde(default)]
    pub invoice_number: Option<String>,
    pub total: Decimal,
    pub paid_amount: Decimal,
    pub remaining_amount: Decimal,
    /// Value of goods returned against this invoice across all returns
    #[serde(default)]
    pub total_returned_amount: Decimal,
    pub status: InvoiceStatus,
    pub created_at: NaiveDateTime,
    /// Only exported invoices are owed
    #[serde(default = "default_exported")]
    pub exported: bool,
}

fn default_exported() -> bool {
    true
}

impl InvoiceBalance {
    /// Exported and not processing or cancelled; counts toward revenue
    pub fn is_billed(&self) -> bool {
        self.status.counts_as_debt() && self.exported
    }

    pub fn is_outstanding(&self) -> bool {
        self.is_billed() && self.remaining_amount > Decimal::ZERO
    }

    pub fn as_outstanding(&self) -> OutstandingInvoice {
        OutstandingInvoice::new(self.id, self.remaining_amount)
    }
}

/// Customer debt overview that opens the payment form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebtSummary {
    pub total_debt: Decimal,
    /// Invoice totals over billed invoices
    pub total_revenue: Decimal,
    /// Value of returned goods over billed invoices
    pub total_refunded: Decimal,
    pub total_net_revenue: Decimal,
    pub total_invoices: usize,
    /// Nothing paid yet
    pub unpaid_invoices: usize,
    pub partially_paid_invoices: usize,
    pub overdue_debt: Decimal,
    pub overdue_invoices: usize,
    /// Outstanding invoices, oldest first, ready for FIFO allocation
    pub invoices: Vec<OutstandingInvoice>,
}
