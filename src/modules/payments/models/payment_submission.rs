use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::{AppError, Result};
use crate::modules::payments::models::{
    AllocationMap, AllocationMode, InvoiceId, PaymentPreview,
};

/// How the customer paid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Transfer,
    Card,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Transfer => "transfer",
            Self::Card => "card",
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<String> for PaymentMethod {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "transfer" => Ok(Self::Transfer),
            "card" => Ok(Self::Card),
            _ => Err(format!("Invalid payment method: {}", value)),
        }
    }
}

/// Body for the backend's payment-recording endpoint.
///
/// The backend re-runs the allocation itself; this only carries what the user
/// approved. Auto mode sends no allocation (backend FIFO over all debt), a
/// restricted auto preview sends `invoice_ids`, manual mode sends
/// `manual_allocations`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSubmission {
    pub customer_id: i64,
    pub amount: Decimal,
    pub payment_method: PaymentMethod,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invoice_ids: Option<Vec<InvoiceId>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_allocations: Option<AllocationMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl PaymentSubmission {
    /// Build a submission from the preview the user approved
    ///
    /// # Errors
    /// - payment amount is zero
    /// - allocated total exceeds the payment amount
    /// - auto preview has an empty selection, allocates nothing, or leaves
    ///   part of the payment unallocated
    /// - manual preview does not reconcile with the payment amount
    pub fn from_preview(
        customer_id: i64,
        preview: &PaymentPreview,
        payment_method: PaymentMethod,
        notes: Option<String>,
    ) -> Result<Self> {
        if preview.payment_amount <= Decimal::ZERO {
            return Err(AppError::validation("Payment amount must be greater than 0"));
        }

        if preview.allocated_total > preview.payment_amount {
            return Err(AppError::validation(format!(
                "Allocated total ({}) exceeds payment amount ({})",
                preview.allocated_total, preview.payment_amount
            )));
        }

        let (invoice_ids, manual_allocations) = match preview.mode {
            AllocationMode::Auto => {
                if matches!(&preview.selected_invoice_ids, Some(ids) if ids.is_empty()) {
                    return Err(AppError::validation("Select at least one invoice to pay"));
                }

                if preview.allocated_total <= Decimal::ZERO {
                    return Err(AppError::validation(
                        "Payment does not reach any outstanding invoice",
                    ));
                }

                if preview.unallocated > Decimal::ZERO {
                    warn!(
                        customer_id,
                        unallocated = %preview.unallocated,
                        "Rejecting payment above outstanding debt"
                    );
                    return Err(AppError::validation(format!(
                        "Payment amount ({}) exceeds outstanding debt ({}) by {}",
                        preview.payment_amount, preview.allocated_total, preview.unallocated
                    )));
                }

                (preview.selected_invoice_ids.clone(), None)
            }
            AllocationMode::Manual => {
                let reconciliation = preview.reconciliation.ok_or_else(|| {
                    AppError::internal("Manual preview is missing its reconciliation")
                })?;

                if !reconciliation.matches {
                    warn!(
                        customer_id,
                        total = %reconciliation.total,
                        difference = %reconciliation.difference,
                        "Rejecting unreconciled manual allocation"
                    );
                    let direction = if reconciliation.difference > Decimal::ZERO {
                        "over-allocated"
                    } else {
                        "under-allocated"
                    };
                    return Err(AppError::validation(format!(
                        "Manual allocation total ({}) does not match payment amount ({}): {} by {}",
                        reconciliation.total,
                        preview.payment_amount,
                        direction,
                        reconciliation.difference.abs()
                    )));
                }

                if preview.allocations.is_empty() {
                    return Err(AppError::validation(
                        "Manual allocation must cover at least one invoice",
                    ));
                }

                (None, Some(preview.allocations.clone()))
            }
        };

        let notes = notes
            .map(|n| n.trim().to_string())
            .filter(|n| !n.is_empty());

        Ok(Self {
            customer_id,
            amount: preview.payment_amount,
            payment_method,
            invoice_ids,
            manual_allocations,
            notes,
        })
    }
}
