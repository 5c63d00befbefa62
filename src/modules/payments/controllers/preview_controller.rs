// HTTP handlers for payment allocation previews
//
// Endpoints:
// - POST /v1/payments/preview - Compute the allocation table for the payment form
// - POST /v1/payments/submission - Turn an approved preview into the backend request body

use actix_web::{web, HttpRequest, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;
use tracing::info;

use crate::config::AllocationConfig;
use crate::core::{AppError, Result};
use crate::middleware::request_id;
use crate::modules::payments::{
    models::{
        checked_total_outstanding, AllocationMap, AllocationMode, InvoiceId, OutstandingInvoice,
        PaymentMethod, PaymentPreview, PaymentSubmission,
    },
    services::{clamp_manual_allocations, clamp_payment_amount, normalize_amount, AllocationEngine},
};

/// Request for POST /v1/payments/preview
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentPreviewRequest {
    #[serde(default)]
    pub mode: AllocationMode,
    /// Raw amount field; missing or negative reads as zero
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// Outstanding invoices, oldest first
    pub invoices: Vec<OutstandingInvoice>,
    #[serde(default)]
    pub manual_allocations: AllocationMap,
    /// Restrict auto mode to these invoices
    #[serde(default)]
    pub selected_invoice_ids: Option<Vec<InvoiceId>>,
}

/// Request for POST /v1/payments/submission
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentSubmissionRequest {
    pub customer_id: i64,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub notes: Option<String>,
    pub allocation: PaymentPreviewRequest,
}

/// Normalise the raw form and run the engine for the selected mode
pub fn compute_preview(
    request: &PaymentPreviewRequest,
    config: &AllocationConfig,
) -> Result<PaymentPreview> {
    if let Some(invoice) = request
        .invoices
        .iter()
        .find(|inv| inv.remaining_amount < Decimal::ZERO)
    {
        return Err(AppError::validation(format!(
            "Invoice {} has a negative remaining amount",
            invoice.id
        )));
    }

    let total_debt = checked_total_outstanding(&request.invoices)
        .ok_or_else(|| AppError::validation("Outstanding invoice total out of range"))?;

    let payment_amount = if config.clamp_to_debt {
        clamp_payment_amount(request.amount, total_debt)
    } else {
        normalize_amount(request.amount)
    };

    config
        .currency
        .validate_amount(payment_amount)
        .map_err(AppError::validation)?;

    let preview = match (request.mode, request.selected_invoice_ids.as_deref()) {
        (AllocationMode::Auto, Some(selected)) => {
            AllocationEngine::preview_within(payment_amount, &request.invoices, selected)
        }
        (mode, _) => {
            let manual = clamp_manual_allocations(&request.manual_allocations, &request.invoices);
            AllocationEngine::preview(
                mode,
                payment_amount,
                &request.invoices,
                &manual,
                config.tolerance,
            )
        }
    };

    Ok(preview)
}

/// POST /v1/payments/preview
///
/// # Returns
/// - 200: `PaymentPreview`
/// - 400: Negative invoice balance or amount with too many decimal places
pub async fn preview_payment(
    request: web::Json<PaymentPreviewRequest>,
    config: web::Data<AllocationConfig>,
) -> Result<HttpResponse> {
    let preview = compute_preview(&request, &config)?;
    Ok(HttpResponse::Ok().json(preview))
}

/// POST /v1/payments/submission
///
/// # Returns
/// - 200: `PaymentSubmission` ready to forward to the backend
/// - 400: Zero payment or manual allocation that does not reconcile
pub async fn prepare_submission(
    http_request: HttpRequest,
    request: web::Json<PaymentSubmissionRequest>,
    config: web::Data<AllocationConfig>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    let preview = compute_preview(&request.allocation, &config)?;
    let submission = PaymentSubmission::from_preview(
        request.customer_id,
        &preview,
        request.payment_method,
        request.notes,
    )?;

    info!(
        request_id = %request_id(&http_request).unwrap_or_default(),
        customer_id = submission.customer_id,
        amount = %config.currency.format_amount(submission.amount),
        mode = %preview.mode,
        method = %submission.payment_method,
        "Payment submission prepared"
    );

    Ok(HttpResponse::Ok().json(submission))
}
