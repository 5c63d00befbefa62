// HTTP handlers for invoice return previews
//
// Endpoints:
// - POST /v1/returns/settlement - Net a refund against the invoice balance
// - POST /v1/returns/preview - Validate selected lines, price them, and project settlement

use actix_web::{web, HttpResponse};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::config::AllocationConfig;
use crate::core::{AppError, Result};
use crate::modules::returns::{
    models::{RefundChoice, ReturnLineSelection, ReturnableItem},
    services::{RefundCalculator, SettlementProjector},
};

/// Request for POST /v1/returns/settlement
#[derive(Debug, Clone, Deserialize)]
pub struct SettlementRequest {
    /// Invoice balance before the return is applied
    pub current_remaining: Decimal,
    pub refund_amount: Decimal,
}

/// Request for POST /v1/returns/preview
#[derive(Debug, Clone, Deserialize)]
pub struct ReturnPreviewRequest {
    pub current_remaining: Decimal,
    pub items: Vec<ReturnableItem>,
    pub selections: Vec<ReturnLineSelection>,
    /// Typed refund; omitted or null means computed from the lines
    #[serde(default)]
    pub refund_amount: Option<Decimal>,
}

fn check_refund(refund_amount: Decimal, config: &AllocationConfig) -> Result<()> {
    config
        .currency
        .validate_amount(refund_amount)
        .map_err(AppError::validation)
}

/// POST /v1/returns/settlement
///
/// # Returns
/// - 200: `SettlementProjection`
/// - 400: Negative refund amount or remaining balance
pub async fn project_settlement(
    request: web::Json<SettlementRequest>,
    config: web::Data<AllocationConfig>,
) -> Result<HttpResponse> {
    check_refund(request.refund_amount, &config)?;
    if request.current_remaining < Decimal::ZERO {
        return Err(AppError::validation(
            "Current remaining amount cannot be negative",
        ));
    }

    let projection =
        SettlementProjector::project_return_settlement(request.current_remaining, request.refund_amount);

    Ok(HttpResponse::Ok().json(projection))
}

/// POST /v1/returns/preview
///
/// # Returns
/// - 200: `ReturnPreview`
/// - 400: Invalid selection, negative refund override, or amounts out of range
pub async fn preview_return(
    request: web::Json<ReturnPreviewRequest>,
    config: web::Data<AllocationConfig>,
) -> Result<HttpResponse> {
    let request = request.into_inner();
    if let Some(refund_amount) = request.refund_amount {
        check_refund(refund_amount, &config)?;
    }

    let preview = RefundCalculator::preview(
        request.current_remaining,
        &request.items,
        &request.selections,
        RefundChoice::from(request.refund_amount),
        config.currency,
    )?;

    Ok(HttpResponse::Ok().json(preview))
}
