// HTTP handler for customer debt summaries
//
// Endpoints:
// - POST /v1/debts/summary - Summarise invoice balances and order them for FIFO allocation

use actix_web::{web, HttpResponse};
use chrono::NaiveDateTime;
use serde::Deserialize;

use crate::config::AllocationConfig;
use crate::core::Result;
use crate::modules::debts::{models::InvoiceBalance, services::DebtSummaryCalculator};

/// Request for POST /v1/debts/summary
#[derive(Debug, Clone, Deserialize)]
pub struct DebtSummaryRequest {
    pub invoices: Vec<InvoiceBalance>,
    /// Reference time for overdue ageing, defaults to now (UTC)
    #[serde(default)]
    pub as_of: Option<NaiveDateTime>,
}

/// POST /v1/debts/summary
///
/// # Returns
/// - 200: `DebtSummary` with outstanding invoices oldest first
/// - 400: `as_of` too early to age against, or totals out of range
pub async fn summarize_debt(
    request: web::Json<DebtSummaryRequest>,
    config: web::Data<AllocationConfig>,
) -> Result<HttpResponse> {
    let now = request
        .as_of
        .unwrap_or_else(|| chrono::Utc::now().naive_utc());

    let summary = DebtSummaryCalculator::summarize(
        &request.invoices,
        now,
        config.overdue_after_days,
        config.tolerance,
    )?;

    Ok(HttpResponse::Ok().json(summary))
}
