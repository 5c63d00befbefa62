use chrono::{Duration, NaiveDateTime};
use rust_decimal::Decimal;
use tracing::debug;

use crate::core::{checked_sum, AppError, Result};
use crate::modules::debts::models::{DebtSummary, InvoiceBalance};
use crate::modules::payments::models::OutstandingInvoice;

/// Derives what the payment form loads when it opens
pub struct DebtSummaryCalculator;

impl DebtSummaryCalculator {
    /// Invoices that still count as debt, oldest first.
    ///
    /// Sorting is stable, so invoices created at the same instant keep the
    /// backend's order.
    pub fn outstanding_invoices(balances: &[InvoiceBalance]) -> Vec<&InvoiceBalance> {
        let mut outstanding: Vec<&InvoiceBalance> =
            balances.iter().filter(|b| b.is_outstanding()).collect();
        outstanding.sort_by_key(|b| b.created_at);
        outstanding
    }

    /// FIFO-ordered input for the allocation engine
    pub fn fifo_order(balances: &[InvoiceBalance]) -> Vec<OutstandingInvoice> {
        Self::outstanding_invoices(balances)
            .into_iter()
            .map(InvoiceBalance::as_outstanding)
            .collect()
    }

    /// # Arguments
    /// * `balances` - All invoices of one customer, any order
    /// * `now` - Reference time for ageing
    /// * `overdue_after_days` - Age beyond which an invoice is overdue
    /// * `tolerance` - Balances at or below this count as settled when
    ///   classifying partially paid invoices
    ///
    /// # Errors
    /// - `now` minus `overdue_after_days` leaves the supported date range
    /// - a total leaves the `Decimal` range
    pub fn summarize(
        balances: &[InvoiceBalance],
        now: NaiveDateTime,
        overdue_after_days: i64,
        tolerance: Decimal,
    ) -> Result<DebtSummary> {
        let overdue_threshold = Duration::try_days(overdue_after_days)
            .and_then(|age| now.checked_sub_signed(age))
            .ok_or_else(|| AppError::validation("Reference date out of range for overdue ageing"))?;

        let outstanding = Self::outstanding_invoices(balances);
        let billed: Vec<&InvoiceBalance> = balances.iter().filter(|b| b.is_billed()).collect();

        let total_debt = sum_of(outstanding.iter().map(|b| b.remaining_amount))?;
        let total_revenue = sum_of(billed.iter().map(|b| b.total))?;
        let total_refunded = sum_of(billed.iter().map(|b| b.total_returned_amount))?;
        let total_net_revenue = total_revenue
            .checked_sub(total_refunded)
            .ok_or_else(out_of_range)?;

        let unpaid_invoices = outstanding
            .iter()
            .filter(|b| b.paid_amount == Decimal::ZERO)
            .count();
        let partially_paid_invoices = outstanding
            .iter()
            .filter(|b| b.paid_amount > Decimal::ZERO && b.remaining_amount > tolerance)
            .count();

        let overdue: Vec<&InvoiceBalance> = outstanding
            .iter()
            .copied()
            .filter(|b| b.created_at < overdue_threshold)
            .collect();
        let overdue_debt = sum_of(overdue.iter().map(|b| b.remaining_amount))?;

        debug!(
            invoices = outstanding.len(),
            total_debt = %total_debt,
            total_net_revenue = %total_net_revenue,
            overdue = overdue.len(),
            "Debt summary computed"
        );

        Ok(DebtSummary {
            total_debt,
            total_revenue,
            total_refunded,
            total_net_revenue,
            total_invoices: outstanding.len(),
            unpaid_invoices,
            partially_paid_invoices,
            overdue_debt,
            overdue_invoices: overdue.len(),
            invoices: outstanding.iter().map(|b| b.as_outstanding()).collect(),
        })
    }
}

fn out_of_range() -> AppError {
    AppError::validation("Invoice totals out of range")
}

fn sum_of(amounts: impl Iterator<Item = Decimal>) -> Result<Decimal> {
    checked_sum(amounts).ok_or_else(out_of_range)
}
