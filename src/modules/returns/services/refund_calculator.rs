use std::collections::HashMap;

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::core::{checked_sum, saturating_sum, AppError, Currency, Result};
use crate::modules::returns::models::{
    RefundChoice, ReturnLine, ReturnLineSelection, ReturnPreview, ReturnableItem,
};
use crate::modules::returns::services::SettlementProjector;

/// Units sold only in whole pieces when the item carries no explicit flag
const WHOLE_UNITS: &[&str] = &[
    "cái", "chiếc", "bộ", "hộp", "thùng", "viên", "chai", "lọ", "hũ", "gói", "bao", "con",
];

/// Whether a unit name accepts fractional quantities (e.g. "kg" does, "hộp" does not)
pub fn unit_allows_decimal(unit: &str) -> bool {
    let unit = unit.trim().to_lowercase();
    !WHOLE_UNITS.contains(&unit.as_str())
}

fn out_of_range() -> AppError {
    AppError::validation("Return amount out of range")
}

/// Prices and validates the lines picked in the return form
pub struct RefundCalculator;

impl RefundCalculator {
    /// Check every selection against the invoice lines and price it.
    ///
    /// # Errors
    /// - an invoice line carries a negative price or quantity
    /// - selection refers to an item not on the invoice
    /// - quantity is zero or negative
    /// - quantity exceeds what is still returnable
    /// - fractional quantity for a whole-unit item
    /// - a line amount leaves the `Decimal` range
    pub fn validate_lines(
        items: &[ReturnableItem],
        selections: &[ReturnLineSelection],
    ) -> Result<Vec<ReturnLine>> {
        if selections.is_empty() {
            return Err(AppError::validation("Select at least one item to return"));
        }

        if let Some(item) = items.iter().find(|item| {
            item.product_price < Decimal::ZERO
                || item.original_quantity < Decimal::ZERO
                || item.already_returned < Decimal::ZERO
        }) {
            return Err(AppError::validation(format!(
                "Invoice item {} has a negative price or quantity",
                item.invoice_item_id
            )));
        }

        let by_id: HashMap<i64, &ReturnableItem> =
            items.iter().map(|item| (item.invoice_item_id, item)).collect();
        let mut requested: HashMap<i64, Decimal> = HashMap::new();
        let mut lines = Vec::with_capacity(selections.len());

        for selection in selections {
            let item = by_id.get(&selection.invoice_item_id).ok_or_else(|| {
                AppError::validation(format!(
                    "Invoice item {} does not belong to this invoice",
                    selection.invoice_item_id
                ))
            })?;

            let quantity = selection.quantity_returned;
            if quantity <= Decimal::ZERO {
                return Err(AppError::validation(format!(
                    "Return quantity for '{}' must be greater than 0",
                    item.product_name
                )));
            }

            if !Self::allows_decimal(item) && !quantity.fract().is_zero() {
                return Err(AppError::validation(format!(
                    "'{}' is sold in whole units, got quantity {}",
                    item.product_name, quantity
                )));
            }

            // Repeated rows for one item share its available quantity
            let slot = requested.entry(item.invoice_item_id).or_insert(Decimal::ZERO);
            *slot = slot.checked_add(quantity).ok_or_else(out_of_range)?;
            let total_requested = *slot;
            let available = item.available_for_return();
            if total_requested > available {
                warn!(
                    invoice_item_id = item.invoice_item_id,
                    requested = %total_requested,
                    available = %available,
                    "Return quantity exceeds available"
                );
                return Err(AppError::validation(format!(
                    "Cannot return {} {} of '{}', available: {}",
                    total_requested,
                    item.unit.as_deref().unwrap_or(""),
                    item.product_name,
                    available
                )));
            }

            let subtotal = quantity
                .checked_mul(item.product_price)
                .ok_or_else(out_of_range)?;

            lines.push(ReturnLine {
                invoice_item_id: item.invoice_item_id,
                product_name: item.product_name.clone(),
                product_price: item.product_price,
                quantity_returned: quantity,
                subtotal,
                restore_inventory: selection.restore_inventory,
            });
        }

        Ok(lines)
    }

    fn allows_decimal(item: &ReturnableItem) -> bool {
        item.allows_decimal.unwrap_or_else(|| {
            item.unit
                .as_deref()
                .map_or(true, unit_allows_decimal)
        })
    }

    pub fn calculate_refund_amount(lines: &[ReturnLine]) -> Result<Decimal> {
        checked_sum(lines.iter().map(|line| line.subtotal)).ok_or_else(out_of_range)
    }

    /// True when, counting earlier returns, every invoice line is fully returned
    pub fn is_full_return(items: &[ReturnableItem], lines: &[ReturnLine]) -> bool {
        items.iter().all(|item| {
            let current = saturating_sum(
                lines
                    .iter()
                    .filter(|line| line.invoice_item_id == item.invoice_item_id)
                    .map(|line| line.quantity_returned),
            );
            item.already_returned.saturating_add(current) >= item.original_quantity
        })
    }

    /// Refund that will actually be applied. A computed refund is rounded to
    /// the currency's scale; an override is taken as typed.
    pub fn resolve_refund(
        computed: Decimal,
        choice: RefundChoice,
        currency: Currency,
    ) -> Result<Decimal> {
        match choice {
            RefundChoice::Auto => Ok(currency.round(computed)),
            RefundChoice::Override(amount) if amount < Decimal::ZERO => Err(
                AppError::validation("Refund amount cannot be negative"),
            ),
            RefundChoice::Override(amount) => Ok(amount),
        }
    }

    /// Validate the selection and project the settlement against the invoice's
    /// current remaining balance (taken before this return is applied).
    pub fn preview(
        current_remaining: Decimal,
        items: &[ReturnableItem],
        selections: &[ReturnLineSelection],
        choice: RefundChoice,
        currency: Currency,
    ) -> Result<ReturnPreview> {
        if current_remaining < Decimal::ZERO {
            return Err(AppError::validation(
                "Current remaining amount cannot be negative",
            ));
        }

        let lines = Self::validate_lines(items, selections)?;
        let computed_refund = Self::calculate_refund_amount(&lines)?;
        let refund_amount = Self::resolve_refund(computed_refund, choice, currency)?;
        let is_full_return = Self::is_full_return(items, &lines);
        let settlement =
            SettlementProjector::project_return_settlement(current_remaining, refund_amount);

        debug!(
            lines = lines.len(),
            computed_refund = %computed_refund,
            refund_amount = %refund_amount,
            is_full_return,
            "Return preview computed"
        );

        Ok(ReturnPreview {
            lines,
            computed_refund,
            refund_amount,
            is_full_return,
            settlement,
        })
    }
}
