use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Pre-return balance of an invoice together with the refund about to be applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnProjection {
    pub invoice_remaining_amount: Decimal,
    pub refund_amount: Decimal,
}

impl ReturnProjection {
    /// Saturates at the `Decimal` range; exact for non-negative inputs
    pub fn projected_remaining(&self) -> Decimal {
        self.invoice_remaining_amount.saturating_sub(self.refund_amount)
    }
}

/// What happens to the customer's balance once a return is processed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettlementProjection {
    /// Negative when the shop owes the customer
    pub projected_remaining: Decimal,
    /// Cash the shop hands back to the customer
    pub cash_settlement_needed: Decimal,
}

impl SettlementProjection {
    /// Refund fully absorbed as a debt reduction, no cash changes hands
    pub fn is_absorbed(&self) -> bool {
        self.cash_settlement_needed == Decimal::ZERO
    }
}

/// One line of an invoice as offered in the return form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnableItem {
    pub invoice_item_id: i64,
    pub product_name: String,
    #[serde(default)]
    pub unit: Option<String>,
    pub product_price: Decimal,
    pub original_quantity: Decimal,
    #[serde(default)]
    pub already_returned: Decimal,
    /// Falls back to the unit name when absent
    #[serde(default)]
    pub allows_decimal: Option<bool>,
}

impl ReturnableItem {
    pub fn available_for_return(&self) -> Decimal {
        self.original_quantity
            .saturating_sub(self.already_returned)
            .max(Decimal::ZERO)
    }
}

/// Quantity the user picked for one invoice line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnLineSelection {
    pub invoice_item_id: i64,
    pub quantity_returned: Decimal,
    #[serde(default = "default_restore_inventory")]
    pub restore_inventory: bool,
}

fn default_restore_inventory() -> bool {
    true
}

/// A selection that passed validation, priced at the invoice's unit price
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnLine {
    pub invoice_item_id: i64,
    pub product_name: String,
    pub product_price: Decimal,
    pub quantity_returned: Decimal,
    pub subtotal: Decimal,
    pub restore_inventory: bool,
}

/// Refund amount source: computed from lines, or typed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum RefundChoice {
    #[default]
    Auto,
    Override(Decimal),
}

impl From<Option<Decimal>> for RefundChoice {
    fn from(value: Option<Decimal>) -> Self {
        value.map_or(RefundChoice::Auto, RefundChoice::Override)
    }
}

/// Everything the return form shows before the user confirms
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnPreview {
    pub lines: Vec<ReturnLine>,
    /// Sum of line subtotals
    pub computed_refund: Decimal,
    /// Refund that will be applied, after any override
    pub refund_amount: Decimal,
    pub is_full_return: bool,
    pub settlement: SettlementProjection,
}
