use rust_decimal::Decimal;
use serde::Deserialize;

use super::{parse_currency_env, parse_decimal_env, parse_env};
use crate::core::{AppError, Currency, Result};

/// Days after which an unpaid invoice counts as overdue in a debt summary
pub const DEFAULT_OVERDUE_DAYS: i64 = 30;

/// Upper bound for `DEBT_OVERDUE_DAYS`, one hundred years
pub const MAX_OVERDUE_DAYS: i64 = 36_500;

/// Settings shared by the payment, return and debt previews
#[derive(Debug, Clone, Deserialize)]
pub struct AllocationConfig {
    pub currency: Currency,
    /// Absolute tolerance when reconciling a manual allocation against the
    /// payment total. Defaults to the currency's smallest unit.
    pub tolerance: Decimal,
    /// Clamp the entered payment to the customer's total debt before allocating
    pub clamp_to_debt: bool,
    pub overdue_after_days: i64,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self::for_currency(Currency::default())
    }
}

impl AllocationConfig {
    pub fn for_currency(currency: Currency) -> Self {
        Self {
            currency,
            tolerance: currency.smallest_unit(),
            clamp_to_debt: true,
            overdue_after_days: DEFAULT_OVERDUE_DAYS,
        }
    }

    pub fn from_env() -> Result<Self> {
        let currency = parse_currency_env("ALLOCATION_CURRENCY")?.unwrap_or_default();
        let defaults = Self::for_currency(currency);

        Ok(Self {
            currency,
            tolerance: parse_decimal_env("ALLOCATION_TOLERANCE")?.unwrap_or(defaults.tolerance),
            clamp_to_debt: parse_env::<bool>("ALLOCATION_CLAMP_TO_DEBT")?
                .unwrap_or(defaults.clamp_to_debt),
            overdue_after_days: parse_env::<i64>("DEBT_OVERDUE_DAYS")?
                .unwrap_or(defaults.overdue_after_days),
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.tolerance <= Decimal::ZERO {
            return Err(AppError::Configuration(
                "ALLOCATION_TOLERANCE must be greater than 0".to_string(),
            ));
        }

        if !(0..=MAX_OVERDUE_DAYS).contains(&self.overdue_after_days) {
            return Err(AppError::Configuration(format!(
                "DEBT_OVERDUE_DAYS must be between 0 and {}, got {}",
                MAX_OVERDUE_DAYS, self.overdue_after_days
            )));
        }

        Ok(())
    }
}
