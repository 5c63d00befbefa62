pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::summarize_debt;
pub use models::{DebtSummary, InvoiceBalance, InvoiceStatus};
pub use services::DebtSummaryCalculator;
