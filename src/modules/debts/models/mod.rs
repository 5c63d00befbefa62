pub mod debt_summary;

pub use debt_summary::{DebtSummary, InvoiceBalance, InvoiceStatus};
