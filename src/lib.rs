//! Shop ledger preview engine
//!
//! Client-side previews for a shop's receivables: FIFO and manual payment
//! allocation, invoice-return settlement, and customer debt summaries. All
//! computations are pure; the HTTP layer only normalises input and serialises
//! results. The backend stays the system of record.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::debts;
pub use modules::payments;
pub use modules::returns;
