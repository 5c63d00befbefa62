pub mod refund_calculator;
pub mod settlement_projector;

pub use refund_calculator::{unit_allows_decimal, RefundCalculator};
pub use settlement_projector::SettlementProjector;
