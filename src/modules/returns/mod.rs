pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::{preview_return, project_settlement};
pub use models::{RefundChoice, ReturnPreview, ReturnProjection, SettlementProjection};
pub use services::{RefundCalculator, SettlementProjector};
