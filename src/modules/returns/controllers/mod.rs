pub mod return_controller;

pub use return_controller::{
    preview_return, project_settlement, ReturnPreviewRequest, SettlementRequest,
};
