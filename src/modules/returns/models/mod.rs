pub mod invoice_return;

pub use invoice_return::{
    RefundChoice, ReturnLine, ReturnLineSelection, ReturnPreview, ReturnProjection,
    ReturnableItem, SettlementProjection,
};
