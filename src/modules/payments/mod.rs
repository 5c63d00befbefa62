pub mod controllers;
pub mod models;
pub mod services;

pub use controllers::{prepare_submission, preview_payment};
pub use models::{
    AllocationMap, AllocationMode, ManualAllocationMap, OutstandingInvoice, PaymentPreview,
    PaymentSubmission, Reconciliation,
};
pub use services::AllocationEngine;
