pub mod preview_controller;

pub use preview_controller::{
    compute_preview, prepare_submission, preview_payment, PaymentPreviewRequest,
    PaymentSubmissionRequest,
};
