pub mod allocation;
pub mod payment_submission;

pub use allocation::{
    checked_total_outstanding, total_outstanding, AllocationMap, AllocationMode, InvoiceId,
    ManualAllocationMap, OutstandingInvoice, PaymentPreview, Reconciliation,
};
pub use payment_submission::{PaymentMethod, PaymentSubmission};
