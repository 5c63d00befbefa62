pub mod allocation_engine;
pub mod input_guard;

pub use allocation_engine::AllocationEngine;
pub use input_guard::{
    clamp_manual_allocations, clamp_manual_entry, clamp_payment_amount, normalize_amount,
};
