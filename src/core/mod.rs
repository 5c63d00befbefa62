pub mod currency;
pub mod error;

pub use currency::{checked_sum, saturating_sum, Currency};
pub use error::{AppError, Result};
