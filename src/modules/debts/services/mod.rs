pub mod debt_summary_calculator;

pub use debt_summary_calculator::DebtSummaryCalculator;
