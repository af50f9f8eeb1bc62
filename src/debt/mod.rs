//! Debt records and CSV loading

mod data;
pub mod loader;

pub use data::{
    overall_progress_percent, total_debt, total_starting_debt, validate_debts, Debt, LumpSum,
};
pub use loader::{load_debts, load_debts_from_reader};
