//! Household income, bills and the surplus available for debt repayment

mod cashflow;
pub mod loader;

pub use cashflow::{
    monthly_bills, monthly_income, monthly_minimums, Bill, CashFlow, Frequency, IncomeSource,
    SURPLUS_SHARE,
};
pub use loader::{load_bills, load_bills_from_reader, load_income, load_income_from_reader};
