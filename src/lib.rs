//! Debt Payoff - Deterministic amortization engine for household debt repayment
//!
//! This library provides:
//! - Month-by-month payoff simulation (avalanche, snowball, minimums only)
//! - Lump-sum and extra-payment what-if scenarios with rollover of freed minimums
//! - A quick highest-impact action estimate
//! - Household cash flow normalisation (income, bills, minimums)
//! - CSV loading of debts, income sources and bills

pub mod advisor;
pub mod budget;
pub mod debt;
pub mod error;
pub mod payoff;
pub mod scenario;

// Re-export commonly used types
pub use advisor::{highest_impact_action, ImpactAction};
pub use budget::{Bill, CashFlow, Frequency, IncomeSource};
pub use debt::{Debt, LumpSum};
pub use error::{LoadError, ValidationError};
pub use payoff::{calculate_payoff, PayoffConfig, PayoffEngine, PayoffResult, Strategy};
pub use scenario::{ScenarioComparison, ScenarioRunner, StrategyComparison, WhatIf};
