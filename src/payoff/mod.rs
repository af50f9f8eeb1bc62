//! Payoff simulator for month-by-month debt amortization

mod state;
mod engine;
mod timeline;

pub use state::{DebtLedger, PayoffState};
pub use engine::{
    calculate_payoff, PayoffConfig, PayoffEngine, Strategy, DEFAULT_MAX_MONTHS, PAYOFF_EPSILON,
};
pub use timeline::{round_cents, MonthSnapshot, PayoffEvent, PayoffResult, PayoffSummary};
