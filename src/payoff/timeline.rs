//! Output structures for payoff runs

use super::engine::{Strategy, PAYOFF_EPSILON};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::Write;

/// Round a currency amount to the nearest cent
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// Balances at the end of one simulated month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSnapshot {
    /// 0 = initial state before any payment
    pub month: u32,

    /// Sum of all balances
    pub total_balance: f64,

    /// Balance per debt id
    pub balances: BTreeMap<String, f64>,

    /// Interest accrued across all debts this month
    #[serde(default)]
    pub interest_accrued: f64,

    /// Extra pool actually applied beyond minimums this month
    #[serde(default)]
    pub extra_applied: f64,
}

/// The month a debt first reached zero
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffEvent {
    pub id: String,
    pub name: String,
    pub month: u32,
}

/// Complete payoff result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffResult {
    pub strategy: Strategy,

    /// Months simulated until the total reached zero or the cap was hit
    pub months: u32,

    /// Interest accrued over the whole run, rounded to cents
    pub total_interest: f64,

    /// `as_of` plus `months` calendar months
    pub payoff_date: NaiveDate,

    /// One snapshot per month, index 0..=months (empty when there are no debts)
    pub timeline: Vec<MonthSnapshot>,

    /// Debts in the order they reached zero
    pub debt_payoff_order: Vec<PayoffEvent>,

    /// Interest accrued per debt id, rounded to cents
    pub interest_by_debt: BTreeMap<String, f64>,

    /// Number of input debt records
    #[serde(default)]
    pub debt_count: usize,
}

impl PayoffResult {
    /// Result for an empty debt list
    pub fn empty(strategy: Strategy, as_of: NaiveDate) -> Self {
        Self {
            strategy,
            months: 0,
            total_interest: 0.0,
            payoff_date: as_of,
            timeline: Vec::new(),
            debt_payoff_order: Vec::new(),
            interest_by_debt: BTreeMap::new(),
            debt_count: 0,
        }
    }

    /// Whether the run ended with every balance effectively zero
    pub fn converged(&self) -> bool {
        self.timeline
            .last()
            .map(|s| s.total_balance <= PAYOFF_EPSILON)
            .unwrap_or(true)
    }

    /// Month a given debt was paid off, if it was
    pub fn payoff_month(&self, id: &str) -> Option<u32> {
        self.debt_payoff_order
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.month)
    }

    /// Balance of one debt at a given month
    pub fn balance_at(&self, id: &str, month: u32) -> Option<f64> {
        self.timeline
            .get(month as usize)
            .and_then(|s| s.balances.get(id))
            .copied()
    }

    /// Write the timeline as CSV: month, total, then one column per debt id
    pub fn write_timeline_csv<W: Write>(&self, writer: W) -> csv::Result<()> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        let ids: Vec<&String> = self
            .timeline
            .first()
            .map(|s| s.balances.keys().collect())
            .unwrap_or_default();

        let mut header = vec!["month".to_string(), "total_balance".to_string()];
        header.extend(ids.iter().map(|id| id.to_string()));
        csv_writer.write_record(&header)?;

        for snapshot in &self.timeline {
            let mut record = vec![snapshot.month.to_string(), format!("{:.2}", snapshot.total_balance)];
            record.extend(ids.iter().map(|id| {
                format!("{:.2}", snapshot.balances.get(*id).copied().unwrap_or(0.0))
            }));
            csv_writer.write_record(&record)?;
        }

        csv_writer.flush()?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> PayoffSummary {
        PayoffSummary {
            strategy: self.strategy,
            months: self.months,
            total_interest: self.total_interest,
            payoff_date: self.payoff_date,
            debts_paid: self.debt_payoff_order.len(),
            debt_count: self.debt_count,
            converged: self.converged(),
        }
    }
}

/// Summary statistics for a payoff run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffSummary {
    pub strategy: Strategy,
    pub months: u32,
    pub total_interest: f64,
    pub payoff_date: NaiveDate,
    pub debts_paid: usize,
    pub debt_count: usize,
    pub converged: bool,
}
