//! Core payoff engine for month-by-month amortization runs

use super::state::PayoffState;
use super::timeline::{round_cents, MonthSnapshot, PayoffEvent, PayoffResult};
use crate::debt::{validate_debts, Debt, LumpSum};
use crate::error::ValidationError;
use chrono::{Local, Months, NaiveDate};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Balance at or below which a debt counts as paid off
pub const PAYOFF_EPSILON: f64 = 0.01;

/// Hard cap on simulated months (50 years)
pub const DEFAULT_MAX_MONTHS: u32 = 600;

/// Repayment ordering policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Extra goes to the highest interest rate first
    Avalanche,
    /// Extra goes to the lowest current balance (as of the start) first
    Snowball,
    /// Minimum payments only, no extra and no rollover
    Minimums,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Avalanche, Strategy::Snowball, Strategy::Minimums];

    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Avalanche => "avalanche",
            Strategy::Snowball => "snowball",
            Strategy::Minimums => "minimums",
        }
    }

    /// Whether extra payments and freed-up minimums are applied
    pub fn uses_extra(&self) -> bool {
        !matches!(self, Strategy::Minimums)
    }

    /// Input positions in priority order, fixed for the whole run
    ///
    /// Sorts are stable, so ties keep input order.
    pub fn priority_order(&self, debts: &[Debt]) -> Vec<usize> {
        let mut order: Vec<usize> = (0..debts.len()).collect();
        match self {
            Strategy::Avalanche => {
                order.sort_by(|&a, &b| debts[b].interest_rate.total_cmp(&debts[a].interest_rate))
            }
            Strategy::Snowball => {
                order.sort_by(|&a, &b| debts[a].current_balance.total_cmp(&debts[b].current_balance))
            }
            Strategy::Minimums => {}
        }
        order
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "avalanche" => Ok(Strategy::Avalanche),
            "snowball" => Ok(Strategy::Snowball),
            "minimums" => Ok(Strategy::Minimums),
            other => Err(format!("unknown strategy: {}", other)),
        }
    }
}

/// Configuration for a payoff run
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffConfig {
    /// Where extra payments go
    pub strategy: Strategy,

    /// Monthly amount beyond minimums (ignored for `Minimums`, values <= 0 mean none)
    pub extra_monthly: f64,

    /// Optional one-time payment
    pub lump_sum: Option<LumpSum>,

    /// Number of months after which the run stops regardless of balance
    pub max_months: u32,

    /// Date the run starts from, used for the payoff date
    pub as_of: NaiveDate,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::Avalanche,
            extra_monthly: 0.0,
            lump_sum: None,
            max_months: DEFAULT_MAX_MONTHS,
            as_of: Local::now().date_naive(),
        }
    }
}

impl PayoffConfig {
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Default::default()
        }
    }

    pub fn with_extra(mut self, extra_monthly: f64) -> Self {
        self.extra_monthly = extra_monthly;
        self
    }

    pub fn with_lump_sum(mut self, lump_sum: Option<LumpSum>) -> Self {
        self.lump_sum = lump_sum;
        self
    }

    pub fn as_of(mut self, as_of: NaiveDate) -> Self {
        self.as_of = as_of;
        self
    }

    /// Check the policy parameters (an unknown lump-sum target is allowed)
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.extra_monthly.is_finite() || self.extra_monthly < 0.0 {
            return Err(ValidationError::InvalidAmount {
                field: "extra_monthly",
                value: self.extra_monthly,
            });
        }
        if let Some(lump) = &self.lump_sum {
            lump.validate()?;
        }
        Ok(())
    }
}

/// Main payoff engine
#[derive(Debug, Clone)]
pub struct PayoffEngine {
    config: PayoffConfig,
}

impl PayoffEngine {
    /// Create a new payoff engine with the given config
    pub fn new(config: PayoffConfig) -> Self {
        Self { config }
    }

    /// Validate inputs, then simulate
    pub fn simulate_checked(&self, debts: &[Debt]) -> Result<PayoffResult, ValidationError> {
        validate_debts(debts)?;
        self.config.validate()?;
        Ok(self.simulate(debts))
    }

    /// Run the monthly amortization loop
    ///
    /// Never fails. Inputs that cannot reach zero stop at `max_months` and
    /// the unpaid debts are absent from the payoff order.
    pub fn simulate(&self, debts: &[Debt]) -> PayoffResult {
        let strategy = self.config.strategy;
        if debts.is_empty() {
            return PayoffResult::empty(strategy, self.config.as_of);
        }

        let order = strategy.priority_order(debts);
        let mut state = PayoffState::from_debts(debts, self.config.extra_monthly);
        let mut timeline = Vec::with_capacity(64);
        let mut payoff_order = Vec::with_capacity(debts.len());

        debug!(
            "simulating {} debts with {} strategy, extra {:.2}",
            debts.len(),
            strategy,
            state.extra_monthly
        );

        timeline.push(MonthSnapshot {
            month: 0,
            total_balance: state.total_balance(),
            balances: state.balances(),
            interest_accrued: 0.0,
            extra_applied: 0.0,
        });

        while state.month < self.config.max_months {
            if state.total_balance() <= PAYOFF_EPSILON {
                break;
            }

            state.month += 1;
            let snapshot = self.simulate_month(&mut state, &order, &mut payoff_order);
            timeline.push(snapshot);
        }

        if state.total_balance() > PAYOFF_EPSILON {
            warn!(
                "{} run stopped at {} months with {:.2} outstanding ({} of {} debts paid)",
                strategy,
                state.month,
                state.total_balance(),
                payoff_order.len(),
                debts.len()
            );
        }

        let interest_by_debt = state
            .ledgers
            .iter()
            .map(|l| (l.id.clone(), round_cents(l.interest_accrued)))
            .collect();

        PayoffResult {
            strategy,
            months: state.month,
            total_interest: round_cents(state.total_interest),
            payoff_date: self.payoff_date(state.month),
            timeline,
            debt_payoff_order: payoff_order,
            interest_by_debt,
            debt_count: debts.len(),
        }
    }

    /// Advance one month: lump sum, interest, minimums, extra, then payoffs
    fn simulate_month(
        &self,
        state: &mut PayoffState,
        order: &[usize],
        payoff_order: &mut Vec<PayoffEvent>,
    ) -> MonthSnapshot {
        self.apply_lump_sum(state);
        let interest_accrued = Self::accrue_interest(state);
        Self::pay_minimums(state);
        let extra_applied = self.apply_extra(state, order);
        self.record_payoffs(state, order, payoff_order);

        MonthSnapshot {
            month: state.month,
            total_balance: state.total_balance(),
            balances: state.balances(),
            interest_accrued,
            extra_applied,
        }
    }

    /// One-time payment, applied before that month's interest
    fn apply_lump_sum(&self, state: &mut PayoffState) {
        let Some(lump) = &self.config.lump_sum else {
            return;
        };
        if lump.month != state.month {
            return;
        }
        if let Some(ledger) = state.ledger_mut(&lump.debt_id) {
            let applied = ledger.pay(lump.amount);
            debug!("month {}: lump sum {:.2} applied to {}", lump.month, applied, lump.debt_id);
        }
    }

    /// Accrue interest on every open debt, returning the month's total
    fn accrue_interest(state: &mut PayoffState) -> f64 {
        let mut month_interest = 0.0;
        for ledger in state.ledgers.iter_mut() {
            let interest = ledger.accrue();
            state.total_interest += interest;
            month_interest += interest;
        }
        month_interest
    }

    fn pay_minimums(state: &mut PayoffState) {
        for ledger in state.ledgers.iter_mut() {
            let minimum = ledger.minimum_payment;
            ledger.pay(minimum);
        }
    }

    /// Walk debts in priority order with the extra pool, returning what was applied
    fn apply_extra(&self, state: &mut PayoffState, order: &[usize]) -> f64 {
        if !self.config.strategy.uses_extra() {
            return 0.0;
        }

        let mut remaining = state.extra_monthly;
        for &i in order {
            if remaining <= 0.0 {
                break;
            }
            remaining -= state.ledgers[i].pay(remaining);
        }
        state.extra_monthly - remaining
    }

    /// Snap newly paid debts to zero and roll their minimums into the extra pool
    fn record_payoffs(
        &self,
        state: &mut PayoffState,
        order: &[usize],
        payoff_order: &mut Vec<PayoffEvent>,
    ) {
        let rolls_over = self.config.strategy.uses_extra();
        for &i in order {
            let ledger = &mut state.ledgers[i];
            if ledger.paid_off_month.is_some() || ledger.balance > PAYOFF_EPSILON {
                continue;
            }

            ledger.balance = 0.0;
            ledger.paid_off_month = Some(state.month);
            debug!("month {}: {} paid off", state.month, ledger.name);
            payoff_order.push(PayoffEvent {
                id: ledger.id.clone(),
                name: ledger.name.clone(),
                month: state.month,
            });

            if rolls_over {
                state.extra_monthly += ledger.minimum_payment;
            }
        }
    }

    fn payoff_date(&self, months: u32) -> NaiveDate {
        self.config
            .as_of
            .checked_add_months(Months::new(months))
            .unwrap_or(NaiveDate::MAX)
    }
}

/// Simulate from today with the given policy
pub fn calculate_payoff(
    debts: &[Debt],
    strategy: Strategy,
    extra_monthly: f64,
    lump_sum: Option<LumpSum>,
) -> PayoffResult {
    let config = PayoffConfig::new(strategy)
        .with_extra(extra_monthly)
        .with_lump_sum(lump_sum);
    PayoffEngine::new(config).simulate(debts)
}
