//! Owned working state for a single payoff run

use crate::debt::Debt;
use std::collections::{BTreeMap, HashMap};

/// Working copy of one debt during simulation
#[derive(Debug, Clone)]
pub struct DebtLedger {
    pub id: String,
    pub name: String,

    /// Remaining balance
    pub balance: f64,

    /// Periodic rate applied each month (annual / 12)
    pub monthly_rate: f64,

    /// Required monthly payment
    pub minimum_payment: f64,

    /// Interest accrued on this debt so far in the run
    pub interest_accrued: f64,

    /// Month this debt was recorded as paid off
    pub paid_off_month: Option<u32>,
}

impl DebtLedger {
    fn from_debt(debt: &Debt) -> Self {
        Self {
            id: debt.id.clone(),
            name: debt.name.clone(),
            balance: debt.current_balance,
            monthly_rate: debt.monthly_rate(),
            minimum_payment: debt.minimum_payment,
            interest_accrued: 0.0,
            paid_off_month: None,
        }
    }

    pub fn is_open(&self) -> bool {
        self.balance > 0.0
    }

    /// Pay up to `amount` toward the balance, returning what was applied
    pub fn pay(&mut self, amount: f64) -> f64 {
        if !self.is_open() || amount <= 0.0 {
            return 0.0;
        }
        let payment = self.balance.min(amount);
        self.balance -= payment;
        payment
    }

    /// Add one month of interest, returning the amount accrued
    pub fn accrue(&mut self) -> f64 {
        if !self.is_open() {
            return 0.0;
        }
        let interest = self.balance * self.monthly_rate;
        self.balance += interest;
        self.interest_accrued += interest;
        interest
    }
}

/// State of all debts at a point in time during a run
///
/// Ledgers keep input order. Lookups by id go through `index`; with
/// duplicate ids the last record wins there.
#[derive(Debug, Clone)]
pub struct PayoffState {
    /// Months simulated so far (0 = before any payment)
    pub month: u32,

    /// Per-debt working ledgers, in input order
    pub ledgers: Vec<DebtLedger>,

    /// Extra payment pool available each month, grown by rollover
    pub extra_monthly: f64,

    /// Interest accrued across all debts so far (unrounded)
    pub total_interest: f64,

    index: HashMap<String, usize>,
}

impl PayoffState {
    /// Copy balances in from the caller's records
    pub fn from_debts(debts: &[Debt], extra_monthly: f64) -> Self {
        let ledgers: Vec<DebtLedger> = debts.iter().map(DebtLedger::from_debt).collect();
        let index = ledgers
            .iter()
            .enumerate()
            .map(|(i, l)| (l.id.clone(), i))
            .collect();

        Self {
            month: 0,
            ledgers,
            extra_monthly: extra_monthly.max(0.0),
            total_interest: 0.0,
            index,
        }
    }

    pub fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    pub fn ledger_mut(&mut self, id: &str) -> Option<&mut DebtLedger> {
        let i = self.position(id)?;
        self.ledgers.get_mut(i)
    }

    pub fn total_balance(&self) -> f64 {
        self.ledgers.iter().map(|l| l.balance).sum()
    }

    /// Balance per debt id
    pub fn balances(&self) -> BTreeMap<String, f64> {
        self.ledgers
            .iter()
            .map(|l| (l.id.clone(), l.balance))
            .collect()
    }
}
