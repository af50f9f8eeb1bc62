//! Debt records as supplied by the caller

use crate::error::ValidationError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

fn default_due_day() -> u8 {
    1
}

/// A single debt owed by the household
///
/// The engine only reads these. Balances are copied into an owned working
/// ledger at the start of each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    /// Stable identifier, unique within one simulation call
    pub id: String,

    /// Display name
    pub name: String,

    /// Amount owed now
    pub current_balance: f64,

    /// Balance at origination (progress reporting only)
    pub starting_balance: f64,

    /// Nominal annual rate as a decimal fraction (0.2199 = 21.99% APR)
    pub interest_rate: f64,

    /// Required monthly payment
    pub minimum_payment: f64,

    /// Day of month the payment is due (informational)
    #[serde(default = "default_due_day")]
    pub due_day: u8,
}

impl Debt {
    /// Create a debt whose starting balance equals its current balance
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        current_balance: f64,
        interest_rate: f64,
        minimum_payment: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            current_balance,
            starting_balance: current_balance,
            interest_rate,
            minimum_payment,
            due_day: default_due_day(),
        }
    }

    /// Builder-style override of the origination balance
    pub fn with_starting_balance(mut self, starting_balance: f64) -> Self {
        self.starting_balance = starting_balance;
        self
    }

    /// Builder-style override of the due day
    pub fn with_due_day(mut self, due_day: u8) -> Self {
        self.due_day = due_day;
        self
    }

    /// Monthly periodic rate (annual / 12)
    pub fn monthly_rate(&self) -> f64 {
        self.interest_rate / 12.0
    }

    /// Amount paid down since origination
    pub fn paid_off_amount(&self) -> f64 {
        self.starting_balance - self.current_balance
    }

    /// Fraction of the starting balance already repaid (0 when starting balance is 0)
    pub fn progress_ratio(&self) -> f64 {
        if self.starting_balance > 0.0 {
            self.paid_off_amount() / self.starting_balance
        } else {
            0.0
        }
    }

    /// Check the numeric and calendar fields of a single record
    pub fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId { index });
        }

        let fields = [
            ("current_balance", self.current_balance),
            ("starting_balance", self.starting_balance),
            ("interest_rate", self.interest_rate),
            ("minimum_payment", self.minimum_payment),
        ];
        for (field, value) in fields {
            if !value.is_finite() {
                return Err(ValidationError::NonFinite {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
            if value < 0.0 {
                return Err(ValidationError::Negative {
                    id: self.id.clone(),
                    field,
                    value,
                });
            }
        }

        if !(1..=31).contains(&self.due_day) {
            return Err(ValidationError::DueDay {
                id: self.id.clone(),
                due_day: self.due_day,
            });
        }

        Ok(())
    }
}

/// Validate every record and reject duplicate ids
pub fn validate_debts(debts: &[Debt]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(debts.len());
    for (index, debt) in debts.iter().enumerate() {
        debt.validate(index)?;
        if !seen.insert(debt.id.as_str()) {
            return Err(ValidationError::DuplicateId { id: debt.id.clone() });
        }
    }
    Ok(())
}

/// One-time extra payment applied to a specific debt in a specific month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpSum {
    /// Amount to apply
    pub amount: f64,

    /// Target debt id (no effect if it matches nothing)
    pub debt_id: String,

    /// Simulation month (1-indexed)
    pub month: u32,
}

impl LumpSum {
    pub fn new(amount: f64, debt_id: impl Into<String>, month: u32) -> Self {
        Self {
            amount,
            debt_id: debt_id.into(),
            month,
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(ValidationError::InvalidAmount {
                field: "lump_sum.amount",
                value: self.amount,
            });
        }
        if self.month == 0 {
            return Err(ValidationError::LumpSumMonth { month: self.month });
        }
        Ok(())
    }
}

/// Sum of current balances
pub fn total_debt(debts: &[Debt]) -> f64 {
    debts.iter().map(|d| d.current_balance).sum()
}

/// Sum of starting balances
pub fn total_starting_debt(debts: &[Debt]) -> f64 {
    debts.iter().map(|d| d.starting_balance).sum()
}

/// Share of the combined starting balance already repaid, as a percentage
pub fn overall_progress_percent(debts: &[Debt]) -> f64 {
    let starting = total_starting_debt(debts);
    if starting > 0.0 {
        (starting - total_debt(debts)) / starting * 100.0
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn visa() -> Debt {
        Debt::new("1", "Chase Visa", 4200.0, 0.2199, 95.0)
            .with_starting_balance(6500.0)
            .with_due_day(15)
    }

    #[test]
    fn test_progress_ratio() {
        let debt = visa();
        assert_abs_diff_eq!(debt.paid_off_amount(), 2300.0);
        assert_abs_diff_eq!(debt.progress_ratio(), 2300.0 / 6500.0, epsilon = 1e-12);
        assert_abs_diff_eq!(debt.monthly_rate(), 0.2199 / 12.0, epsilon = 1e-12);

        let fresh = Debt::new("2", "Zero", 0.0, 0.1, 10.0);
        assert_eq!(fresh.progress_ratio(), 0.0);
    }

    #[test]
    fn test_overall_progress() {
        let debts = vec![
            visa(),
            Debt::new("2", "Amex Blue", 1100.0, 0.1799, 35.0).with_starting_balance(2200.0),
        ];
        assert_abs_diff_eq!(total_debt(&debts), 5300.0);
        assert_abs_diff_eq!(total_starting_debt(&debts), 8700.0);
        assert_abs_diff_eq!(overall_progress_percent(&debts), 3400.0 / 8700.0 * 100.0, epsilon = 1e-9);
        assert_eq!(overall_progress_percent(&[]), 0.0);
    }

    #[test]
    fn test_validate_accepts_well_formed() {
        assert_eq!(validate_debts(&[visa()]), Ok(()));
    }

    #[test]
    fn test_validate_rejects_duplicate_ids() {
        let err = validate_debts(&[visa(), visa()]).unwrap_err();
        assert_eq!(err, ValidationError::DuplicateId { id: "1".to_string() });
    }

    #[test]
    fn test_validate_rejects_bad_numbers() {
        let mut debt = visa();
        debt.interest_rate = -0.05;
        assert!(matches!(
            debt.validate(0),
            Err(ValidationError::Negative { field: "interest_rate", .. })
        ));

        let mut debt = visa();
        debt.current_balance = f64::NAN;
        assert!(matches!(
            debt.validate(0),
            Err(ValidationError::NonFinite { field: "current_balance", .. })
        ));

        let debt = visa().with_due_day(32);
        assert!(matches!(debt.validate(0), Err(ValidationError::DueDay { due_day: 32, .. })));

        let mut debt = visa();
        debt.id = "  ".to_string();
        assert_eq!(debt.validate(3), Err(ValidationError::EmptyId { index: 3 }));
    }

    #[test]
    fn test_lump_sum_validation() {
        assert!(LumpSum::new(1000.0, "1", 3).validate().is_ok());
        assert!(LumpSum::new(-1.0, "1", 3).validate().is_err());
        assert_eq!(
            LumpSum::new(10.0, "1", 0).validate(),
            Err(ValidationError::LumpSumMonth { month: 0 })
        );
    }
}
