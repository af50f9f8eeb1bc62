//! Monthly household cash flow and the surplus available for extra payments

use crate::debt::Debt;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Share of the monthly surplus suggested as the extra debt payment
pub const SURPLUS_SHARE: f64 = 0.5;

/// How often an income source pays or a bill comes due
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    Weekly,
    Biweekly,
    Monthly,
}

impl Frequency {
    /// Multiplier converting one occurrence to a monthly amount
    pub fn monthly_factor(&self) -> f64 {
        match self {
            Frequency::Weekly => 4.33,
            Frequency::Biweekly => 2.167,
            Frequency::Monthly => 1.0,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Frequency::Weekly => "weekly",
            Frequency::Biweekly => "biweekly",
            Frequency::Monthly => "monthly",
        }
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "weekly" => Ok(Frequency::Weekly),
            "biweekly" => Ok(Frequency::Biweekly),
            "monthly" => Ok(Frequency::Monthly),
            other => Err(other.to_string()),
        }
    }
}

/// A recurring source of household income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IncomeSource {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    #[serde(default)]
    pub is_variable: bool,
}

impl IncomeSource {
    pub fn monthly_amount(&self) -> f64 {
        self.amount * self.frequency.monthly_factor()
    }
}

/// A recurring household bill
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: String,
    pub name: String,
    pub amount: f64,
    pub frequency: Frequency,
    #[serde(default)]
    pub category: String,
}

impl Bill {
    pub fn monthly_amount(&self) -> f64 {
        self.amount * self.frequency.monthly_factor()
    }
}

pub fn monthly_income(sources: &[IncomeSource]) -> f64 {
    sources.iter().map(IncomeSource::monthly_amount).sum()
}

pub fn monthly_bills(bills: &[Bill]) -> f64 {
    bills.iter().map(Bill::monthly_amount).sum()
}

pub fn monthly_minimums(debts: &[Debt]) -> f64 {
    debts.iter().map(|d| d.minimum_payment).sum()
}

/// Monthly totals for one household
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub monthly_income: f64,
    pub monthly_bills: f64,
    pub monthly_minimums: f64,
}

impl CashFlow {
    pub fn from_household(sources: &[IncomeSource], bills: &[Bill], debts: &[Debt]) -> Self {
        Self {
            monthly_income: monthly_income(sources),
            monthly_bills: monthly_bills(bills),
            monthly_minimums: monthly_minimums(debts),
        }
    }

    /// Income left after bills and minimum payments (negative when short)
    pub fn surplus(&self) -> f64 {
        self.monthly_income - self.monthly_bills - self.monthly_minimums
    }

    /// Whole-dollar extra payment suggested from half the surplus
    pub fn suggested_extra(&self) -> f64 {
        (self.surplus() * SURPLUS_SHARE).floor().max(0.0)
    }

    /// Largest whole-dollar extra payment the surplus can fund
    pub fn max_extra(&self) -> f64 {
        self.surplus().floor().max(0.0)
    }
}
