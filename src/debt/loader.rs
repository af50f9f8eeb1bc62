//! Load debts from CSV
//!
//! Expected columns: `id,name,current_balance,starting_balance,interest_rate,minimum_payment,due_day`.
//! `starting_balance` and `due_day` may be left empty.

use super::{validate_debts, Debt};
use crate::error::LoadError;
use csv::Reader;
use log::info;
use std::path::Path;

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    id: String,
    name: String,
    current_balance: f64,
    #[serde(default)]
    starting_balance: Option<f64>,
    interest_rate: f64,
    minimum_payment: f64,
    #[serde(default)]
    due_day: Option<u8>,
}

impl CsvRow {
    fn into_debt(self) -> Debt {
        // An unknown origination balance falls back to the current one
        let starting_balance = self
            .starting_balance
            .filter(|b| *b > 0.0)
            .unwrap_or(self.current_balance);

        let mut debt = Debt::new(
            self.id,
            self.name,
            self.current_balance,
            self.interest_rate,
            self.minimum_payment,
        )
        .with_starting_balance(starting_balance);
        if let Some(day) = self.due_day {
            debt = debt.with_due_day(day);
        }
        debt
    }
}

/// Load and validate debts from a CSV file
pub fn load_debts<P: AsRef<Path>>(path: P) -> Result<Vec<Debt>, LoadError> {
    let reader = Reader::from_path(path.as_ref())?;
    let debts = read_debts(reader)?;
    info!("loaded {} debts from {}", debts.len(), path.as_ref().display());
    Ok(debts)
}

/// Load and validate debts from any reader (e.g., string buffer, request body)
pub fn load_debts_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Debt>, LoadError> {
    read_debts(Reader::from_reader(reader))
}

fn read_debts<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Debt>, LoadError> {
    let mut debts = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        debts.push(row.into_debt());
    }

    validate_debts(&debts)?;
    Ok(debts)
}
