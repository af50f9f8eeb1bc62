//! Load income sources and bills from CSV
//!
//! Income columns: `id,name,amount,frequency,is_variable`.
//! Bill columns: `id,name,amount,frequency,category`.

use super::{Bill, Frequency, IncomeSource};
use crate::error::{LoadError, ValidationError};
use csv::Reader;
use log::info;
use std::path::Path;

#[derive(Debug, serde::Deserialize)]
struct IncomeRow {
    id: String,
    name: String,
    amount: f64,
    frequency: String,
    #[serde(default)]
    is_variable: Option<bool>,
}

#[derive(Debug, serde::Deserialize)]
struct BillRow {
    id: String,
    name: String,
    amount: f64,
    frequency: String,
    #[serde(default)]
    category: Option<String>,
}

fn parse_frequency(row: usize, value: &str) -> Result<Frequency, LoadError> {
    value.parse().map_err(|value| LoadError::UnknownFrequency { row, value })
}

fn check_amount(field: &'static str, value: f64) -> Result<(), LoadError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ValidationError::InvalidAmount { field, value }.into())
    }
}

pub fn load_income<P: AsRef<Path>>(path: P) -> Result<Vec<IncomeSource>, LoadError> {
    let sources = read_income(Reader::from_path(path.as_ref())?)?;
    info!("loaded {} income sources from {}", sources.len(), path.as_ref().display());
    Ok(sources)
}

pub fn load_income_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<IncomeSource>, LoadError> {
    read_income(Reader::from_reader(reader))
}

fn read_income<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<IncomeSource>, LoadError> {
    let mut sources = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: IncomeRow = result?;
        check_amount("income.amount", row.amount)?;
        sources.push(IncomeSource {
            frequency: parse_frequency(index + 1, &row.frequency)?,
            id: row.id,
            name: row.name,
            amount: row.amount,
            is_variable: row.is_variable.unwrap_or(false),
        });
    }

    Ok(sources)
}

pub fn load_bills<P: AsRef<Path>>(path: P) -> Result<Vec<Bill>, LoadError> {
    let bills = read_bills(Reader::from_path(path.as_ref())?)?;
    info!("loaded {} bills from {}", bills.len(), path.as_ref().display());
    Ok(bills)
}

pub fn load_bills_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<Bill>, LoadError> {
    read_bills(Reader::from_reader(reader))
}

fn read_bills<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<Bill>, LoadError> {
    let mut bills = Vec::new();

    for (index, result) in reader.deserialize().enumerate() {
        let row: BillRow = result?;
        check_amount("bill.amount", row.amount)?;
        bills.push(Bill {
            frequency: parse_frequency(index + 1, &row.frequency)?,
            id: row.id,
            name: row.name,
            amount: row.amount,
            category: row.category.unwrap_or_default(),
        });
    }

    Ok(bills)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_income() {
        let csv = "\
id,name,amount,frequency,is_variable
1,Day Job,2800,biweekly,false
2,Freelance,600,monthly,
";
        let sources = load_income_from_reader(csv.as_bytes()).expect("Failed to load income");
        assert_eq!(sources.len(), 2);
        assert_eq!(sources[0].frequency, Frequency::Biweekly);
        assert!(!sources[1].is_variable);
    }

    #[test]
    fn test_load_bills_unknown_frequency() {
        let csv = "\
id,name,amount,frequency,category
1,Rent,1400,monthly,housing
2,Gym,30,yearly,health
";
        match load_bills_from_reader(csv.as_bytes()) {
            Err(LoadError::UnknownFrequency { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "yearly");
            }
            other => panic!("expected unknown frequency, got {:?}", other),
        }
    }

    #[test]
    fn test_load_bills_rejects_negative_amount() {
        let csv = "\
id,name,amount,frequency,category
1,Refund,-20,monthly,
";
        assert!(matches!(
            load_bills_from_reader(csv.as_bytes()),
            Err(LoadError::Invalid(ValidationError::InvalidAmount { .. }))
        ));
    }
}
