//! Read expenses from JSON or CSV

use super::Expense;
use crate::error::{ForecastError, Result};
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Load expenses from a JSON array
pub fn load_expenses_from_json<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let expenses: Vec<Expense> = serde_json::from_reader(reader)?;
    validate_all(expenses)
}

/// Load expenses from CSV with a header row
///
/// Expected columns: id, name, amount, frequency, start_date, end_date,
/// category. `end_date` and `category` may be left empty.
pub fn load_expenses_from_csv<R: Read>(reader: R) -> Result<Vec<Expense>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut expenses = Vec::new();
    for result in rdr.deserialize() {
        let expense: Expense = result?;
        expenses.push(expense);
    }
    validate_all(expenses)
}

/// Load expenses from a `.json` or `.csv` file
pub fn load_expenses<P: AsRef<Path>>(path: P) -> Result<Vec<Expense>> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let expenses = match extension.as_str() {
        "json" => load_expenses_from_json(BufReader::new(File::open(path)?))?,
        "csv" => load_expenses_from_csv(BufReader::new(File::open(path)?))?,
        other => return Err(ForecastError::UnsupportedFormat(other.to_string())),
    };

    info!("Loaded {} expenses from {}", expenses.len(), path.display());
    Ok(expenses)
}

fn validate_all(expenses: Vec<Expense>) -> Result<Vec<Expense>> {
    for expense in &expenses {
        expense.validate()?;
    }
    Ok(expenses)
}
