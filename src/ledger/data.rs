//! Recurring expense records

use crate::error::{ForecastError, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// How often an expense is charged
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Frequency {
    OneTime,
    Monthly,
    Quarterly,
    Yearly,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    pub id: String,
    pub name: String,
    /// Whole currency units charged per occurrence
    pub amount: i64,
    pub frequency: Frequency,
    pub start_date: NaiveDate,
    /// Absent for ongoing expenses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Expense {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        amount: i64,
        frequency: Frequency,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            amount,
            frequency,
            start_date,
            end_date: None,
            category: None,
            notes: None,
        }
    }

    pub fn ending_on(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount < 0 {
            return Err(ForecastError::invalid(
                "expense",
                &self.id,
                format!("negative amount {}", self.amount),
            ));
        }
        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(ForecastError::invalid(
                    "expense",
                    &self.id,
                    format!("ends {} before it starts {}", end, self.start_date),
                ));
            }
        }
        Ok(())
    }
}
