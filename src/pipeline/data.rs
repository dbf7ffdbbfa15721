//! Deal and timeline entry records as supplied by the caller

use crate::assumptions::StageConfig;
use crate::error::{ForecastError, Result};
use crate::projection::Month;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a deal in the sales pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Confirmed,
    VeryLikely,
    Hot,
    Medium,
    LongShot,
    Lost,
}

impl Stage {
    /// All stages in display order
    pub const ALL: [Stage; 6] = [
        Stage::Confirmed,
        Stage::VeryLikely,
        Stage::Hot,
        Stage::Medium,
        Stage::LongShot,
        Stage::Lost,
    ];

    /// Stages that can still produce revenue
    pub const OPEN: [Stage; 5] = [
        Stage::Confirmed,
        Stage::VeryLikely,
        Stage::Hot,
        Stage::Medium,
        Stage::LongShot,
    ];

    pub fn is_lost(self) -> bool {
        self == Stage::Lost
    }

    pub fn default_probability(self) -> u8 {
        StageConfig::for_stage(self).default_probability
    }

    pub fn label(self) -> &'static str {
        StageConfig::for_stage(self).label
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Confirmed => "confirmed",
            Stage::VeryLikely => "very_likely",
            Stage::Hot => "hot",
            Stage::Medium => "medium",
            Stage::LongShot => "long_shot",
            Stage::Lost => "lost",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a scheduled revenue entry represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    #[default]
    Invoice,
    Recurring,
    Milestone,
}

/// Revenue scheduled for one deal in one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    #[serde(default)]
    pub id: String,
    pub deal_id: String,
    pub month: Month,
    /// Whole currency units
    pub amount: i64,
    #[serde(rename = "type", default)]
    pub kind: EntryKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl TimelineEntry {
    pub fn new(deal_id: impl Into<String>, month: Month, amount: i64) -> Self {
        Self {
            id: String::new(),
            deal_id: deal_id.into(),
            month,
            amount,
            kind: EntryKind::default(),
            notes: None,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.amount < 0 {
            return Err(ForecastError::invalid(
                "timeline entry",
                &self.id,
                format!("negative amount {}", self.amount),
            ));
        }
        Ok(())
    }
}

/// A sales opportunity
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Deal {
    pub id: String,
    pub name: String,
    pub stage: Stage,
    /// Whole currency units
    pub amount: i64,
    /// 0-100; the stage default applies when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub probability: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_close_date: Option<NaiveDate>,
    /// Scheduled revenue; takes precedence over the close date when non-empty
    #[serde(default)]
    pub timeline: Vec<TimelineEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Deal {
    pub fn new(id: impl Into<String>, name: impl Into<String>, stage: Stage, amount: i64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stage,
            amount,
            probability: None,
            expected_close_date: None,
            timeline: Vec::new(),
            notes: None,
        }
    }

    pub fn with_probability(mut self, probability: u8) -> Self {
        self.probability = Some(probability);
        self
    }

    pub fn closing_on(mut self, date: NaiveDate) -> Self {
        self.expected_close_date = Some(date);
        self
    }

    pub fn with_entry(mut self, month: Month, amount: i64) -> Self {
        let entry = TimelineEntry::new(self.id.clone(), month, amount);
        self.timeline.push(entry);
        self
    }

    /// Stated probability, or the stage default when none was given
    pub fn probability(&self) -> u8 {
        self.probability
            .unwrap_or_else(|| self.stage.default_probability())
    }

    /// Check the record against the rules the engine relies on
    pub fn validate(&self) -> Result<()> {
        if self.amount <= 0 {
            return Err(ForecastError::invalid(
                "deal",
                &self.id,
                format!("amount must be positive, got {}", self.amount),
            ));
        }
        if let Some(p) = self.probability {
            if p > 100 {
                return Err(ForecastError::invalid(
                    "deal",
                    &self.id,
                    format!("probability {p} is outside 0-100"),
                ));
            }
        }
        for entry in &self.timeline {
            entry.validate()?;
            if entry.deal_id != self.id {
                return Err(ForecastError::invalid(
                    "deal",
                    &self.id,
                    format!("timeline entry belongs to deal '{}'", entry.deal_id),
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probability_falls_back_to_stage() {
        let deal = Deal::new("d1", "Acme", Stage::Hot, 100_000);
        assert_eq!(deal.probability(), 60);
        assert_eq!(deal.with_probability(75).probability(), 75);
    }

    #[test]
    fn test_validate_rejects_bad_records() {
        assert!(Deal::new("d1", "Zero", Stage::Hot, 0).validate().is_err());
        assert!(Deal::new("d2", "Over", Stage::Hot, 10)
            .with_probability(101)
            .validate()
            .is_err());

        let mut foreign = Deal::new("d3", "Foreign", Stage::Hot, 10);
        foreign
            .timeline
            .push(TimelineEntry::new("other", Month::new(2026, 1).unwrap(), 5));
        assert!(foreign.validate().is_err());

        let ok = Deal::new("d4", "Fine", Stage::Confirmed, 10).with_entry(Month::new(2026, 1).unwrap(), 5);
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_deserialize_minimal_deal() {
        let json = r#"{
            "id": "deal_1",
            "name": "Website rebuild",
            "stage": "very_likely",
            "amount": 500000,
            "expected_close_date": "2026-12-15"
        }"#;
        let deal: Deal = serde_json::from_str(json).unwrap();
        assert_eq!(deal.stage, Stage::VeryLikely);
        assert_eq!(deal.probability(), 80);
        assert!(deal.timeline.is_empty());
        assert_eq!(deal.expected_close_date, NaiveDate::from_ymd_opt(2026, 12, 15));
    }

    #[test]
    fn test_deserialize_entry_type_field() {
        let json = r#"{"deal_id": "d1", "month": "2026-11-01", "amount": 2500, "type": "recurring"}"#;
        let entry: TimelineEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.kind, EntryKind::Recurring);
        assert_eq!(entry.month, Month::new(2026, 11).unwrap());
    }
}
