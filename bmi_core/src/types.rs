//! Core domain types for the BMI tracker.
//!
//! This module defines the fundamental types used throughout the system:
//! - Persisted readings and their on-disk timestamp format
//! - BMI categories and the weight-loss advice threshold
//! - Suggestions and the full assessment shown to the user

use chrono::{NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Timestamp layout used in the history file and in chart labels
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ============================================================================
// Reading
// ============================================================================

/// One timestamped BMI result, as persisted in the history file
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Reading {
    #[serde(rename = "date", with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    pub bmi: f64,
}

impl Reading {
    /// Create a reading, truncating the timestamp to whole seconds
    pub fn new(timestamp: NaiveDateTime, bmi: f64) -> Self {
        Self {
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
            bmi,
        }
    }

    /// Category is derived from the stored value, never persisted
    pub fn category(&self) -> BmiCategory {
        crate::engine::category_of(self.bmi)
    }

    /// Timestamp rendered as `YYYY-MM-DD HH:MM:SS`
    pub fn date_label(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }
}

mod timestamp_format {
    use super::TIMESTAMP_FORMAT;
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &NaiveDateTime, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(&value.format(TIMESTAMP_FORMAT))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<NaiveDateTime, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT).map_err(serde::de::Error::custom)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// BMI category, half-open intervals with inclusive lower bounds
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

impl fmt::Display for BmiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// BMI at or above which the suggestion advises losing weight.
///
/// The category label always distinguishes Overweight from Obese; this only
/// decides where the "lose weight" advice starts.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum LossThreshold {
    #[default]
    Overweight,
    Obese,
}

impl LossThreshold {
    pub fn bmi(&self) -> f64 {
        match self {
            LossThreshold::Overweight => crate::engine::OVERWEIGHT_MIN,
            LossThreshold::Obese => crate::engine::OBESE_MIN,
        }
    }
}

// ============================================================================
// Engine Outputs
// ============================================================================

/// Normal-weight band (kg) for a given height
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IdealRange {
    pub min: f64,
    pub max: f64,
}

/// Weight-change advice relative to the normal band
#[derive(Clone, Debug, PartialEq)]
pub enum Suggestion {
    Gain { kg: f64 },
    Lose { kg: f64 },
    Maintain,
    /// Overweight but below the configured loss threshold
    Monitor { max_kg: f64 },
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Suggestion::Gain { kg } => write!(
                f,
                "You are underweight.\n→ You need to gain at least {:.2} kg to reach normal BMI.",
                kg
            ),
            Suggestion::Lose { kg } => write!(
                f,
                "You are overweight/obese.\n→ You need to lose at least {:.2} kg to reach normal BMI.",
                kg
            ),
            Suggestion::Maintain => write!(
                f,
                "You are in the normal BMI range.\n→ Maintain your current weight!"
            ),
            Suggestion::Monitor { max_kg } => write!(
                f,
                "You are overweight.\n→ Keep your weight at or below {:.2} kg to reach normal BMI.",
                max_kg
            ),
        }
    }
}

/// Everything a front end shows after a successful calculation
#[derive(Clone, Debug, PartialEq)]
pub struct Assessment {
    pub weight: f64,
    pub height: f64,
    pub bmi: f64,
    pub category: BmiCategory,
    pub ideal_range: IdealRange,
    pub suggestion: Suggestion,
}

impl fmt::Display for Assessment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "BMI: {:.2}", self.bmi)?;
        writeln!(f, "Category: {}", self.category)?;
        writeln!(
            f,
            "Normal weight for your height: {:.2}–{:.2} kg",
            self.ideal_range.min, self.ideal_range.max
        )?;
        writeln!(f)?;
        write!(f, "{}", self.suggestion)
    }
}
