#![forbid(unsafe_code)]

//! Core domain model and business logic for the BMI tracker.
//!
//! This crate provides:
//! - Domain types (readings, categories, suggestions, assessments)
//! - BMI engine (formula, classification, ideal range, suggestion)
//! - History persistence behind the `HistoryStore` trait
//! - Input validation and the calculate/record flow used by front ends
//! - Chart layout and CSV export of the history

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod engine;
pub mod history;
pub mod calculator;
pub mod chart;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Field, InputError, Result};
pub use types::*;
pub use config::Config;
pub use engine::{assess, category_of, compute_bmi, ideal_weight_range, suggest_change};
pub use history::{HistoryStore, JsonFileStore, MemoryStore};
pub use calculator::{assess_measurements, calculate, load_history, parse_measurements, Measurements};
pub use chart::{ChartSeries, PlotLayout};
