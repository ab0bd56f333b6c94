//! Button handlers, kept free of widgets so they can be tested.

use bmi_core::chart::ChartSeries;
use bmi_core::{calculate, load_history, Error, Field, HistoryStore, LossThreshold, Result};
use chrono::NaiveDateTime;

pub const INPUT_ERROR_TITLE: &str = "Input Error";
pub const INPUT_ERROR_TEXT: &str = "Please enter valid positive numbers.";
pub const NO_DATA_TITLE: &str = "No Data";
pub const NO_DATA_TEXT: &str = "No BMI data found.";

/// State shared by the main window's handlers
pub struct AppState {
    pub store: Box<dyn HistoryStore>,
    pub threshold: LossThreshold,
}

#[derive(Debug, PartialEq)]
pub enum CalcOutcome {
    /// Text for the result label
    Shown(String),
    /// Detail for the input error dialog, and the entry to focus
    InvalidInput {
        detail: String,
        field: Option<Field>,
    },
}

#[derive(Debug, PartialEq)]
pub enum HistoryOutcome {
    NoData,
    Chart(ChartSeries),
}

pub fn on_calculate(
    state: &mut AppState,
    weight_text: &str,
    height_text: &str,
    now: NaiveDateTime,
) -> Result<CalcOutcome> {
    match calculate(
        weight_text,
        height_text,
        state.threshold,
        state.store.as_mut(),
        now,
    ) {
        Ok(assessment) => Ok(CalcOutcome::Shown(assessment.to_string())),
        Err(Error::InvalidInput(e)) => Ok(CalcOutcome::InvalidInput {
            detail: format!("{}\n({})", INPUT_ERROR_TEXT, e),
            field: e.field(),
        }),
        Err(e) => Err(e),
    }
}

pub fn on_view_history(state: &AppState) -> Result<HistoryOutcome> {
    Ok(match load_history(state.store.as_ref())? {
        Some(readings) => HistoryOutcome::Chart(ChartSeries::from_readings(&readings)),
        None => HistoryOutcome::NoData,
    })
}
