//! Front-end facing handlers.
//!
//! Front ends hand over the raw text of the two input fields plus the store
//! and clock they own; nothing here keeps state between calls.

use crate::{
    engine, Assessment, Error, Field, HistoryStore, InputError, LossThreshold, Reading, Result,
};
use chrono::NaiveDateTime;

/// Validated weight (kg) and height (m), both finite and strictly positive
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Measurements {
    pub weight: f64,
    pub height: f64,
}

fn parse_positive(field: Field, text: &str) -> std::result::Result<f64, InputError> {
    let trimmed = text.trim();
    let value: f64 = trimmed.parse().map_err(|_| InputError::NotANumber {
        field,
        value: trimmed.to_string(),
    })?;

    if !value.is_finite() {
        return Err(InputError::NotFinite { field });
    }
    if value <= 0.0 {
        return Err(InputError::NotPositive { field, value });
    }
    Ok(value)
}

/// Parse and validate the raw weight and height text
pub fn parse_measurements(
    weight_text: &str,
    height_text: &str,
) -> std::result::Result<Measurements, InputError> {
    Ok(Measurements {
        weight: parse_positive(Field::Weight, weight_text)?,
        height: parse_positive(Field::Height, height_text)?,
    })
}

/// Assess validated measurements, rejecting results that cannot be recorded
///
/// A BMI that overflows or rounds down to zero, or an ideal range that
/// rounds to an empty band, is `InputError::OutOfRange`.
pub fn assess_measurements(
    measurements: &Measurements,
    threshold: LossThreshold,
) -> std::result::Result<Assessment, InputError> {
    let assessment = engine::assess(measurements.weight, measurements.height, threshold);

    let bmi_ok = assessment.bmi.is_finite() && assessment.bmi > 0.0;
    let range = assessment.ideal_range;
    let range_ok = range.max.is_finite() && range.min < range.max;
    if !bmi_ok || !range_ok {
        return Err(InputError::OutOfRange {
            weight: measurements.weight,
            height: measurements.height,
        });
    }
    Ok(assessment)
}

/// Validate input, assess it, and append the reading to the store
///
/// Invalid input returns `Error::InvalidInput` and nothing is appended.
pub fn calculate<S: HistoryStore + ?Sized>(
    weight_text: &str,
    height_text: &str,
    threshold: LossThreshold,
    store: &mut S,
    now: NaiveDateTime,
) -> Result<Assessment> {
    let assessment = parse_measurements(weight_text, height_text)
        .and_then(|m| assess_measurements(&m, threshold))
        .map_err(|e| {
            tracing::info!("Rejected input: {}", e);
            Error::InvalidInput(e)
        })?;

    store.append(Reading::new(now, assessment.bmi))?;

    Ok(assessment)
}

/// Load the history for display, `None` when there is nothing to show
pub fn load_history<S: HistoryStore + ?Sized>(store: &S) -> Result<Option<Vec<Reading>>> {
    let readings = store.load_all()?;
    if readings.is_empty() {
        Ok(None)
    } else {
        Ok(Some(readings))
    }
}
