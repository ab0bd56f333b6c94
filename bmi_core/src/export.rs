//! CSV export of the reading history.

use crate::{Reading, Result};
use std::path::Path;

/// A row in the CSV output
#[derive(Debug, serde::Serialize)]
struct CsvRow {
    date: String,
    bmi: f64,
    category: &'static str,
}

impl From<&Reading> for CsvRow {
    fn from(reading: &Reading) -> Self {
        CsvRow {
            date: reading.date_label(),
            bmi: reading.bmi,
            category: reading.category().label(),
        }
    }
}

/// Write every reading to `path` as CSV, replacing any existing file
///
/// Returns the number of rows written (excluding the header).
pub fn write_csv(readings: &[Reading], path: &Path) -> Result<usize> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut writer = csv::Writer::from_path(path)?;
    if readings.is_empty() {
        writer.write_record(["date", "bmi", "category"])?;
    }
    for reading in readings {
        writer.serialize(CsvRow::from(reading))?;
    }
    writer.flush()?;

    tracing::info!("Exported {} readings to {:?}", readings.len(), path);
    Ok(readings.len())
}
