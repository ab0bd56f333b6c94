//! Reading history persistence.
//!
//! The history is a single JSON document holding an array of readings.
//! Every append is a whole-document read-modify-write. Missing or corrupted
//! files are treated as an empty history and never fail a load.

use crate::{Error, Reading, Result};
use serde::Serialize;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Storage backend for the reading history
pub trait HistoryStore {
    /// Add a reading to the end of the history
    fn append(&mut self, reading: Reading) -> Result<()>;

    /// Load every persisted reading in insertion order
    fn load_all(&self) -> Result<Vec<Reading>>;
}

/// History kept as a pretty-printed JSON array on disk
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// Create a store backed by the given file path
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the whole document, falling back to an empty history
    fn read_or_empty(&self) -> Vec<Reading> {
        if !self.path.exists() {
            tracing::debug!("No history file at {:?}, starting empty", self.path);
            return Vec::new();
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::warn!(
                    "Failed to read history file {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Reading>>(&contents) {
            Ok(readings) => {
                tracing::debug!("Loaded {} readings from {:?}", readings.len(), self.path);
                readings
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to parse history file {:?}: {}. Treating as empty.",
                    self.path,
                    e
                );
                Vec::new()
            }
        }
    }

    /// Replace the file contents with the given readings
    ///
    /// Writes to a temp file in the same directory and renames it over the
    /// original, so a failed write never leaves a truncated history behind.
    fn write_all(&self, readings: &[Reading]) -> Result<()> {
        let parent = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent)?;

        let temp = NamedTempFile::new_in(parent)?;
        {
            let mut writer = std::io::BufWriter::new(temp.as_file());
            let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
            let mut serializer = serde_json::Serializer::with_formatter(&mut writer, formatter);
            readings.serialize(&mut serializer)?;
            writer.flush()?;
        }
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| Error::Io(e.error))?;
        Ok(())
    }
}

impl HistoryStore for JsonFileStore {
    fn append(&mut self, reading: Reading) -> Result<()> {
        let mut readings = self.read_or_empty();
        readings.push(reading);
        self.write_all(&readings)?;

        tracing::info!(
            "Appended reading to {:?} ({} total)",
            self.path,
            readings.len()
        );
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Reading>> {
        Ok(self.read_or_empty())
    }
}

/// History held in memory only
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    readings: Vec<Reading>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }
}

impl HistoryStore for MemoryStore {
    fn append(&mut self, reading: Reading) -> Result<()> {
        self.readings.push(reading);
        Ok(())
    }

    fn load_all(&self) -> Result<Vec<Reading>> {
        Ok(self.readings.clone())
    }
}
