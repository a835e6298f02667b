use std::path::{Path, PathBuf};

use crate::{
    analysis::{CityAverages, Extremes, InvalidDate, RangeError},
    csv::{self, FileError},
    record::Row,
    store::RecordStore,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadSummary {
    pub loaded: usize,
    pub skipped: usize,
}

/// An editing session: the records plus the file they came from.
#[derive(Debug, Default)]
pub struct Workbook {
    store: RecordStore,
    path: Option<PathBuf>,
}

impl Workbook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    /// The file the next [`Workbook::save`] writes to.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Loads `path` and makes it the current file. On error the records and
    /// the current file are left as they were.
    pub fn open(&mut self, path: impl Into<PathBuf>) -> Result<LoadSummary, FileError> {
        let path = path.into();
        let parsed = csv::load(&path)?;
        let summary = LoadSummary {
            loaded: parsed.records.len(),
            skipped: parsed.skipped,
        };

        self.store.replace(parsed.records);
        self.path = Some(path);
        Ok(summary)
    }

    pub fn save(&self) -> Result<&Path, FileError> {
        let path = self.path().ok_or(FileError::NoPath)?;
        csv::save(path, self.store.records())?;
        Ok(path)
    }

    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), FileError> {
        let path = path.into();
        csv::save(&path, self.store.records())?;
        self.path = Some(path);
        Ok(())
    }

    /// Called after every edit of the grid with its full contents.
    pub fn resync<'a>(&mut self, rows: impl IntoIterator<Item = &'a Row>) {
        self.store.resync(rows);
    }

    pub fn rows(&self) -> Vec<Row> {
        self.store.rows()
    }

    pub fn analyze_date(&self, date: &str) -> Result<Option<Extremes<'_>>, InvalidDate> {
        self.store.analyze_date(date)
    }

    pub fn average_by_city(
        &self,
        start: &str,
        end: &str,
    ) -> Result<Option<CityAverages>, RangeError> {
        self.store.average_by_city(start, end)
    }
}
