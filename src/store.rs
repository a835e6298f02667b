use std::slice;

use crate::record::{Record, Row};

/// The records currently being edited, in grid order.
///
/// Only ever replaced wholesale: after a load, or after every edit of the
/// grid through [`RecordStore::resync`].
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn replace(&mut self, records: Vec<Record>) {
        self.records = records;
    }

    /// Rebuilds the store from a snapshot of the grid.
    ///
    /// Rows with an unset or blank cell, or whose temperature isn't a
    /// number, are dropped without error: they are usually rows still being
    /// typed in.
    pub fn resync<'a>(&mut self, rows: impl IntoIterator<Item = &'a Row>) {
        self.records.clear();
        for (index, row) in rows.into_iter().enumerate() {
            match row.to_record() {
                Some(record) => self.records.push(record),
                None => log::debug!("dropping incomplete row {index}: {row:?}"),
            }
        }
    }

    /// The grid contents matching the store.
    pub fn rows(&self) -> Vec<Row> {
        self.records.iter().map(Row::from).collect()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl From<Vec<Record>> for RecordStore {
    fn from(records: Vec<Record>) -> Self {
        Self { records }
    }
}
