//! Immutable dataset snapshots with copy-on-write updates.

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use super::metadata::DatasetMetadata;
use super::row::{IndexedRow, Row};
use super::value::CellValue;

/// An immutable snapshot of rows, column order, and provenance.
///
/// Every update returns a new snapshot and leaves `self` untouched, so a
/// holder of an `Arc<Dataset>` can use pointer identity as a change signal.
/// Rows are kept in ascending original-index order with no index repeated,
/// including after deserialization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DatasetParts")]
pub struct Dataset {
    columns: Vec<String>,
    rows: Vec<IndexedRow>,
    metadata: DatasetMetadata,
}

/// Serialized shape of a [`Dataset`], normalized on the way in.
#[derive(Deserialize)]
struct DatasetParts {
    columns: Vec<String>,
    rows: Vec<IndexedRow>,
    metadata: DatasetMetadata,
}

impl From<DatasetParts> for Dataset {
    fn from(parts: DatasetParts) -> Self {
        Self::from_indexed(parts.columns, parts.rows, parts.metadata)
    }
}

impl Dataset {
    /// Create a dataset, assigning original indices `0..rows.len()`.
    ///
    /// Duplicate column names are dropped (first occurrence wins) and
    /// `metadata.row_count` is set from the rows.
    pub fn new(columns: Vec<String>, rows: Vec<Row>, metadata: DatasetMetadata) -> Self {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, row)| IndexedRow::new(index, row))
            .collect();
        Self::from_indexed(columns, rows, metadata)
    }

    /// Create an in-memory dataset with fresh metadata.
    pub fn from_rows(
        source_name: impl Into<String>,
        columns: Vec<String>,
        rows: Vec<Row>,
    ) -> Self {
        let metadata = DatasetMetadata::new(source_name, 0, rows.len());
        Self::new(columns, rows, metadata)
    }

    /// Create a dataset from rows that already carry original indices.
    ///
    /// Rows are ordered by index; of rows sharing an index, the first kept.
    pub(crate) fn from_indexed(
        columns: Vec<String>,
        mut rows: Vec<IndexedRow>,
        mut metadata: DatasetMetadata,
    ) -> Self {
        let columns: IndexSet<String> = columns.into_iter().collect();
        rows.sort_by_key(|r| r.index);
        rows.dedup_by_key(|r| r.index);
        metadata.row_count = rows.len();
        Self {
            columns: columns.into_iter().collect(),
            rows,
            metadata,
        }
    }

    /// Column names in display order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Rows in original-index order.
    pub fn rows(&self) -> &[IndexedRow] {
        &self.rows
    }

    /// Provenance metadata.
    pub fn metadata(&self) -> &DatasetMetadata {
        &self.metadata
    }

    /// Number of rows.
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// True when there are no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Whether `name` is one of the dataset's columns.
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// Position of a column in display order.
    pub fn column_position(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Storage position of the row with the given original index.
    pub fn position(&self, original_index: usize) -> Option<usize> {
        self.rows
            .binary_search_by_key(&original_index, |r| r.index)
            .ok()
    }

    /// Look up a row by original index.
    pub fn row(&self, original_index: usize) -> Option<&IndexedRow> {
        self.position(original_index).map(|pos| &self.rows[pos])
    }

    /// Look up a single cell by original index and column name.
    pub fn cell(&self, original_index: usize, column: &str) -> Option<&CellValue> {
        if !self.has_column(column) {
            return None;
        }
        self.row(original_index).map(|r| r.row.get(column))
    }

    /// The original index the next appended row will receive.
    pub fn next_index(&self) -> usize {
        self.rows.last().map(|r| r.index + 1).unwrap_or(0)
    }

    /// A copy with one cell replaced.
    ///
    /// Returns `None` when the row or column does not exist.
    pub fn with_cell(
        &self,
        original_index: usize,
        column: &str,
        value: CellValue,
    ) -> Option<Dataset> {
        if !self.has_column(column) {
            return None;
        }
        let pos = self.position(original_index)?;
        let mut next = self.clone();
        next.rows[pos].row.set(column, value);
        Some(next)
    }

    /// A copy with `row` appended; also returns the row's original index.
    pub fn with_appended_row(&self, row: Row) -> (Dataset, usize) {
        let index = self.next_index();
        let mut next = self.clone();
        next.rows.push(IndexedRow::new(index, row));
        next.metadata.row_count = next.rows.len();
        (next, index)
    }

    /// A copy without the row whose original index is `original_index`.
    ///
    /// Returns `None` when no such row exists. No other row's index moves.
    pub fn without_row(&self, original_index: usize) -> Option<Dataset> {
        let pos = self.position(original_index)?;
        let mut next = self.clone();
        next.rows.remove(pos);
        next.metadata.row_count = next.rows.len();
        Some(next)
    }
}
