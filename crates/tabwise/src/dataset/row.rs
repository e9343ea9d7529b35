//! Rows and their stable original indices.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::value::CellValue;

static ABSENT: CellValue = CellValue::Absent;

/// A mapping from column name to cell value, in insertion order.
///
/// A row may lack a column its dataset lists; such cells read as
/// [`CellValue::Absent`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Row(IndexMap<String, CellValue>);

impl Row {
    /// Create an empty row.
    pub fn new() -> Self {
        Self(IndexMap::new())
    }

    /// Get a cell, reading missing columns as absent.
    pub fn get(&self, column: &str) -> &CellValue {
        self.0.get(column).unwrap_or(&ABSENT)
    }

    /// Whether the row carries an entry for `column` at all.
    pub fn contains(&self, column: &str) -> bool {
        self.0.contains_key(column)
    }

    /// Set a cell, keeping the column's position if it already exists.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.0.insert(column.into(), value.into());
    }

    /// Builder-style variant of [`Row::set`].
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.set(column, value);
        self
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &CellValue)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of entries actually stored.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

/// A row paired with its original index.
///
/// The index is assigned once at ingestion and never renumbered by
/// filtering, sorting, pagination, or row deletion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexedRow {
    /// Original 0-based position at ingestion.
    pub index: usize,
    /// Cell values.
    pub row: Row,
}

impl IndexedRow {
    pub fn new(index: usize, row: Row) -> Self {
        Self { index, row }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_absent() {
        let row = Row::new().with("id", 1.0);
        assert_eq!(row.get("id"), &CellValue::Number(1.0));
        assert!(row.get("name").is_absent());
        assert!(!row.contains("name"));
    }

    #[test]
    fn test_set_preserves_position() {
        let mut row = Row::new().with("a", 1.0).with("b", 2.0);
        row.set("a", "x");
        let keys: Vec<&str> = row.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(row.get("a").to_text(), "x");
    }
}
