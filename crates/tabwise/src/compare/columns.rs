//! Join key candidates, side labels, and the merged column order.

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{Result, TabwiseError};

/// Which dataset a column or row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Left,
    Right,
}

/// Labels used to qualify non-key columns in merged rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideLabels {
    pub left: String,
    pub right: String,
}

impl Default for SideLabels {
    fn default() -> Self {
        Self {
            left: "File 1".to_string(),
            right: "File 2".to_string(),
        }
    }
}

impl SideLabels {
    pub fn new(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Labels must be non-empty and distinct, or the two sides' columns
    /// would collide in merged rows.
    pub fn validate(&self) -> Result<()> {
        if self.left.trim().is_empty() || self.right.trim().is_empty() {
            return Err(TabwiseError::Config(
                "comparison labels must not be empty".to_string(),
            ));
        }
        if self.left == self.right {
            return Err(TabwiseError::Config(format!(
                "comparison labels must differ (both are '{}')",
                self.left
            )));
        }
        Ok(())
    }

    /// The merged-row name of `column` from `side`, e.g. `(File 1) age`.
    pub fn qualify(&self, side: Side, column: &str) -> String {
        let label = match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        };
        format!("({}) {}", label, column)
    }
}

/// Columns present in both datasets, in the left dataset's order.
///
/// These are the candidate join keys; the first one is the default.
pub fn common_columns(left: &Dataset, right: &Dataset) -> Vec<String> {
    left.columns()
        .iter()
        .filter(|c| right.has_column(c))
        .cloned()
        .collect()
}

/// Display and export order for merged rows.
///
/// The key comes first. Each left column is followed directly by the right
/// column of the same name when there is one, so shared fields sit side by
/// side. Columns only the right dataset has are appended at the end.
pub fn merged_columns(
    left: &[String],
    right: &[String],
    key: &str,
    labels: &SideLabels,
) -> Vec<String> {
    let mut columns = vec![key.to_string()];

    for col in left.iter().filter(|c| *c != key) {
        columns.push(labels.qualify(Side::Left, col));
        if right.contains(col) {
            columns.push(labels.qualify(Side::Right, col));
        }
    }

    for col in right.iter().filter(|c| *c != key && !left.contains(*c)) {
        columns.push(labels.qualify(Side::Right, col));
    }

    columns
}
