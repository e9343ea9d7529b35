//! Live aggregate statistics over a cell selection.

use serde::{Deserialize, Serialize};

use crate::dataset::CellValue;

/// Statistics over the selected cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    /// Cells inside the selection, numeric or not.
    pub cell_count: usize,
    /// Cells that coerced to a number.
    pub numeric_count: usize,
    /// Present only when at least one cell is numeric.
    #[serde(flatten)]
    pub numeric: Option<NumericSummary>,
}

/// Summary of the numeric cells in a selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub sum: f64,
    pub mean: f64,
    pub median: f64,
    pub min: f64,
    pub max: f64,
}

impl AggregateStats {
    /// Aggregate a set of cells.
    ///
    /// Cells that do not coerce to a number count toward `cell_count` only.
    pub fn from_cells<'a>(cells: impl IntoIterator<Item = &'a CellValue>) -> Self {
        let mut cell_count = 0;
        let mut numbers = Vec::new();

        for cell in cells {
            cell_count += 1;
            if let Some(n) = cell.coerce_number() {
                numbers.push(n);
            }
        }

        Self {
            cell_count,
            numeric_count: numbers.len(),
            numeric: NumericSummary::from_values(numbers),
        }
    }
}

impl NumericSummary {
    fn from_values(mut values: Vec<f64>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        values.sort_by(|a, b| a.total_cmp(b));

        let n = values.len();
        let sum: f64 = values.iter().sum();
        let median = if n % 2 == 0 {
            (values[n / 2 - 1] + values[n / 2]) / 2.0
        } else {
            values[n / 2]
        };

        Some(Self {
            sum,
            mean: sum / n as f64,
            median,
            min: values[0],
            max: values[n - 1],
        })
    }
}
