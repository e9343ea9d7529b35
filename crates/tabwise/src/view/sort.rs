//! Sort specification and the row comparator.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::dataset::{CellValue, IndexedRow};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

/// Which column to sort by, and in which direction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortSpec {
    pub key: String,
    pub direction: SortDirection,
}

impl SortSpec {
    pub fn ascending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            direction: SortDirection::Descending,
        }
    }

    /// The spec produced by clicking `key` while `current` is active.
    ///
    /// Clicking the active key flips its direction; any other key starts
    /// ascending.
    pub fn toggled(current: Option<&SortSpec>, key: &str) -> SortSpec {
        match current {
            Some(spec) if spec.key == key => SortSpec {
                key: spec.key.clone(),
                direction: spec.direction.flipped(),
            },
            _ => SortSpec::ascending(key),
        }
    }
}

/// Compare two cells for sorting.
///
/// Absent cells always order after present ones, whatever the direction;
/// this check happens before the direction is applied. Two numbers compare
/// numerically, two texts by case-insensitive canonical text, and numbers
/// order before text.
pub fn compare_cells(a: &CellValue, b: &CellValue, direction: SortDirection) -> Ordering {
    match (a.is_absent(), b.is_absent()) {
        (true, true) => Ordering::Equal,
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (false, false) => {
            let ord = a.cmp_present(b);
            match direction {
                SortDirection::Ascending => ord,
                SortDirection::Descending => ord.reverse(),
            }
        }
    }
}

/// Stable-sort row positions by `spec`.
pub(crate) fn sort_positions(rows: &[IndexedRow], positions: &mut [usize], spec: &SortSpec) {
    positions.sort_by(|&a, &b| {
        compare_cells(
            rows[a].row.get(&spec.key),
            rows[b].row.get(&spec.key),
            spec.direction,
        )
    });
}
