//! Field-by-field diff of one merged row.

use serde::{Deserialize, Serialize};

use crate::dataset::{CellValue, Row};

use super::columns::{Side, SideLabels};

/// Whether the two sides of a field agree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FieldStatus {
    Match,
    Mismatch,
}

/// Comparison of a single field across both datasets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldDiff {
    /// Unqualified column name.
    pub column: String,
    pub left: CellValue,
    pub right: CellValue,
    pub status: FieldStatus,
    /// `right - left` for numeric mismatches.
    pub delta: Option<f64>,
}

impl FieldDiff {
    pub fn is_mismatch(&self) -> bool {
        self.status == FieldStatus::Mismatch
    }
}

/// Classify a pair of values.
fn classify(left: &CellValue, right: &CellValue) -> (FieldStatus, Option<f64>) {
    match (left, right) {
        (CellValue::Absent, CellValue::Absent) => (FieldStatus::Match, None),
        (CellValue::Absent, _) | (_, CellValue::Absent) => (FieldStatus::Mismatch, None),
        (CellValue::Number(a), CellValue::Number(b)) => {
            if a == b {
                (FieldStatus::Match, None)
            } else {
                (FieldStatus::Mismatch, Some(b - a))
            }
        }
        _ if left.to_text() == right.to_text() => (FieldStatus::Match, None),
        _ => (FieldStatus::Mismatch, None),
    }
}

/// Diff a merged row.
///
/// The key is reported first as a match. Every other column in the union
/// of both column lists (left order, then right-only columns) is read back
/// from its side-qualified name. Mismatches are moved ahead of matches,
/// keeping column order within each group.
pub fn diff_row(
    merged: &Row,
    key: &str,
    left_columns: &[String],
    right_columns: &[String],
    labels: &SideLabels,
) -> Vec<FieldDiff> {
    let key_value = merged.get(key).clone();
    let mut fields = vec![FieldDiff {
        column: key.to_string(),
        left: key_value.clone(),
        right: key_value,
        status: FieldStatus::Match,
        delta: None,
    }];

    let union = left_columns.iter().chain(
        right_columns
            .iter()
            .filter(|c| !left_columns.contains(*c)),
    );

    for col in union.filter(|c| *c != key) {
        let left = merged.get(&labels.qualify(Side::Left, col)).clone();
        let right = merged.get(&labels.qualify(Side::Right, col)).clone();
        let (status, delta) = classify(&left, &right);
        fields.push(FieldDiff {
            column: col.clone(),
            left,
            right,
            status,
            delta,
        });
    }

    // sort_by_key is stable
    fields.sort_by_key(|f| f.status == FieldStatus::Match);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn merged() -> Row {
        Row::new()
            .with("id", 1.0)
            .with("(File 1) x", "a")
            .with("(File 2) x", "b")
            .with("(File 1) n", 10.0)
            .with("(File 2) n", 12.5)
            .with("(File 1) same", "v")
            .with("(File 2) same", "v")
            .with("(File 1) only_left", "here")
    }

    #[test]
    fn test_text_mismatch_has_no_delta() {
        let diffs = diff_row(
            &merged(),
            "id",
            &names(&["id", "x"]),
            &names(&["id", "x"]),
            &SideLabels::default(),
        );
        let x = diffs.iter().find(|d| d.column == "x").unwrap();
        assert_eq!(x.status, FieldStatus::Mismatch);
        assert_eq!(x.delta, None);
    }

    #[test]
    fn test_numeric_delta() {
        let diffs = diff_row(
            &merged(),
            "id",
            &names(&["id", "n"]),
            &names(&["id", "n"]),
            &SideLabels::default(),
        );
        let n = diffs.iter().find(|d| d.column == "n").unwrap();
        assert_eq!(n.delta, Some(2.5));
    }

    #[test]
    fn test_mismatches_first_then_column_order() {
        let diffs = diff_row(
            &merged(),
            "id",
            &names(&["id", "same", "x", "only_left", "n"]),
            &names(&["id", "same", "x", "n", "only_right"]),
            &SideLabels::default(),
        );
        let order: Vec<&str> = diffs.iter().map(|d| d.column.as_str()).collect();
        assert_eq!(order, vec!["x", "only_left", "n", "id", "same", "only_right"]);

        let only_right = diffs.iter().find(|d| d.column == "only_right").unwrap();
        assert_eq!(only_right.status, FieldStatus::Match);
    }

    #[test]
    fn test_number_against_numeric_text() {
        let (status, delta) = classify(&CellValue::Number(7.0), &CellValue::from("7"));
        assert_eq!(status, FieldStatus::Match);
        assert_eq!(delta, None);
    }
}
