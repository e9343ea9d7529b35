//! Hash equi-join of two datasets on a key column.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Row};

use super::columns::{Side, SideLabels};

/// The three row buckets produced by a join.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    /// Merged rows for keys found on both sides.
    pub matches: Vec<Row>,
    /// Left rows whose key has no partner on the right.
    pub unique_left: Vec<Row>,
    /// Right rows whose key was never matched.
    pub unique_right: Vec<Row>,
}

impl ComparisonResult {
    /// True when all three buckets are empty.
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty() && self.unique_left.is_empty() && self.unique_right.is_empty()
    }
}

/// Output of [`join`].
#[derive(Debug, Clone)]
pub(crate) struct JoinOutput {
    pub result: ComparisonResult,
    /// Right rows hidden behind a later row with the same key.
    pub shadowed_right: usize,
}

/// Join `left` to `right` on `key`.
///
/// Keys are compared by canonical text, so the number 7 and the text "7"
/// match. Only one right row is kept per key (the last one); this is a
/// left join with the unmatched right rows computed as a set difference on
/// key text, not a multi-match join.
pub(crate) fn join(left: &Dataset, right: &Dataset, key: &str, labels: &SideLabels) -> JoinOutput {
    let mut index: HashMap<String, usize> = HashMap::with_capacity(right.row_count());
    let mut shadowed_right = 0;
    for (pos, r) in right.rows().iter().enumerate() {
        if index.insert(r.row.get(key).to_text(), pos).is_some() {
            shadowed_right += 1;
        }
    }

    let mut result = ComparisonResult::default();
    let mut consumed: HashSet<String> = HashSet::new();

    for l in left.rows() {
        let key_text = l.row.get(key).to_text();
        match index.get(&key_text) {
            Some(&pos) => {
                let partner = &right.rows()[pos].row;
                result.matches.push(merge_rows(&l.row, partner, key, labels));
                consumed.insert(key_text);
            }
            None => result.unique_left.push(l.row.clone()),
        }
    }

    result.unique_right = right
        .rows()
        .iter()
        .filter(|r| !consumed.contains(&r.row.get(key).to_text()))
        .map(|r| r.row.clone())
        .collect();

    tracing::debug!(
        key,
        matches = result.matches.len(),
        unique_left = result.unique_left.len(),
        unique_right = result.unique_right.len(),
        shadowed_right,
        "joined datasets"
    );

    JoinOutput {
        result,
        shadowed_right,
    }
}

/// Build a merged row: the key once, unqualified, then every other column
/// of each side under its side label.
fn merge_rows(left: &Row, right: &Row, key: &str, labels: &SideLabels) -> Row {
    let mut merged = Row::new();
    merged.set(key, left.get(key).clone());

    for (col, value) in left.iter().filter(|(c, _)| *c != key) {
        merged.set(labels.qualify(Side::Left, col), value.clone());
    }
    for (col, value) in right.iter().filter(|(c, _)| *c != key) {
        merged.set(labels.qualify(Side::Right, col), value.clone());
    }

    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellValue;

    fn dataset(name: &str, columns: &[&str], rows: Vec<Row>) -> Dataset {
        Dataset::from_rows(name, columns.iter().map(|s| s.to_string()).collect(), rows)
    }

    #[test]
    fn test_basic_join() {
        let left = dataset(
            "left",
            &["id", "x"],
            vec![
                Row::new().with("id", 1.0).with("x", "a"),
                Row::new().with("id", 2.0).with("x", "b"),
            ],
        );
        let right = dataset(
            "right",
            &["id", "x"],
            vec![
                Row::new().with("id", 1.0).with("x", "b"),
                Row::new().with("id", 3.0).with("x", "c"),
            ],
        );

        let out = join(&left, &right, "id", &SideLabels::default());
        assert_eq!(out.result.matches.len(), 1);
        assert_eq!(out.result.unique_left.len(), 1);
        assert_eq!(out.result.unique_right.len(), 1);

        let merged = &out.result.matches[0];
        assert_eq!(merged.get("id"), &CellValue::Number(1.0));
        assert_eq!(merged.get("(File 1) x"), &CellValue::from("a"));
        assert_eq!(merged.get("(File 2) x"), &CellValue::from("b"));
        assert!(!merged.contains("x"));
    }

    #[test]
    fn test_number_matches_text_key() {
        let left = dataset("l", &["id"], vec![Row::new().with("id", 7.0)]);
        let right = dataset("r", &["id"], vec![Row::new().with("id", "7")]);
        let out = join(&left, &right, "id", &SideLabels::default());
        assert_eq!(out.result.matches.len(), 1);
        assert!(out.result.unique_right.is_empty());
    }

    #[test]
    fn test_duplicate_right_keys_last_wins() {
        let left = dataset("l", &["id"], vec![Row::new().with("id", "k")]);
        let right = dataset(
            "r",
            &["id", "v"],
            vec![
                Row::new().with("id", "k").with("v", "first"),
                Row::new().with("id", "k").with("v", "second"),
            ],
        );
        let out = join(&left, &right, "id", &SideLabels::default());
        assert_eq!(out.result.matches[0].get("(File 2) v"), &CellValue::from("second"));
        assert_eq!(out.shadowed_right, 1);
        // Both share the consumed key, so neither is unique
        assert!(out.result.unique_right.is_empty());
    }

    #[test]
    fn test_many_left_rows_share_one_partner() {
        let left = dataset(
            "l",
            &["id"],
            vec![Row::new().with("id", 1.0), Row::new().with("id", 1.0)],
        );
        let right = dataset("r", &["id"], vec![Row::new().with("id", 1.0)]);
        let out = join(&left, &right, "id", &SideLabels::default());
        assert_eq!(out.result.matches.len(), 2);
        assert!(out.result.unique_left.is_empty());
    }
}
