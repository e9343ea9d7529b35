//! Case-insensitive substring search over all columns.

use crate::dataset::IndexedRow;

/// Positions of the rows that match `term`, in storage order.
///
/// A row matches when any of `columns` contains the term in its canonical
/// text, ignoring case. An empty term keeps every row.
pub(crate) fn filter_positions(rows: &[IndexedRow], columns: &[String], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return (0..rows.len()).collect();
    }

    let needle = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, r)| columns.iter().any(|c| r.row.get(c).contains_lowercase(&needle)))
        .map(|(pos, _)| pos)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Row;

    fn rows() -> Vec<IndexedRow> {
        vec![
            IndexedRow::new(0, Row::new().with("name", "Alice").with("age", 30.0)),
            IndexedRow::new(1, Row::new().with("name", "Bob").with("age", 25.0)),
            IndexedRow::new(2, Row::new().with("name", "Carol")),
        ]
    }

    fn cols() -> Vec<String> {
        vec!["name".to_string(), "age".to_string()]
    }

    #[test]
    fn test_empty_term_keeps_all() {
        assert_eq!(filter_positions(&rows(), &cols(), ""), vec![0, 1, 2]);
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(filter_positions(&rows(), &cols(), "ALI"), vec![0]);
        assert_eq!(filter_positions(&rows(), &cols(), "o"), vec![1, 2]);
    }

    #[test]
    fn test_numbers_match_on_canonical_text() {
        assert_eq!(filter_positions(&rows(), &cols(), "25"), vec![1]);
    }

    #[test]
    fn test_only_listed_columns_searched() {
        let only_age = vec!["age".to_string()];
        assert!(filter_positions(&rows(), &only_age, "bob").is_empty());
    }
}
