//! Comparison engine: key selection and a memoized join of two datasets.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, Row};
use crate::error::{Result, TabwiseError};
use crate::export::ExportTable;

use super::columns::{common_columns, merged_columns, SideLabels};
use super::diff::{diff_row, FieldDiff};
use super::join::{join, ComparisonResult};

/// Configuration for the comparison engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareConfig {
    /// Tag used for left-side columns in merged rows.
    pub left_label: String,
    /// Tag used for right-side columns in merged rows.
    pub right_label: String,
}

impl Default for CompareConfig {
    fn default() -> Self {
        let labels = SideLabels::default();
        Self {
            left_label: labels.left,
            right_label: labels.right,
        }
    }
}

impl CompareConfig {
    pub fn with_labels(mut self, left: impl Into<String>, right: impl Into<String>) -> Self {
        self.left_label = left.into();
        self.right_label = right.into();
        self
    }

    pub fn labels(&self) -> SideLabels {
        SideLabels::new(self.left_label.clone(), self.right_label.clone())
    }

    pub fn validate(&self) -> Result<()> {
        self.labels().validate()
    }
}

/// Row counts for a comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComparisonSummary {
    pub matches: usize,
    pub left_only: usize,
    pub right_only: usize,
    /// Right rows replaced by a later row with the same key.
    pub shadowed_right: usize,
}

/// A finished join of two datasets on one key.
#[derive(Debug, Clone)]
pub struct Comparison {
    key: String,
    labels: SideLabels,
    left_columns: Vec<String>,
    right_columns: Vec<String>,
    merged_columns: Vec<String>,
    result: ComparisonResult,
    shadowed_right: usize,
}

impl Comparison {
    /// Join `left` and `right` on `key`.
    ///
    /// Fails if `key` is not a column of both datasets, or if the labels
    /// are empty or equal.
    pub fn new(left: &Dataset, right: &Dataset, key: &str, labels: SideLabels) -> Result<Self> {
        labels.validate()?;
        if !left.has_column(key) || !right.has_column(key) {
            return Err(TabwiseError::InvalidJoinKey(key.to_string()));
        }

        let output = join(left, right, key, &labels);
        let merged = merged_columns(left.columns(), right.columns(), key, &labels);

        Ok(Self {
            key: key.to_string(),
            left_columns: left.columns().to_vec(),
            right_columns: right.columns().to_vec(),
            merged_columns: merged,
            labels,
            result: output.result,
            shadowed_right: output.shadowed_right,
        })
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn labels(&self) -> &SideLabels {
        &self.labels
    }

    pub fn left_columns(&self) -> &[String] {
        &self.left_columns
    }

    pub fn right_columns(&self) -> &[String] {
        &self.right_columns
    }

    /// Column order for merged rows.
    pub fn merged_columns(&self) -> &[String] {
        &self.merged_columns
    }

    pub fn result(&self) -> &ComparisonResult {
        &self.result
    }

    pub fn matches(&self) -> &[Row] {
        &self.result.matches
    }

    pub fn unique_left(&self) -> &[Row] {
        &self.result.unique_left
    }

    pub fn unique_right(&self) -> &[Row] {
        &self.result.unique_right
    }

    pub fn summary(&self) -> ComparisonSummary {
        ComparisonSummary {
            matches: self.result.matches.len(),
            left_only: self.result.unique_left.len(),
            right_only: self.result.unique_right.len(),
            shadowed_right: self.shadowed_right,
        }
    }

    /// Field diff of any merged row built with this comparison's labels.
    pub fn diff(&self, merged: &Row) -> Vec<FieldDiff> {
        diff_row(
            merged,
            &self.key,
            &self.left_columns,
            &self.right_columns,
            &self.labels,
        )
    }

    /// Field diff of the `position`th matched row.
    pub fn diff_match(&self, position: usize) -> Option<Vec<FieldDiff>> {
        self.result.matches.get(position).map(|row| self.diff(row))
    }

    /// Matched rows as a dataset in merged column order.
    pub fn matches_dataset(&self) -> Dataset {
        Dataset::from_rows(
            "matches",
            self.merged_columns.clone(),
            self.result.matches.clone(),
        )
    }

    /// Left-only rows as a dataset with the left columns.
    pub fn unique_left_dataset(&self) -> Dataset {
        Dataset::from_rows(
            format!("only in {}", self.labels.left),
            self.left_columns.clone(),
            self.result.unique_left.clone(),
        )
    }

    /// Right-only rows as a dataset with the right columns.
    pub fn unique_right_dataset(&self) -> Dataset {
        Dataset::from_rows(
            format!("only in {}", self.labels.right),
            self.right_columns.clone(),
            self.result.unique_right.clone(),
        )
    }

    pub fn matches_table(&self) -> ExportTable {
        ExportTable::new(self.merged_columns.clone(), self.result.matches.clone())
    }

    pub fn unique_left_table(&self) -> ExportTable {
        ExportTable::new(self.left_columns.clone(), self.result.unique_left.clone())
    }

    pub fn unique_right_table(&self) -> ExportTable {
        ExportTable::new(self.right_columns.clone(), self.result.unique_right.clone())
    }
}

struct CacheKey {
    left: Arc<Dataset>,
    right: Arc<Dataset>,
    key: String,
}

/// Holds two datasets and a join key, and recomputes the comparison only
/// when one of them changes.
pub struct ComparisonEngine {
    config: CompareConfig,
    left: Arc<Dataset>,
    right: Arc<Dataset>,
    key: Option<String>,
    cache: Option<(CacheKey, Comparison)>,
}

impl ComparisonEngine {
    /// Create an engine with the default labels.
    ///
    /// The key defaults to the first common column.
    pub fn new(left: Arc<Dataset>, right: Arc<Dataset>) -> Self {
        Self::with_config(left, right, CompareConfig::default())
    }

    pub fn with_config(left: Arc<Dataset>, right: Arc<Dataset>, config: CompareConfig) -> Self {
        let key = common_columns(&left, &right).into_iter().next();
        Self {
            config,
            left,
            right,
            key,
            cache: None,
        }
    }

    pub fn config(&self) -> &CompareConfig {
        &self.config
    }

    pub fn left(&self) -> &Arc<Dataset> {
        &self.left
    }

    pub fn right(&self) -> &Arc<Dataset> {
        &self.right
    }

    /// Columns usable as a join key, in left order.
    pub fn candidate_keys(&self) -> Vec<String> {
        common_columns(&self.left, &self.right)
    }

    /// The current join key, if the datasets share any column.
    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn set_key(&mut self, key: &str) -> Result<()> {
        if !self.left.has_column(key) || !self.right.has_column(key) {
            return Err(TabwiseError::InvalidJoinKey(key.to_string()));
        }
        self.key = Some(key.to_string());
        Ok(())
    }

    pub fn set_left(&mut self, left: Arc<Dataset>) {
        self.left = left;
        self.revalidate_key();
    }

    pub fn set_right(&mut self, right: Arc<Dataset>) {
        self.right = right;
        self.revalidate_key();
    }

    /// Keep the key if it is still shared, otherwise fall back to the
    /// first common column.
    fn revalidate_key(&mut self) {
        let candidates = self.candidate_keys();
        let still_valid = self
            .key
            .as_ref()
            .is_some_and(|k| candidates.iter().any(|c| c == k));
        if !still_valid {
            self.key = candidates.into_iter().next();
        }
    }

    /// The comparison for the current datasets and key.
    ///
    /// Served from cache unless a dataset was replaced or the key changed.
    pub fn comparison(&mut self) -> Result<&Comparison> {
        let Some(key) = self.key.clone() else {
            return Err(TabwiseError::Incomparable {
                left: self.left.metadata().source_name.clone(),
                right: self.right.metadata().source_name.clone(),
            });
        };

        let entry = match self.cache.take() {
            Some((cached, comparison))
                if Arc::ptr_eq(&cached.left, &self.left)
                    && Arc::ptr_eq(&cached.right, &self.right)
                    && cached.key == key =>
            {
                (cached, comparison)
            }
            _ => {
                let comparison =
                    Comparison::new(&self.left, &self.right, &key, self.config.labels())?;
                let cached = CacheKey {
                    left: Arc::clone(&self.left),
                    right: Arc::clone(&self.right),
                    key,
                };
                (cached, comparison)
            }
        };

        Ok(&self.cache.insert(entry).1)
    }
}
