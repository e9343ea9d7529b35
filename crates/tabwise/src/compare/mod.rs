//! Reconciliation of two datasets on a shared key column.
//!
//! A [`ComparisonEngine`] joins a left and a right dataset and sorts rows
//! into three buckets: merged matches, left-only rows and right-only rows.
//! Merged rows keep the key unqualified and tag every other column with
//! the side it came from, and [`Comparison::diff`] breaks one of them down
//! field by field.

mod columns;
mod diff;
mod engine;
mod join;

pub use columns::{common_columns, merged_columns, Side, SideLabels};
pub use diff::{diff_row, FieldDiff, FieldStatus};
pub use engine::{CompareConfig, Comparison, ComparisonEngine, ComparisonSummary};
pub use join::ComparisonResult;
