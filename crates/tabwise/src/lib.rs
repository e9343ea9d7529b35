//! Tabwise: in-memory view and comparison engine for tabular datasets.
//!
//! Tabwise loads delimited text into immutable [`Dataset`] snapshots and
//! offers two engines on top of them:
//!
//! - **View engine**: search, sort, pagination, rectangular selection with
//!   live statistics, single-cell editing, and row add/delete.
//! - **Comparison engine**: joins two datasets on a shared key column and
//!   splits rows into matches, left-only and right-only sets, with a
//!   field-by-field diff for each match.
//!
//! # Core Principles
//!
//! - **Stable identity**: every row keeps its original index through
//!   filtering, sorting, editing, and deletion
//! - **Snapshots**: edits produce a new dataset; readers never see a
//!   half-applied change
//! - **Forgiving data**: bad cells degrade to text or are skipped, never
//!   an error
//!
//! # Example
//!
//! ```no_run
//! use tabwise::Tabwise;
//!
//! let tabwise = Tabwise::new();
//! let dataset = tabwise.load("samples.csv").unwrap();
//!
//! let mut view = tabwise.view(dataset);
//! view.set_search("control");
//! view.toggle_sort("age");
//! println!("Visible rows: {}", view.visible_count());
//! ```

pub mod compare;
pub mod config;
pub mod dataset;
pub mod error;
pub mod export;
pub mod input;
pub mod view;

mod tabwise;

pub use crate::tabwise::Tabwise;
pub use compare::{
    CompareConfig, Comparison, ComparisonEngine, ComparisonResult, FieldDiff, FieldStatus,
};
pub use config::TabwiseConfig;
pub use dataset::{CellValue, Dataset, DatasetMetadata, IndexedRow, Row};
pub use error::{Result, TabwiseError};
pub use export::{ExportFormat, ExportTable};
pub use input::{Parser, ParserConfig};
pub use view::{AggregateStats, SortDirection, SortSpec, ViewConfig, ViewEngine, ViewLayout};
