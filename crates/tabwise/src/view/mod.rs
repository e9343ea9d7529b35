//! Interactive grid view over a single dataset.

mod edit;
mod engine;
mod filter;
mod pagination;
mod selection;
mod sort;
mod stats;

pub use edit::EditState;
pub use engine::{ViewConfig, ViewEngine};
pub use pagination::ViewLayout;
pub use selection::{GridColumn, GridPoint, Selection, SelectionRange, SelectionRect};
pub use sort::{compare_cells, SortDirection, SortSpec};
pub use stats::{AggregateStats, NumericSummary};
