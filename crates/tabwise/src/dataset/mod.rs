//! Core data model: cell values, rows, and dataset snapshots.

mod metadata;
mod row;
mod table;
mod value;

pub use metadata::DatasetMetadata;
pub use row::{IndexedRow, Row};
pub use table::Dataset;
pub use value::CellValue;
