//! Single-cell edit state.

use serde::{Deserialize, Serialize};

use crate::dataset::CellValue;

/// The cell currently open in the editor and its staged text.
///
/// Keyed by original index, so the edit survives any re-ordering of the
/// displayed rows while it is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditState {
    pub original_index: usize,
    pub column: String,
    pub staged: String,
}

impl EditState {
    pub fn new(original_index: usize, column: impl Into<String>, staged: impl Into<String>) -> Self {
        Self {
            original_index,
            column: column.into(),
            staged: staged.into(),
        }
    }

    /// The value a commit would store.
    pub fn committed_value(&self) -> CellValue {
        CellValue::from_edit(&self.staged)
    }
}
