//! The view engine: search, sort, pagination, selection, editing, and
//! aggregate statistics over one dataset.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::dataset::{Dataset, IndexedRow, Row};
use crate::error::{Result, TabwiseError};
use crate::export::ExportTable;

use super::edit::EditState;
use super::filter::filter_positions;
use super::pagination::ViewLayout;
use super::selection::{GridPoint, Selection, SelectionRect};
use super::sort::{sort_positions, SortSpec};
use super::stats::AggregateStats;

/// Configuration for a view engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewConfig {
    /// Paginated or full-height presentation.
    pub layout: ViewLayout,
    /// Whether cells may be edited and rows added or deleted.
    pub editable: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            layout: ViewLayout::default(),
            editable: true,
        }
    }
}

impl ViewConfig {
    /// Paginate with `page_size` rows per page.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.layout = ViewLayout::Paginated { page_size };
        self
    }

    /// Show every visible row at once.
    pub fn full(mut self) -> Self {
        self.layout = ViewLayout::Full;
        self
    }

    /// Allow or forbid editing.
    pub fn with_editable(mut self, editable: bool) -> Self {
        self.editable = editable;
        self
    }

    /// Check the configuration for values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        if let ViewLayout::Paginated { page_size: 0 } = self.layout {
            return Err(TabwiseError::Config(
                "page size must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Inputs the visible sequence was last derived from.
#[derive(Debug, Clone)]
struct DerivedFrom {
    dataset: Arc<Dataset>,
    search: String,
    sort: Option<SortSpec>,
}

/// Interactive view over one dataset.
///
/// Derives the visible sequence (filtered, then sorted) and the displayed
/// sequence (the current page, or everything in the full layout). The
/// visible sequence is only recomputed when the dataset pointer, search
/// term, or sort spec changes. Selection coordinates refer to positions in
/// the displayed sequence; edits and row operations refer to original
/// indices.
#[derive(Debug)]
pub struct ViewEngine {
    config: ViewConfig,
    dataset: Arc<Dataset>,
    search: String,
    sort: Option<SortSpec>,
    page: usize,
    /// Storage positions into `dataset.rows()`, in visible order.
    visible: Vec<usize>,
    derived_from: Option<DerivedFrom>,
    selection: Selection,
    edit: Option<EditState>,
}

impl ViewEngine {
    /// Create a view with default configuration.
    pub fn new(dataset: Arc<Dataset>) -> Self {
        Self::with_config(dataset, ViewConfig::default())
    }

    /// Create a view with custom configuration.
    pub fn with_config(dataset: Arc<Dataset>, config: ViewConfig) -> Self {
        let mut engine = Self {
            config,
            dataset,
            search: String::new(),
            sort: None,
            page: 1,
            visible: Vec::new(),
            derived_from: None,
            selection: Selection::new(),
            edit: None,
        };
        engine.refresh();
        engine
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    // =========================================================================
    // Dataset
    // =========================================================================

    /// The current dataset snapshot.
    pub fn dataset(&self) -> &Arc<Dataset> {
        &self.dataset
    }

    /// Column order for display.
    pub fn columns(&self) -> &[String] {
        self.dataset.columns()
    }

    /// Swap in a new dataset snapshot.
    ///
    /// Selection is cleared when its rows no longer hold the same original
    /// rows, or when it no longer fits the grid.
    /// An open edit whose row no longer exists is dropped.
    pub fn replace_dataset(&mut self, dataset: Arc<Dataset>) {
        if Arc::ptr_eq(&self.dataset, &dataset) {
            return;
        }
        let before = self.selected_indices();
        self.dataset = dataset;
        self.refresh();
        self.page = self.config.layout.clamp_page(self.page, self.visible.len());
        if self.selected_indices() != before {
            self.selection.clear();
        }
        self.invalidate_stale();
    }

    // =========================================================================
    // Search and sort
    // =========================================================================

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Set the search term. A changed term returns to page 1.
    pub fn set_search(&mut self, term: impl Into<String>) {
        let term = term.into();
        if term == self.search {
            return;
        }
        self.search = term;
        self.page = 1;
        self.refresh();
        self.selection.clear();
    }

    pub fn sort(&self) -> Option<&SortSpec> {
        self.sort.as_ref()
    }

    /// Set or clear the sort spec.
    pub fn set_sort(&mut self, sort: Option<SortSpec>) {
        if sort == self.sort {
            return;
        }
        self.sort = sort;
        self.refresh();
        self.selection.clear();
    }

    /// Column header clicked: same key flips direction, new key sorts
    /// ascending.
    pub fn toggle_sort(&mut self, key: &str) {
        let next = SortSpec::toggled(self.sort.as_ref(), key);
        self.set_sort(Some(next));
    }

    // =========================================================================
    // Visible and displayed sequences
    // =========================================================================

    /// Number of rows passing the search.
    pub fn visible_count(&self) -> usize {
        self.visible.len()
    }

    /// Filtered and sorted rows, across all pages.
    pub fn visible_rows(&self) -> impl Iterator<Item = &IndexedRow> + '_ {
        let rows = self.dataset.rows();
        self.visible.iter().map(move |&pos| &rows[pos])
    }

    /// Rows on the current page (or all visible rows in the full layout).
    pub fn displayed_rows(&self) -> impl Iterator<Item = &IndexedRow> + '_ {
        let rows = self.dataset.rows();
        let range = self.displayed_range();
        self.visible[range].iter().map(move |&pos| &rows[pos])
    }

    /// Number of displayed rows.
    pub fn displayed_count(&self) -> usize {
        self.displayed_range().len()
    }

    /// The displayed row at `position`.
    pub fn displayed_row(&self, position: usize) -> Option<&IndexedRow> {
        let range = self.displayed_range();
        self.visible[range]
            .get(position)
            .map(|&pos| &self.dataset.rows()[pos])
    }

    fn displayed_range(&self) -> std::ops::Range<usize> {
        self.config.layout.page_range(self.page, self.visible.len())
    }

    // =========================================================================
    // Pagination
    // =========================================================================

    /// Current page, 1-based.
    pub fn page(&self) -> usize {
        self.page
    }

    /// Number of pages; at least 1.
    pub fn page_count(&self) -> usize {
        self.config.layout.page_count(self.visible.len())
    }

    /// Go to `page`, clamped into range.
    pub fn set_page(&mut self, page: usize) {
        let page = self.config.layout.clamp_page(page, self.visible.len());
        if page != self.page {
            self.page = page;
            self.selection.clear();
        }
    }

    pub fn next_page(&mut self) {
        self.set_page(self.page + 1);
    }

    pub fn prev_page(&mut self) {
        self.set_page(self.page.saturating_sub(1));
    }

    // =========================================================================
    // Selection
    // =========================================================================

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Pointer pressed on a displayed cell. Ignored while editing.
    pub fn pointer_down(&mut self, point: GridPoint, extend: bool) {
        if self.edit.is_none() {
            self.selection.pointer_down(point, extend);
        }
    }

    /// Pointer moved over a displayed cell.
    pub fn pointer_enter(&mut self, point: GridPoint) {
        if self.edit.is_none() {
            self.selection.pointer_enter(point);
        }
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.selection.pointer_up();
    }

    /// Row gutter clicked.
    pub fn select_row(&mut self, row: usize, extend: bool) {
        if self.edit.is_none() {
            self.selection.select_row(row, extend);
        }
    }

    /// Column header affordance clicked.
    pub fn select_column(&mut self, col: usize) {
        if self.edit.is_none() {
            let count = self.displayed_count();
            self.selection.select_column(col, count);
        }
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// The normalized selection rectangle.
    pub fn selection_rect(&self) -> Option<SelectionRect> {
        self.selection.rect(self.dataset.column_count())
    }

    /// Whether the displayed cell at (`row`, `col`) is selected.
    pub fn is_selected(&self, row: usize, col: usize) -> bool {
        self.selection
            .is_selected(row, col, self.dataset.column_count())
    }

    /// Statistics over the selected cells, read through the displayed rows.
    ///
    /// `None` when nothing is selected. Parts of the rectangle outside the
    /// displayed grid contribute no cells.
    pub fn stats(&self) -> Option<AggregateStats> {
        let rect = self.selection_rect()?;
        let columns = self.dataset.columns();

        let cells = rect
            .rows()
            .filter_map(|r| self.displayed_row(r))
            .flat_map(move |ir| {
                rect.cols()
                    .filter_map(move |c| columns.get(c))
                    .map(move |col| ir.row.get(col))
            });

        let stats = AggregateStats::from_cells(cells);
        if stats.cell_count == 0 {
            return None;
        }
        Some(stats)
    }

    // =========================================================================
    // Editing
    // =========================================================================

    /// The open edit, if any.
    pub fn edit_state(&self) -> Option<&EditState> {
        self.edit.as_ref()
    }

    /// Open the editor on a cell, staging its current text.
    ///
    /// Refused when the view is read-only, another edit is open, or the
    /// cell does not exist. Clears the selection.
    pub fn begin_edit(&mut self, original_index: usize, column: &str) -> bool {
        if !self.config.editable || self.edit.is_some() {
            return false;
        }
        let Some(value) = self.dataset.cell(original_index, column) else {
            return false;
        };

        self.edit = Some(EditState::new(original_index, column, value.to_text()));
        self.selection.clear();
        true
    }

    /// Open the editor on a displayed cell by grid coordinates.
    pub fn begin_edit_at(&mut self, row: usize, col: usize) -> bool {
        let Some(original_index) = self.displayed_row(row).map(|r| r.index) else {
            return false;
        };
        let Some(column) = self.dataset.columns().get(col).cloned() else {
            return false;
        };
        self.begin_edit(original_index, &column)
    }

    /// Replace the staged text of the open edit.
    pub fn stage_edit(&mut self, text: impl Into<String>) {
        if let Some(edit) = self.edit.as_mut() {
            edit.staged = text.into();
        }
    }

    /// Commit the open edit into a new dataset snapshot.
    ///
    /// Returns `true` when a new snapshot was produced.
    pub fn commit_edit(&mut self) -> bool {
        let Some(edit) = self.edit.take() else {
            return false;
        };
        let value = edit.committed_value();

        match self.dataset.with_cell(edit.original_index, &edit.column, value) {
            Some(next) => {
                tracing::debug!(
                    row = edit.original_index,
                    column = %edit.column,
                    "committed cell edit"
                );
                self.replace_dataset(Arc::new(next));
                true
            }
            None => false,
        }
    }

    /// Close the editor without changing anything.
    pub fn cancel_edit(&mut self) {
        self.edit = None;
    }

    // =========================================================================
    // Row lifecycle
    // =========================================================================

    /// Append an empty row; returns its original index.
    pub fn add_row(&mut self) -> Option<usize> {
        if !self.config.editable {
            return None;
        }
        let (next, index) = self.dataset.with_appended_row(Row::new());
        tracing::debug!(row = index, "added row");
        self.replace_dataset(Arc::new(next));
        Some(index)
    }

    /// Delete the row with the given original index.
    ///
    /// A missing index is a no-op and returns `false`.
    pub fn delete_row(&mut self, original_index: usize) -> bool {
        if !self.config.editable {
            return false;
        }
        let Some(next) = self.dataset.without_row(original_index) else {
            return false;
        };
        tracing::debug!(row = original_index, "deleted row");
        self.replace_dataset(Arc::new(next));
        true
    }

    // =========================================================================
    // Export
    // =========================================================================

    /// Displayed rows in display column order.
    pub fn export_table(&self) -> ExportTable {
        ExportTable::new(
            self.dataset.columns().to_vec(),
            self.displayed_rows().map(|r| r.row.clone()).collect(),
        )
    }

    /// All visible rows (every page) in display column order.
    pub fn export_visible(&self) -> ExportTable {
        ExportTable::new(
            self.dataset.columns().to_vec(),
            self.visible_rows().map(|r| r.row.clone()).collect(),
        )
    }

    // =========================================================================
    // Derivation
    // =========================================================================

    /// Recompute the visible sequence if its inputs changed.
    fn refresh(&mut self) {
        let fresh = self.derived_from.as_ref().is_some_and(|d| {
            Arc::ptr_eq(&d.dataset, &self.dataset) && d.search == self.search && d.sort == self.sort
        });
        if fresh {
            return;
        }

        let rows = self.dataset.rows();
        let mut visible = filter_positions(rows, self.dataset.columns(), &self.search);
        if let Some(spec) = &self.sort {
            sort_positions(rows, &mut visible, spec);
        }

        tracing::debug!(
            source = %self.dataset.metadata().source_name,
            visible = visible.len(),
            total = rows.len(),
            "recomputed visible rows"
        );

        self.visible = visible;
        self.derived_from = Some(DerivedFrom {
            dataset: Arc::clone(&self.dataset),
            search: self.search.clone(),
            sort: self.sort.clone(),
        });
    }

    /// Original indices of the displayed rows the selection covers.
    fn selected_indices(&self) -> Vec<usize> {
        let Some(rect) = self.selection_rect() else {
            return Vec::new();
        };
        rect.rows()
            .filter_map(|r| self.displayed_row(r))
            .map(|r| r.index)
            .collect()
    }

    /// Drop selection and edit state that point past the current bounds.
    fn invalidate_stale(&mut self) {
        let rows = self.displayed_count();
        let cols = self.dataset.column_count();
        if let Some(rect) = self.selection.rect(cols) {
            if !rect.fits(rows, cols) {
                self.selection.clear();
            }
        } else if cols == 0 {
            self.selection.clear();
        }

        let edit_gone = self
            .edit
            .as_ref()
            .is_some_and(|e| self.dataset.cell(e.original_index, &e.column).is_none());
        if edit_gone {
            self.edit = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::CellValue;

    fn people() -> Arc<Dataset> {
        let rows = vec![
            Row::new().with("name", "Carol").with("age", 41.0).with("city", "Austin"),
            Row::new().with("name", "alice").with("age", 30.0).with("city", "Boston"),
            Row::new().with("name", "Bob").with("city", "Austin"),
            Row::new().with("name", "Dave").with("age", 25.0).with("city", "Denver"),
        ];
        Arc::new(Dataset::from_rows(
            "people.csv",
            vec!["name".to_string(), "age".to_string(), "city".to_string()],
            rows,
        ))
    }

    fn names(view: &ViewEngine) -> Vec<String> {
        view.displayed_rows()
            .map(|r| r.row.get("name").to_text())
            .collect()
    }

    #[test]
    fn test_search_then_sort() {
        let mut view = ViewEngine::with_config(people(), ViewConfig::default().full());
        view.set_search("AUSTIN");
        assert_eq!(names(&view), vec!["Carol", "Bob"]);

        view.toggle_sort("name");
        assert_eq!(names(&view), vec!["Bob", "Carol"]);

        view.set_search("");
        assert_eq!(names(&view), vec!["alice", "Bob", "Carol", "Dave"]);
    }

    #[test]
    fn test_sort_toggle_and_absent_last() {
        let mut view = ViewEngine::new(people());
        view.toggle_sort("age");
        assert_eq!(names(&view), vec!["Dave", "alice", "Carol", "Bob"]);
        view.toggle_sort("age");
        assert_eq!(view.sort(), Some(&SortSpec::descending("age")));
        assert_eq!(names(&view), vec!["Carol", "alice", "Dave", "Bob"]);
    }

    #[test]
    fn test_memoized_on_identity() {
        let ds = people();
        let mut view = ViewEngine::new(Arc::clone(&ds));
        view.set_search("a");
        let before = view.visible.clone();
        view.replace_dataset(Arc::clone(&ds));
        assert_eq!(view.visible, before);
    }

    #[test]
    fn test_pagination_resets_on_search() {
        let mut view = ViewEngine::with_config(people(), ViewConfig::default().with_page_size(2));
        assert_eq!(view.page_count(), 2);
        view.next_page();
        assert_eq!(view.page(), 2);
        assert_eq!(names(&view), vec!["Bob", "Dave"]);

        view.set_search("o");
        assert_eq!(view.page(), 1);

        view.set_search("zzz");
        assert_eq!(view.page_count(), 1);
        assert_eq!(view.displayed_count(), 0);
    }

    #[test]
    fn test_stats_follow_displayed_order() {
        let mut view = ViewEngine::with_config(people(), ViewConfig::default().full());
        view.toggle_sort("age");
        // Column 1 (age), displayed rows 0..=1 → Dave (25), alice (30)
        view.pointer_down(GridPoint::cell(0, 1), false);
        view.pointer_enter(GridPoint::cell(1, 1));
        view.pointer_up();

        let stats = view.stats().unwrap();
        assert_eq!(stats.cell_count, 2);
        assert_eq!(stats.numeric.unwrap().sum, 55.0);
    }

    #[test]
    fn test_no_stats_without_selection() {
        let view = ViewEngine::new(people());
        assert!(view.stats().is_none());
    }

    #[test]
    fn test_edit_commit_replaces_dataset() {
        let original = people();
        let mut view = ViewEngine::new(Arc::clone(&original));
        view.select_row(0, false);

        assert!(view.begin_edit(2, "age"));
        assert!(view.selection().is_empty());
        assert_eq!(view.edit_state().unwrap().staged, "");
        assert!(!view.begin_edit(1, "age"));

        view.stage_edit("12.0");
        assert!(view.commit_edit());
        assert!(view.edit_state().is_none());
        assert!(!Arc::ptr_eq(view.dataset(), &original));
        assert_eq!(view.dataset().cell(2, "age"), Some(&CellValue::Number(12.0)));
        assert!(original.cell(2, "age").unwrap().is_absent());
    }

    #[test]
    fn test_edit_cancel_and_text_fallback() {
        let mut view = ViewEngine::new(people());
        assert!(view.begin_edit(0, "age"));
        view.stage_edit("99");
        view.cancel_edit();
        assert_eq!(view.dataset().cell(0, "age"), Some(&CellValue::Number(41.0)));

        assert!(view.begin_edit(0, "age"));
        view.stage_edit("12.");
        view.commit_edit();
        assert_eq!(view.dataset().cell(0, "age"), Some(&CellValue::from("12.")));
    }

    #[test]
    fn test_read_only_refuses_edits() {
        let mut view = ViewEngine::with_config(people(), ViewConfig::default().with_editable(false));
        assert!(!view.begin_edit(0, "name"));
        assert!(view.add_row().is_none());
        assert!(!view.delete_row(0));
    }

    #[test]
    fn test_delete_invalidates_stale_state() {
        let mut view = ViewEngine::with_config(people(), ViewConfig::default().full());
        view.select_row(3, false);
        assert!(view.delete_row(0));
        assert!(view.selection().is_empty());

        assert!(view.begin_edit(1, "name"));
        view.delete_row(1);
        assert!(view.edit_state().is_none());

        assert!(!view.delete_row(42));
        let indices: Vec<usize> = view.visible_rows().map(|r| r.index).collect();
        assert_eq!(indices, vec![2, 3]);
    }

    #[test]
    fn test_delete_inside_selection_clears_it() {
        let rows = vec![
            Row::new().with("v", 100.0),
            Row::new().with("v", 1.0),
            Row::new().with("v", 2.0),
        ];
        let dataset = Arc::new(Dataset::from_rows("v.csv", vec!["v".to_string()], rows));
        let mut view = ViewEngine::with_config(dataset, ViewConfig::default().full());

        view.pointer_down(GridPoint::cell(0, 0), false);
        view.pointer_up();
        assert_eq!(view.stats().unwrap().numeric.unwrap().sum, 100.0);

        assert!(view.delete_row(0));
        assert!(view.selection().is_empty());
        assert!(view.stats().is_none());
    }

    #[test]
    fn test_row_changes_keep_selection_on_same_rows() {
        let mut view = ViewEngine::with_config(people(), ViewConfig::default().full());
        view.select_row(1, false);
        view.add_row().unwrap();
        assert!(!view.selection().is_empty());

        // Deleting a row below the selection leaves it on the same row.
        assert!(view.delete_row(3));
        assert!(!view.selection().is_empty());
        assert_eq!(view.displayed_row(1).unwrap().index, 1);

        // Deleting a row above it shifts different data under the selection.
        assert!(view.delete_row(0));
        assert!(view.selection().is_empty());
    }

    #[test]
    fn test_add_row() {
        let mut view = ViewEngine::with_config(people(), ViewConfig::default().full());
        let index = view.add_row().unwrap();
        assert_eq!(index, 4);
        assert_eq!(view.visible_count(), 5);
        assert_eq!(view.dataset().metadata().row_count, 5);
    }

    #[test]
    fn test_begin_edit_at_maps_through_sort() {
        let mut view = ViewEngine::new(people());
        view.toggle_sort("name");
        assert!(view.begin_edit_at(0, 0));
        assert_eq!(view.edit_state().unwrap().original_index, 1);
    }

    #[test]
    fn test_config_validation() {
        assert!(ViewConfig::default().validate().is_ok());
        assert!(ViewConfig::default().with_page_size(0).validate().is_err());
    }
}
