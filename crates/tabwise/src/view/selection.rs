//! Rectangular cell selection driven by pointer events.

use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

/// Column coordinate of a grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GridColumn {
    /// A single column, by display position.
    Cell(usize),
    /// Every column of the row (the row-index gutter).
    WholeRow,
}

/// A point on the displayed grid.
///
/// `row` is a position in the displayed sequence, not an original index, so
/// points go stale whenever that sequence changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridPoint {
    pub row: usize,
    pub col: GridColumn,
}

impl GridPoint {
    pub fn cell(row: usize, col: usize) -> Self {
        Self {
            row,
            col: GridColumn::Cell(col),
        }
    }

    pub fn whole_row(row: usize) -> Self {
        Self {
            row,
            col: GridColumn::WholeRow,
        }
    }
}

/// Two corners of a selection, in the order they were picked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRange {
    pub start: GridPoint,
    pub end: GridPoint,
}

impl SelectionRange {
    /// Normalize to a closed rectangle.
    ///
    /// A whole-row corner widens the column span to every column. Returns
    /// `None` when the grid has no columns.
    pub fn normalize(&self, column_count: usize) -> Option<SelectionRect> {
        if column_count == 0 {
            return None;
        }

        let (left, right) = match (self.start.col, self.end.col) {
            (GridColumn::Cell(a), GridColumn::Cell(b)) => (a.min(b), a.max(b)),
            _ => (0, column_count - 1),
        };

        Some(SelectionRect {
            top: self.start.row.min(self.end.row),
            bottom: self.start.row.max(self.end.row),
            left,
            right,
        })
    }
}

/// A normalized selection rectangle with inclusive bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub top: usize,
    pub bottom: usize,
    pub left: usize,
    pub right: usize,
}

impl SelectionRect {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        self.rows().contains(&row) && self.cols().contains(&col)
    }

    pub fn rows(&self) -> RangeInclusive<usize> {
        self.top..=self.bottom
    }

    pub fn cols(&self) -> RangeInclusive<usize> {
        self.left..=self.right
    }

    /// Whether the rectangle lies inside a grid of the given size.
    pub fn fits(&self, row_count: usize, column_count: usize) -> bool {
        self.bottom < row_count && self.right < column_count
    }
}

/// Selection state for one grid.
///
/// `dragging` is set by pointer-down and cleared by pointer-up anywhere;
/// while it is set, pointer-enter moves the end corner.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    range: Option<SelectionRange>,
    dragging: bool,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pointer pressed on a cell.
    ///
    /// Starts a fresh 1x1 selection, or with `extend` (a held modifier)
    /// moves the end corner of the existing selection.
    pub fn pointer_down(&mut self, point: GridPoint, extend: bool) {
        self.range = match self.range {
            Some(range) if extend => Some(SelectionRange {
                start: range.start,
                end: point,
            }),
            _ => Some(SelectionRange {
                start: point,
                end: point,
            }),
        };
        self.dragging = true;
    }

    /// Pointer moved over a cell.
    pub fn pointer_enter(&mut self, point: GridPoint) {
        if !self.dragging {
            return;
        }
        if let Some(range) = self.range.as_mut() {
            range.end = point;
        }
    }

    /// Pointer released anywhere.
    pub fn pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Row-index gutter clicked.
    pub fn select_row(&mut self, row: usize, extend: bool) {
        self.pointer_down(GridPoint::whole_row(row), extend);
    }

    /// Column header affordance clicked: every displayed row of `col`.
    pub fn select_column(&mut self, col: usize, row_count: usize) {
        self.dragging = false;
        if row_count == 0 {
            self.range = None;
            return;
        }
        self.range = Some(SelectionRange {
            start: GridPoint::cell(0, col),
            end: GridPoint::cell(row_count - 1, col),
        });
    }

    pub fn clear(&mut self) {
        self.range = None;
        self.dragging = false;
    }

    pub fn range(&self) -> Option<&SelectionRange> {
        self.range.as_ref()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_empty(&self) -> bool {
        self.range.is_none()
    }

    /// The normalized rectangle, if anything is selected.
    pub fn rect(&self, column_count: usize) -> Option<SelectionRect> {
        self.range.and_then(|r| r.normalize(column_count))
    }

    /// Whether the cell at (`row`, `col`) is inside the selection.
    pub fn is_selected(&self, row: usize, col: usize, column_count: usize) -> bool {
        self.rect(column_count)
            .is_some_and(|rect| rect.contains(row, col))
    }
}
