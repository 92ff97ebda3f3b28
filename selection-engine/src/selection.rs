//! FILENAME: selection-engine/src/selection.rs
//! Drag-rectangle selection state.
//!
//! The anchor is fixed where the drag starts; the focus follows the
//! pointer. The selected set is the closed rectangle between them in
//! logical space, resolved against the rendered view by scanning every
//! physical cell in the affected rows and testing its logical column.

use serde::{Deserialize, Serialize};

use grid_engine::GridView;

use crate::position::CellPos;

/// Rectangular selection bounds in logical space (inclusive).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub min_row: usize,
    pub max_row: usize,
    pub min_col: usize,
    pub max_col: usize,
}

impl SelectionRect {
    pub fn contains(&self, row: usize, col: usize) -> bool {
        row >= self.min_row && row <= self.max_row && col >= self.min_col && col <= self.max_col
    }
}

/// One selected cell, addressed both physically and logically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedCell {
    /// Physical (and logical) row index.
    pub row: usize,

    /// Physical cell index within the row.
    pub physical_cell: usize,

    /// The cell's logical column.
    pub logical_col: usize,
}

/// Anchor/focus drag state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionState {
    anchor: Option<CellPos>,
    focus: Option<CellPos>,
    dragging: bool,
}

impl SelectionState {
    pub fn new() -> Self {
        SelectionState::default()
    }

    pub fn is_empty(&self) -> bool {
        self.anchor.is_none()
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Starts a new drag. Any previous selection is discarded and the
    /// anchor fixed at the given position.
    pub fn begin(&mut self, pos: CellPos) {
        self.anchor = Some(pos);
        self.focus = Some(pos);
        self.dragging = true;
    }

    /// Moves the focus during a drag, clipped to the view's bounds.
    /// Ignored when no drag is active.
    pub fn update(&mut self, view: &GridView, pos: CellPos) {
        if !self.dragging || view.row_count() == 0 || view.column_count == 0 {
            return;
        }
        let row = pos.row.min(view.row_count() - 1);
        let col = pos.col.min(view.column_count - 1);
        self.focus = Some(CellPos::new(row, col));
    }

    /// Ends the drag, keeping the selection.
    pub fn finish(&mut self) {
        self.dragging = false;
    }

    /// Drops the selection entirely (outside click, re-render).
    pub fn clear(&mut self) {
        self.anchor = None;
        self.focus = None;
        self.dragging = false;
    }

    /// The rectangle between anchor and focus, or None when empty.
    pub fn rect(&self) -> Option<SelectionRect> {
        match (self.anchor, self.focus) {
            (Some(anchor), Some(focus)) => Some(SelectionRect {
                min_row: anchor.row.min(focus.row),
                max_row: anchor.row.max(focus.row),
                min_col: anchor.col.min(focus.col),
                max_col: anchor.col.max(focus.col),
            }),
            _ => None,
        }
    }

    /// Resolves the selected cells against the rendered view.
    ///
    /// Scans every physical cell in the affected row range; a cell is
    /// selected when its logical column falls inside the rectangle.
    /// Physically adjacent cells outside it stay unselected, and rows
    /// past the end of the view contribute nothing.
    pub fn selected_cells(&self, view: &GridView) -> Vec<SelectedCell> {
        let rect = match self.rect() {
            Some(rect) => rect,
            None => return Vec::new(),
        };

        let mut selected = Vec::new();
        for row in rect.min_row..=rect.max_row.min(view.row_count().saturating_sub(1)) {
            let descriptor = match view.row(row) {
                Some(d) => d,
                None => break,
            };
            for (physical_cell, cell) in descriptor.cells.iter().enumerate() {
                if cell.logical_col >= rect.min_col && cell.logical_col <= rect.max_col {
                    selected.push(SelectedCell {
                        row,
                        physical_cell,
                        logical_col: cell.logical_col,
                    });
                }
            }
        }
        selected
    }
}
