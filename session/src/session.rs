//! FILENAME: session/src/session.rs
//! The grid session controller.
//!
//! One `GridSession` owns the dataset, the full interaction state, and
//! the current row plan. Every user interaction arrives as a
//! `GridEvent`; applying one mutates the state, persists what must
//! persist, and rebuilds the plan when row structure changed. The
//! original implementation kept all of this in module-level mutable
//! variables; here the state is explicit so the core is testable
//! without a live render target.

use engine::Dataset;
use grid_engine::{
    build_view, group_rows, sort_rows, AggregateFunction, AggregationScope, AggregationState,
    GridView, GroupState, SortState, TextWrapState,
};
use selection_engine::{cell_position, copy_text, copy_text_with_headers, CellPos, SelectionState};

use crate::clipboard::{write_with_fallback, Clipboard, CopyFeedback};
use crate::error::SessionError;
use crate::menu::{header_menu, HeaderMenu};
use crate::prefs::{
    load_aggregation_states, load_wrap_states, save_aggregation_states, save_wrap_states,
    PreferenceStore,
};
use crate::render::RenderTarget;

/// The complete interaction state of one grid session.
#[derive(Debug, Default)]
pub struct GridState {
    pub sort: SortState,
    pub group: GroupState,
    pub aggregation: AggregationState,
    pub text_wrap: TextWrapState,
    pub selection: SelectionState,
}

/// One user interaction, as delivered by the host's event layer.
#[derive(Debug, Clone)]
pub enum GridEvent {
    /// Column-header primary click: cycle asc, desc, none.
    SortClick { column: String },

    /// Column-header modified click: chain the column.
    SortChainClick { column: String },

    /// Group by a column. Every group starts collapsed.
    GroupBy { column: String },

    Ungroup,

    /// Toggle one group's collapse state.
    ToggleGroup { key: String },

    /// Pick or clear an aggregation for a column and scope.
    SetAggregation {
        column: String,
        scope: AggregationScope,
        function: Option<AggregateFunction>,
    },

    /// Toggle text wrapping for a column.
    ToggleWrap { column: String, wrapped: bool },

    /// Pointer pressed on a cell, by physical position.
    PointerDown { row: usize, cell: usize },

    /// Pointer moved during a drag.
    PointerMove { row: usize, cell: usize },

    PointerUp,

    /// Click outside the grid: clears the selection unless dragging.
    OutsideClick,

    /// Copy the current selection.
    Copy { with_headers: bool },
}

/// The controller owning one grid's state and row plan.
pub struct GridSession<S: PreferenceStore> {
    dataset: Dataset,
    state: GridState,
    view: GridView,
    prefs: S,
    clipboard: Box<dyn Clipboard>,
    clipboard_fallback: Box<dyn Clipboard>,
}

impl<S: PreferenceStore> GridSession<S> {
    /// Creates a session, loading persisted preferences. Load failures
    /// fall back to empty state rather than propagating.
    pub fn new(
        dataset: Dataset,
        prefs: S,
        clipboard: Box<dyn Clipboard>,
        clipboard_fallback: Box<dyn Clipboard>,
    ) -> Self {
        let state = GridState {
            text_wrap: load_wrap_states(&prefs),
            aggregation: load_aggregation_states(&prefs),
            ..GridState::default()
        };

        let view = build_view(&dataset, &state.sort, &state.group, &state.aggregation);

        GridSession {
            dataset,
            state,
            view,
            prefs,
            clipboard,
            clipboard_fallback,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &GridState {
        &self.state
    }

    /// The current row plan. Rebuilt by every event that changes row
    /// structure; the renderer consumes it verbatim.
    pub fn view(&self) -> &GridView {
        &self.view
    }

    /// Applies one interaction. Copy events yield feedback when a
    /// clipboard writer accepted the text.
    pub fn apply(&mut self, event: GridEvent) -> Result<Option<CopyFeedback>, SessionError> {
        match event {
            GridEvent::SortClick { column } => {
                self.require_column(&column)?;
                self.state.sort.toggle_primary(&column);
                self.rebuild();
            }
            GridEvent::SortChainClick { column } => {
                self.require_column(&column)?;
                self.state.sort.toggle_additive(&column);
                self.rebuild();
            }
            GridEvent::GroupBy { column } => {
                self.require_column(&column)?;
                let keys = self.group_labels(&column);
                self.state.group.set_group_by(column, keys);
                self.rebuild();
            }
            GridEvent::Ungroup => {
                self.state.group.clear();
                self.rebuild();
            }
            GridEvent::ToggleGroup { key } => {
                // Only keys of currently-existing groups may enter the
                // collapsed set.
                let grouped = self.state.group.group_by().map(|c| c.to_string());
                if let Some(column) = grouped {
                    if self.group_labels(&column).iter().any(|k| *k == key) {
                        self.state.group.toggle_collapsed(&key);
                        self.rebuild();
                    }
                }
            }
            GridEvent::SetAggregation {
                column,
                scope,
                function,
            } => {
                self.require_column(&column)?;
                let schema = self.dataset.schema();
                if self.state.aggregation.apply(schema, &column, scope, function) {
                    save_aggregation_states(&mut self.prefs, &self.state.aggregation);
                    self.rebuild();
                }
            }
            GridEvent::ToggleWrap { column, wrapped } => {
                self.require_column(&column)?;
                let schema = self.dataset.schema();
                self.state.text_wrap.apply(schema, &column, wrapped);
                save_wrap_states(&mut self.prefs, &self.state.text_wrap);
                // Wrapping never changes row structure; the plan and the
                // selection both survive.
            }
            GridEvent::PointerDown { row, cell } => {
                self.state.selection.clear();
                if let Some(pos) = cell_position(&self.view, row, cell) {
                    self.state.selection.begin(pos);
                }
            }
            GridEvent::PointerMove { row, cell } => {
                if let Some(pos) = cell_position(&self.view, row, cell) {
                    self.state.selection.update(&self.view, pos);
                }
            }
            GridEvent::PointerUp => {
                self.state.selection.finish();
            }
            GridEvent::OutsideClick => {
                if !self.state.selection.is_dragging() {
                    self.state.selection.clear();
                }
            }
            GridEvent::Copy { with_headers } => {
                return Ok(self.copy_selection(with_headers));
            }
        }

        Ok(None)
    }

    /// Paints the current plan on a render target. A target failure
    /// aborts the pass; a partial paint is never acceptable.
    pub fn render(&self, target: &mut dyn RenderTarget) -> Result<(), SessionError> {
        target.paint(&self.view).map_err(SessionError::Render)
    }

    /// Header menu model for one column, or None for unknown columns.
    pub fn header_menu(&self, column: &str) -> Option<HeaderMenu> {
        header_menu(
            self.dataset.schema(),
            column,
            &self.state.group,
            &self.state.text_wrap,
            &self.state.aggregation,
        )
    }

    /// Logical position of a physical cell in the current plan.
    pub fn cell_position(&self, row: usize, cell: usize) -> Option<CellPos> {
        cell_position(&self.view, row, cell)
    }

    fn copy_selection(&mut self, with_headers: bool) -> Option<CopyFeedback> {
        let cells = self.state.selection.selected_cells(&self.view);
        if cells.is_empty() {
            return None;
        }

        let text = if with_headers {
            copy_text_with_headers(&self.view, self.dataset.schema(), &cells)
        } else {
            copy_text(&self.view, &cells)
        };

        if write_with_fallback(
            self.clipboard.as_mut(),
            self.clipboard_fallback.as_mut(),
            &text,
        ) {
            Some(CopyFeedback {
                cells: cells.len(),
                with_headers,
            })
        } else {
            None
        }
    }

    /// Group key labels for a column under the current sort order.
    fn group_labels(&self, column: &str) -> Vec<String> {
        let col = match self.dataset.schema().index_of(column) {
            Some(c) => c,
            None => return Vec::new(),
        };
        let sorted = sort_rows(&self.dataset, &self.state.sort);
        group_rows(&self.dataset, &sorted, col)
            .into_iter()
            .map(|g| g.label)
            .collect()
    }

    fn require_column(&self, column: &str) -> Result<usize, SessionError> {
        self.dataset
            .schema()
            .index_of(column)
            .ok_or_else(|| SessionError::UnknownColumn(column.to_string()))
    }

    /// Recomputes the row plan and drops the selection, exactly as a
    /// full re-render does.
    fn rebuild(&mut self) {
        self.view = build_view(
            &self.dataset,
            &self.state.sort,
            &self.state.group,
            &self.state.aggregation,
        );
        self.state.selection.clear();
    }
}
