//! FILENAME: grid-engine/src/view.rs
//! Grid View - the ordered row plan the renderer consumes verbatim.
//!
//! This module transforms the dataset plus the current state into a
//! flat list of row descriptors. Each cell carries its logical column
//! index and row span explicitly, so the renderer and the selection
//! layer never re-derive structure from physical layout:
//! - collapsed groups render as a single header row
//! - expanded groups merge the grouped column across the group via a
//!   row span on the lead row; member rows omit that column entirely
//! - aggregation rows appear per group and/or for the whole table

use serde::{Deserialize, Serialize};

use engine::{format_number, CellValue, Dataset, Schema};

use crate::definition::{AggregateFunction, AggregationScope, AggregationState, GroupState, SortState};
use crate::engine::{group_rows, sort_rows, AggregateAccumulator, RowGroup};

/// Disclosure glyph on a collapsed group label.
pub const CHEVRON_COLLAPSED: char = '▸';

/// Disclosure glyph on an expanded group label.
pub const CHEVRON_EXPANDED: char = '▾';

// ============================================================================
// CELL AND ROW DESCRIPTORS
// ============================================================================

/// The type of a cell in the grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridCellKind {
    /// Plain value cell.
    Data,
    /// Group label cell carrying the disclosure control.
    GroupLabel,
    /// Aggregate value cell.
    Aggregate,
    /// Structurally present but empty.
    Blank,
}

/// A single cell in the grid view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridCell {
    /// Display text exactly as painted, including the disclosure glyph
    /// on group labels and thousands separators on numbers. The copy
    /// path strips both.
    pub text: String,

    /// The logical column this cell belongs to.
    pub logical_col: usize,

    /// Whether the cell renders as numeric.
    pub numeric: bool,

    /// Number of physical rows this cell spans (group label cells span
    /// their whole group).
    pub row_span: usize,

    pub kind: GridCellKind,
}

impl GridCell {
    pub fn data(text: String, logical_col: usize, numeric: bool) -> Self {
        GridCell {
            text,
            logical_col,
            numeric,
            row_span: 1,
            kind: GridCellKind::Data,
        }
    }

    pub fn aggregate(text: String, logical_col: usize, numeric: bool) -> Self {
        GridCell {
            text,
            logical_col,
            numeric,
            row_span: 1,
            kind: GridCellKind::Aggregate,
        }
    }

    pub fn blank(logical_col: usize) -> Self {
        GridCell {
            text: String::new(),
            logical_col,
            numeric: false,
            row_span: 1,
            kind: GridCellKind::Blank,
        }
    }

    pub fn group_label(text: String, logical_col: usize, numeric: bool, row_span: usize) -> Self {
        GridCell {
            text,
            logical_col,
            numeric,
            row_span,
            kind: GridCellKind::GroupLabel,
        }
    }
}

/// The type of a row in the grid view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridRowKind {
    /// Flat data row.
    Data,
    /// Collapsed group header: key, item count, inline group aggregates.
    GroupHeader,
    /// First row of an expanded group; its group label cell spans the
    /// whole group.
    GroupLead,
    /// Subsequent row of an expanded group; the grouped column is
    /// covered by the lead row's span and physically absent here.
    GroupMember,
    /// Per-group aggregation row, after an expanded group's rows.
    GroupTotal,
    /// Whole-table aggregation row, last.
    TableTotal,
}

/// One physical row of the view plus its metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridRow {
    pub kind: GridRowKind,

    /// Physical cells, in paint order. For `GroupMember` rows the
    /// grouped column has no cell here.
    pub cells: Vec<GridCell>,

    /// Group key label for group-scoped rows.
    pub group_key: Option<String>,

    /// Number of items in the group, for collapsed headers.
    pub item_count: Option<usize>,

    /// Source dataset row index, for rows backed by a single record.
    pub source_row: Option<usize>,
}

// ============================================================================
// MAIN VIEW STRUCT
// ============================================================================

/// The complete row plan for one render pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GridView {
    pub rows: Vec<GridRow>,

    /// Logical column count (schema length).
    pub column_count: usize,

    /// Logical index of the grouped column, when grouping is active.
    pub group_by: Option<usize>,
}

impl GridView {
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&GridRow> {
        self.rows.get(index)
    }

    /// Gets a cell by physical position.
    pub fn cell(&self, row: usize, physical_cell: usize) -> Option<&GridCell> {
        self.rows.get(row).and_then(|r| r.cells.get(physical_cell))
    }
}

// ============================================================================
// ROW PLAN BUILDER
// ============================================================================

/// Builds the ordered row plan from the dataset and the current state.
///
/// This is the single point of truth for the renderer and must be
/// recomputed after every state mutation that affects row structure
/// (sorting, grouping, collapse, aggregation). Wrap toggles do not.
pub fn build_view(
    dataset: &Dataset,
    sort: &SortState,
    group: &GroupState,
    aggregation: &AggregationState,
) -> GridView {
    let schema = dataset.schema();
    let sorted = sort_rows(dataset, sort);
    let group_col = group.group_by().and_then(|name| schema.index_of(name));

    let mut view = GridView {
        rows: Vec::new(),
        column_count: schema.len(),
        group_by: group_col,
    };

    match group_col {
        None => {
            for &row in &sorted {
                view.rows.push(data_row(dataset, row));
            }
        }
        Some(grouped_col) => {
            let groups = group_rows(dataset, &sorted, grouped_col);
            let with_group_totals = aggregation.has_any(AggregationScope::Group);

            for g in &groups {
                if group.is_collapsed(&g.label) {
                    view.rows.push(group_header_row(dataset, g, grouped_col, aggregation));
                } else {
                    for (i, &row) in g.rows.iter().enumerate() {
                        if i == 0 {
                            view.rows.push(group_lead_row(dataset, g, grouped_col, row));
                        } else {
                            view.rows.push(group_member_row(dataset, grouped_col, row));
                        }
                    }
                    if with_group_totals {
                        view.rows.push(group_total_row(dataset, g, aggregation));
                    }
                }
            }
        }
    }

    // The table aggregation row covers the full sorted dataset
    // regardless of grouping or collapse state.
    if aggregation.has_any(AggregationScope::Table) {
        view.rows.push(table_total_row(dataset, &sorted, aggregation));
    }

    view
}

fn cell_text(value: &CellValue) -> String {
    match value.as_number() {
        Some(n) => format_number(n),
        None => value.display_value(),
    }
}

/// Formats an aggregate the way its column displays it: average gets
/// one decimal place on numeric columns, everything else renders as a
/// grouped integer.
fn aggregate_text(schema: &Schema, col: usize, value: f64, function: Option<AggregateFunction>) -> String {
    if schema.is_numeric(col) {
        crate::engine::format_aggregate(value, function)
    } else {
        crate::engine::format_aggregate(value, None)
    }
}

fn data_row(dataset: &Dataset, row: usize) -> GridRow {
    let schema = dataset.schema();
    let cells = (0..schema.len())
        .map(|col| {
            let text = dataset.value(row, col).map(cell_text).unwrap_or_default();
            GridCell::data(text, col, schema.is_numeric(col))
        })
        .collect();

    GridRow {
        kind: GridRowKind::Data,
        cells,
        group_key: None,
        item_count: None,
        source_row: Some(row),
    }
}

/// Collapsed group header: the grouped column carries the key and the
/// disclosure glyph; numeric columns with a group-scope aggregation
/// show the group value inline, everything else stays blank.
fn group_header_row(
    dataset: &Dataset,
    group: &RowGroup,
    grouped_col: usize,
    aggregation: &AggregationState,
) -> GridRow {
    let schema = dataset.schema();
    let mut cells = Vec::with_capacity(schema.len());

    for col in 0..schema.len() {
        if col == grouped_col {
            let label = match group.key.as_number() {
                Some(n) => format_number(n),
                None => group.label.clone(),
            };
            let text = format!(
                "{} {} ({} items)",
                CHEVRON_COLLAPSED,
                label,
                group.rows.len()
            );
            cells.push(GridCell::group_label(text, col, schema.is_numeric(col), 1));
        } else {
            match group_aggregate_cell(dataset, group, col, aggregation) {
                Some(cell) => cells.push(cell),
                None => cells.push(GridCell::blank(col)),
            }
        }
    }

    GridRow {
        kind: GridRowKind::GroupHeader,
        cells,
        group_key: Some(group.label.clone()),
        item_count: Some(group.rows.len()),
        source_row: None,
    }
}

/// First row of an expanded group. The grouped column's cell spans the
/// whole group; the remaining cells show the first item's values.
fn group_lead_row(dataset: &Dataset, group: &RowGroup, grouped_col: usize, row: usize) -> GridRow {
    let schema = dataset.schema();
    let mut cells = Vec::with_capacity(schema.len());

    for col in 0..schema.len() {
        if col == grouped_col {
            let label = match group.key.as_number() {
                Some(n) => format_number(n),
                None => group.label.clone(),
            };
            let text = format!("{} {}", CHEVRON_EXPANDED, label);
            cells.push(GridCell::group_label(
                text,
                col,
                schema.is_numeric(col),
                group.rows.len(),
            ));
        } else {
            let text = dataset.value(row, col).map(cell_text).unwrap_or_default();
            cells.push(GridCell::data(text, col, schema.is_numeric(col)));
        }
    }

    GridRow {
        kind: GridRowKind::GroupLead,
        cells,
        group_key: Some(group.label.clone()),
        item_count: Some(group.rows.len()),
        source_row: Some(row),
    }
}

/// Subsequent row of an expanded group. The grouped column is covered
/// by the lead row's span, so no cell is emitted for it; the remaining
/// cells keep their logical column indices.
fn group_member_row(dataset: &Dataset, grouped_col: usize, row: usize) -> GridRow {
    let schema = dataset.schema();
    let mut cells = Vec::with_capacity(schema.len().saturating_sub(1));

    for col in 0..schema.len() {
        if col == grouped_col {
            continue;
        }
        let text = dataset.value(row, col).map(cell_text).unwrap_or_default();
        cells.push(GridCell::data(text, col, schema.is_numeric(col)));
    }

    GridRow {
        kind: GridRowKind::GroupMember,
        cells,
        group_key: None,
        item_count: None,
        source_row: Some(row),
    }
}

/// Per-group aggregation row. Numeric columns with a group-scope
/// choice show the group value (the grouped column included); other
/// columns stay blank.
fn group_total_row(dataset: &Dataset, group: &RowGroup, aggregation: &AggregationState) -> GridRow {
    let schema = dataset.schema();
    let cells = (0..schema.len())
        .map(|col| match group_aggregate_cell(dataset, group, col, aggregation) {
            Some(cell) => cell,
            None => GridCell::blank(col),
        })
        .collect();

    GridRow {
        kind: GridRowKind::GroupTotal,
        cells,
        group_key: Some(group.label.clone()),
        item_count: None,
        source_row: None,
    }
}

/// Whole-table aggregation row over the full sorted dataset.
fn table_total_row(dataset: &Dataset, sorted: &[usize], aggregation: &AggregationState) -> GridRow {
    let schema = dataset.schema();
    let mut cells = Vec::with_capacity(schema.len());

    for col in 0..schema.len() {
        let name = match schema.column(col) {
            Some(c) => c.name.as_str(),
            None => continue,
        };
        match aggregation.setting(name, AggregationScope::Table) {
            Some(setting) => {
                let value = aggregate_over(dataset, sorted.iter().copied(), col, &setting.function);
                let text = aggregate_text(schema, col, value, setting.resolve());
                cells.push(GridCell::aggregate(text, col, schema.is_numeric(col)));
            }
            None => cells.push(GridCell::blank(col)),
        }
    }

    GridRow {
        kind: GridRowKind::TableTotal,
        cells,
        group_key: None,
        item_count: None,
        source_row: None,
    }
}

/// Builds the aggregate cell for one column of a group, if that column
/// is numeric and has a group-scope choice.
fn group_aggregate_cell(
    dataset: &Dataset,
    group: &RowGroup,
    col: usize,
    aggregation: &AggregationState,
) -> Option<GridCell> {
    let schema = dataset.schema();
    if !schema.is_numeric(col) {
        return None;
    }
    let name = schema.column(col).map(|c| c.name.as_str())?;
    let setting = aggregation.setting(name, AggregationScope::Group)?;

    let value = aggregate_over(dataset, group.rows.iter().copied(), col, &setting.function);
    let text = aggregate_text(schema, col, value, setting.resolve());
    Some(GridCell::aggregate(text, col, true))
}

fn aggregate_over(
    dataset: &Dataset,
    rows: impl Iterator<Item = usize>,
    col: usize,
    function: &str,
) -> f64 {
    let mut acc = AggregateAccumulator::new();
    for row in rows {
        match dataset.value(row, col) {
            Some(value) => acc.add(value),
            None => acc.add_non_number(),
        }
    }
    match AggregateFunction::from_name(function) {
        Some(f) => acc.compute(f),
        None => 0.0,
    }
}
