//! FILENAME: selection-engine/src/copy.rs
//! Clipboard text serialization for a selection.
//!
//! Cells serialize ordered by (logical row, logical column), one line
//! per row, tab-separated within a line. Disclosure glyphs are
//! stripped, and numeric cells lose their thousands separators so the
//! output pastes cleanly into other tools.

use engine::Schema;
use grid_engine::{GridView, CHEVRON_COLLAPSED, CHEVRON_EXPANDED};

use crate::selection::SelectedCell;

/// Serializes the selected cells as tab/newline-delimited text.
pub fn copy_text(view: &GridView, cells: &[SelectedCell]) -> String {
    let ordered = ordered(cells);
    let mut lines: Vec<String> = Vec::new();
    let mut current_row: Option<usize> = None;
    let mut fields: Vec<String> = Vec::new();

    for cell in &ordered {
        if current_row != Some(cell.row) {
            if current_row.is_some() {
                lines.push(fields.join("\t"));
                fields.clear();
            }
            current_row = Some(cell.row);
        }
        fields.push(cell_text(view, cell));
    }
    if current_row.is_some() {
        lines.push(fields.join("\t"));
    }

    lines.join("\n")
}

/// Serializes the selected cells with a header line prepended.
///
/// The header covers the selected logical column span; every data row
/// emits one field per column in that span, empty where the row has no
/// cell, so the output stays rectangular.
pub fn copy_text_with_headers(view: &GridView, schema: &Schema, cells: &[SelectedCell]) -> String {
    if cells.is_empty() {
        return String::new();
    }

    let ordered = ordered(cells);
    let min_col = ordered.iter().map(|c| c.logical_col).min().unwrap_or(0);
    let max_col = ordered.iter().map(|c| c.logical_col).max().unwrap_or(0);

    let mut header: Vec<&str> = Vec::new();
    for col in min_col..=max_col.min(schema.len().saturating_sub(1)) {
        if let Some(column) = schema.column(col) {
            header.push(column.label.as_str());
        }
    }

    let mut lines = vec![header.join("\t")];
    let mut index = 0;
    while index < ordered.len() {
        let row = ordered[index].row;
        let mut fields: Vec<String> = Vec::new();
        for col in min_col..=max_col {
            let found = ordered[index..]
                .iter()
                .take_while(|c| c.row == row)
                .find(|c| c.logical_col == col);
            match found {
                Some(cell) => fields.push(cell_text(view, cell)),
                None => fields.push(String::new()),
            }
        }
        while index < ordered.len() && ordered[index].row == row {
            index += 1;
        }
        lines.push(fields.join("\t"));
    }

    lines.join("\n")
}

fn ordered(cells: &[SelectedCell]) -> Vec<SelectedCell> {
    let mut ordered = cells.to_vec();
    ordered.sort_by_key(|c| (c.row, c.logical_col));
    ordered
}

/// Clean text for one cell: disclosure glyphs dropped, and thousands
/// separators stripped from numeric cells.
fn cell_text(view: &GridView, cell: &SelectedCell) -> String {
    let grid_cell = match view.cell(cell.row, cell.physical_cell) {
        Some(c) => c,
        None => return String::new(),
    };

    let mut text: String = grid_cell
        .text
        .chars()
        .filter(|&c| c != CHEVRON_COLLAPSED && c != CHEVRON_EXPANDED)
        .collect();
    if grid_cell.numeric {
        text.retain(|c| c != ',');
    }
    text.trim().to_string()
}
