//! FILENAME: selection-engine/src/position.rs
//! Logical/physical position mapping.
//!
//! Physical cell indices are positions in a row as actually laid out;
//! logical columns are positions in the schema. The two differ only on
//! expanded-group member rows, where the grouped column is covered by
//! the lead row's span and emits no cell.

use serde::{Deserialize, Serialize};

use grid_engine::{GridRowKind, GridView};

/// A cell position in logical (row, column) space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellPos {
    pub row: usize,
    pub col: usize,
}

impl CellPos {
    pub fn new(row: usize, col: usize) -> Self {
        CellPos { row, col }
    }
}

/// Maps a physical cell index to its logical column for one row kind.
///
/// Every row kind except `GroupMember` lays out one cell per logical
/// column, so physical equals logical. Member rows omit the grouped
/// column: every physical index at or after its logical position
/// shifts up by one. When the grouped column is one metric among
/// several, the omitted position is that metric's own logical index,
/// so the same shift covers it.
pub fn logical_column(
    physical_cell: usize,
    kind: GridRowKind,
    grouped_col: Option<usize>,
) -> usize {
    match (kind, grouped_col) {
        (GridRowKind::GroupMember, Some(grouped)) if physical_cell >= grouped => physical_cell + 1,
        _ => physical_cell,
    }
}

/// Resolves a physical (row, cell) position in a rendered view to
/// logical coordinates. Positions with no cell behind them resolve to
/// None and selection handling skips them.
pub fn cell_position(
    view: &GridView,
    physical_row: usize,
    physical_cell: usize,
) -> Option<CellPos> {
    let row = view.row(physical_row)?;
    if physical_cell >= row.cells.len() {
        return None;
    }
    let col = logical_column(physical_cell, row.kind, view.group_by);
    Some(CellPos::new(physical_row, col))
}

#[cfg(test)]
mod tests {
    use super::*;
    use grid_engine::{build_view, group_rows, sort_rows, AggregationState, GroupState, SortState};
    use engine::sample::{orders_dataset, quarterly_dataset};
    use engine::Dataset;

    fn expanded_view(dataset: &Dataset, column: &str) -> GridView {
        let sorted = sort_rows(dataset, &SortState::new());
        let col = dataset.schema().index_of(column).unwrap();
        let keys = group_rows(dataset, &sorted, col).into_iter().map(|g| g.label);

        let mut group = GroupState::new();
        group.set_group_by(column, keys);
        // Expand everything.
        let labels: Vec<String> = group_rows(dataset, &sorted, col)
            .into_iter()
            .map(|g| g.label)
            .collect();
        for label in labels {
            group.toggle_collapsed(&label);
        }

        build_view(dataset, &SortState::new(), &group, &AggregationState::new())
    }

    #[test]
    fn identity_mapping_for_flat_and_lead_rows() {
        assert_eq!(logical_column(0, GridRowKind::Data, None), 0);
        assert_eq!(logical_column(2, GridRowKind::GroupHeader, Some(0)), 2);
        assert_eq!(logical_column(1, GridRowKind::GroupLead, Some(0)), 1);
    }

    #[test]
    fn member_rows_shift_past_the_grouped_column() {
        // Grouped by logical column 0: physical 0 is logical 1.
        assert_eq!(logical_column(0, GridRowKind::GroupMember, Some(0)), 1);
        assert_eq!(logical_column(1, GridRowKind::GroupMember, Some(0)), 2);

        // Grouped by logical column 1: physical 0 stays, physical 1 skips.
        assert_eq!(logical_column(0, GridRowKind::GroupMember, Some(1)), 0);
        assert_eq!(logical_column(1, GridRowKind::GroupMember, Some(1)), 2);
    }

    #[test]
    fn member_rows_shift_within_metric_block() {
        // Quarterly schema grouped by q2 (logical 3): member rows lay
        // out [cat, pub, q1, q3, q4].
        for (physical, logical) in [(0, 0), (1, 1), (2, 2), (3, 4), (4, 5)] {
            assert_eq!(
                logical_column(physical, GridRowKind::GroupMember, Some(3)),
                logical
            );
        }
    }

    #[test]
    fn mapping_agrees_with_view_descriptors() {
        let quarterly = quarterly_dataset();
        let orders = orders_dataset();
        for view in [
            expanded_view(&orders, "category"),
            expanded_view(&orders, "publisher"),
            expanded_view(&orders, "orders"),
            expanded_view(&quarterly, "q2_2024"),
        ] {
            for (ri, row) in view.rows.iter().enumerate() {
                for (ci, cell) in row.cells.iter().enumerate() {
                    let pos = cell_position(&view, ri, ci).unwrap();
                    assert_eq!(pos.col, cell.logical_col);
                }
            }
        }
    }

    #[test]
    fn out_of_range_positions_resolve_to_none() {
        let data = orders_dataset();
        let view = expanded_view(&data, "category");
        assert!(cell_position(&view, 0, 99).is_none());
        assert!(cell_position(&view, 99, 0).is_none());
        // Member rows are one cell short; their last physical slot is 1.
        assert!(cell_position(&view, 1, 2).is_none());
    }
}
