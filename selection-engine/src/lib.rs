//! FILENAME: selection-engine/src/lib.rs
//! Rectangular cell selection over a rendered grid view.
//!
//! The selection rectangle lives in logical (row, column) space, but
//! the grid's physical layout diverges from it whenever a group is
//! expanded: the grouped column renders once per group and spans all
//! of its rows, so member rows are one cell short. This crate owns
//! the mapping between the two spaces, the drag state, and the
//! clipboard text serialization.
//!
//! Layers:
//! - `position`: logical/physical coordinate mapping
//! - `selection`: drag anchor/focus state and rectangle resolution
//! - `copy`: tab/newline clipboard text, with or without headers

pub mod copy;
pub mod position;
pub mod selection;

pub use copy::{copy_text, copy_text_with_headers};
pub use position::{cell_position, logical_column, CellPos};
pub use selection::{SelectedCell, SelectionRect, SelectionState};
