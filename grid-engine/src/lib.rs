//! FILENAME: grid-engine/src/lib.rs
//! Grid state-and-render engine.
//!
//! This crate owns the deterministic pipeline from raw rows to the
//! ordered row plan a renderer consumes. It depends on `engine` only
//! for shared types (CellValue, Schema, Dataset).
//!
//! Layers:
//! - `definition`: Serializable state (what the grid IS showing)
//! - `engine`: Sorting, grouping, aggregation (HOW we compute)
//! - `view`: Renderable row plan (WHAT we display)

pub mod definition;
pub mod engine;
pub mod view;

pub use definition::*;
pub use self::engine::*;
pub use view::*;
