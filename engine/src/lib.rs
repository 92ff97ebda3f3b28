//! FILENAME: engine/src/lib.rs
//! PURPOSE: Main library entry point for the shared grid data model.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod dataset;
pub mod number_format;
pub mod sample;
pub mod schema;
pub mod value;

// Re-export commonly used types at the crate root
pub use dataset::{Dataset, Row};
pub use number_format::format_number;
pub use schema::{Column, ColumnKind, Schema};
pub use value::CellValue;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_builds_a_dataset() {
        let data = sample::orders_dataset();
        assert_eq!(
            data.value(0, 0),
            Some(&CellValue::Text("Books".to_string()))
        );
        assert_eq!(data.value(0, 2), Some(&CellValue::Number(8234.0)));
    }

    #[test]
    fn it_formats_numeric_cells() {
        let data = sample::orders_dataset();
        let orders = data.value(0, 2).and_then(|v| v.as_number());
        assert_eq!(orders.map(format_number).as_deref(), Some("8,234"));
    }
}
