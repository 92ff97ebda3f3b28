//! FILENAME: engine/src/sample.rs
//! Built-in sample datasets.
//!
//! Two dataset shapes ship with the crate: a three-column orders table
//! (one numeric column) and a six-column quarterly table (four
//! homogeneous metric columns). The downstream crates use them in tests
//! and demos; nothing in the engines is specific to either shape.

use crate::dataset::Dataset;
use crate::schema::{Column, Schema};
use crate::value::CellValue;

/// The orders dataset: category / publisher / orders.
pub fn orders_dataset() -> Dataset {
    let schema = Schema::new(vec![
        Column::categorical("category", "Category"),
        Column::categorical("publisher", "Publisher"),
        Column::numeric("orders", "Orders"),
    ]);

    let rows = vec![
        row3("Books", "Simon & Schuster", 8234.0),
        row3("Books", "Penguin Random House", 6789.0),
        row3("Books", "HarperCollins", 4853.0),
        row3("Games", "Humble Games", 5567.0),
        row3("Games", "Epic Odyssey Interactive Entertainment Studios", 2890.0),
        row3("Games", "Annapurna Interactive", 2777.0),
    ];

    Dataset::new(schema, rows)
}

/// The quarterly dataset: category / publisher / q1..q4 2024.
pub fn quarterly_dataset() -> Dataset {
    let schema = Schema::new(vec![
        Column::categorical("category", "Category"),
        Column::categorical("publisher", "Publisher"),
        Column::numeric("q1_2024", "Q1 2024"),
        Column::numeric("q2_2024", "Q2 2024"),
        Column::numeric("q3_2024", "Q3 2024"),
        Column::numeric("q4_2024", "Q4 2024"),
    ]);

    let rows = vec![
        row6("Books", "HarperCollins", 1234.0, 1567.0, 1000.0, 1052.0),
        row6("Books", "Penguin Random House", 1234.0, 2567.0, 1890.0, 1098.0),
        row6("Books", "Simon & Schuster", 2345.0, 1678.0, 3210.0, 1001.0),
        row6("Games", "Annapurna Interactive", 1200.0, 650.0, 500.0, 427.0),
        row6("Games", "Epic Odyssey Interactive", 1000.0, 750.0, 600.0, 540.0),
        row6("Games", "Humble Games", 1234.0, 1456.0, 1789.0, 1088.0),
    ];

    Dataset::new(schema, rows)
}

fn row3(category: &str, publisher: &str, orders: f64) -> Vec<CellValue> {
    vec![
        CellValue::text(category),
        CellValue::text(publisher),
        CellValue::Number(orders),
    ]
}

fn row6(category: &str, publisher: &str, q1: f64, q2: f64, q3: f64, q4: f64) -> Vec<CellValue> {
    vec![
        CellValue::text(category),
        CellValue::text(publisher),
        CellValue::Number(q1),
        CellValue::Number(q2),
        CellValue::Number(q3),
        CellValue::Number(q4),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orders_dataset_shape() {
        let data = orders_dataset();
        assert_eq!(data.schema().len(), 3);
        assert_eq!(data.row_count(), 6);
        assert_eq!(data.schema().metric_columns(), vec![2]);
    }

    #[test]
    fn quarterly_dataset_shape() {
        let data = quarterly_dataset();
        assert_eq!(data.schema().len(), 6);
        assert_eq!(data.row_count(), 6);
        assert_eq!(data.schema().metric_columns(), vec![2, 3, 4, 5]);
    }
}
