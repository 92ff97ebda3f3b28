//! FILENAME: engine/src/dataset.rs
//! PURPOSE: The immutable in-memory dataset the grid renders.
//! CONTEXT: A dataset is a schema plus an ordered list of rows, fixed at
//! load time. Engines never mutate it; sorting produces index
//! permutations and grouping partitions those indices.

use serde::{Deserialize, Serialize};

use crate::schema::Schema;
use crate::value::CellValue;

/// One record, with values aligned to the schema's column order.
pub type Row = Vec<CellValue>;

/// An ordered, immutable collection of rows under one schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    schema: Schema,
    rows: Vec<Row>,
}

impl Dataset {
    pub fn new(schema: Schema, rows: Vec<Row>) -> Self {
        Dataset { schema, rows }
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, index: usize) -> Option<&Row> {
        self.rows.get(index)
    }

    /// Gets the value at (row, logical column).
    pub fn value(&self, row: usize, col: usize) -> Option<&CellValue> {
        self.rows.get(row).and_then(|r| r.get(col))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Column;

    #[test]
    fn value_lookup_is_bounds_checked() {
        let schema = Schema::new(vec![
            Column::categorical("name", "Name"),
            Column::numeric("n", "N"),
        ]);
        let dataset = Dataset::new(
            schema,
            vec![vec![CellValue::text("a"), CellValue::Number(1.0)]],
        );

        assert_eq!(dataset.value(0, 1), Some(&CellValue::Number(1.0)));
        assert_eq!(dataset.value(0, 2), None);
        assert_eq!(dataset.value(1, 0), None);
    }
}
