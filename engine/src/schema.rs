//! FILENAME: engine/src/schema.rs
//! PURPOSE: Column schema shared by the sort/group/aggregation engines.
//! CONTEXT: The original implementation hard-coded three near-duplicate
//! code paths, one per dataset shape. Everything downstream is
//! parameterized over this schema instead: a column has a name (the key
//! used in persisted preference maps), a display label, and a kind that
//! decides whether it participates in aggregation.

use serde::{Deserialize, Serialize};

/// Whether a column holds labels or numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Categorical,
    Numeric,
}

/// A single column in the dataset schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    /// Stable identifier, used as the key in preference maps.
    pub name: String,

    /// Display name, used for headers and copy-with-headers output.
    pub label: String,

    /// Whether the column is eligible for aggregation.
    pub kind: ColumnKind,
}

impl Column {
    pub fn categorical(name: impl Into<String>, label: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            label: label.into(),
            kind: ColumnKind::Categorical,
        }
    }

    pub fn numeric(name: impl Into<String>, label: impl Into<String>) -> Self {
        Column {
            name: name.into(),
            label: label.into(),
            kind: ColumnKind::Numeric,
        }
    }
}

/// Ordered column list for one dataset.
/// Logical column indices used by the view and selection layers are
/// positions in this list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(columns: Vec<Column>) -> Self {
        Schema { columns }
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&Column> {
        self.columns.get(index)
    }

    /// Resolves a column name to its logical index.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn is_numeric(&self, index: usize) -> bool {
        self.columns
            .get(index)
            .map(|c| c.kind == ColumnKind::Numeric)
            .unwrap_or(false)
    }

    /// Logical indices of every numeric column, in schema order.
    /// Aggregation and wrap choices fan out across these when there is
    /// more than one.
    pub fn metric_columns(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(_, c)| c.kind == ColumnKind::Numeric)
            .map(|(i, _)| i)
            .collect()
    }
}
