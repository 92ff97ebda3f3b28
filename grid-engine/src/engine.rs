//! FILENAME: grid-engine/src/engine.rs
//! Grid Engine - sorting, grouping, and aggregation over a dataset.
//!
//! All three operations are pure: sorting returns an index permutation,
//! grouping partitions those indices, and aggregation folds values
//! through an accumulator. The dataset itself is never touched.

use std::cmp::Ordering;

use engine::{format_number, CellValue, Dataset};
use rustc_hash::FxHashMap;

use crate::definition::{AggregateFunction, SortDirection, SortState};

// ============================================================================
// SORTING
// ============================================================================

/// Returns the dataset's row indices in sorted order.
///
/// Criteria apply in priority order; the first nonzero comparison
/// decides, ties fall through to the next criterion. The sort is
/// stable: rows equal under every criterion keep their input order.
/// Descending negates the comparison result rather than swapping the
/// operands, so ties still cascade.
pub fn sort_rows(dataset: &Dataset, sort: &SortState) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..dataset.row_count()).collect();
    if sort.is_empty() {
        return indices;
    }

    let schema = dataset.schema();
    // Resolve column names once; criteria on unknown columns are inert.
    let criteria: Vec<(usize, SortDirection)> = sort
        .criteria()
        .iter()
        .filter_map(|c| schema.index_of(&c.column).map(|i| (i, c.direction)))
        .collect();

    indices.sort_by(|&a, &b| {
        for &(col, direction) in &criteria {
            let ordering = compare_values(dataset.value(a, col), dataset.value(b, col));
            let ordering = match direction {
                SortDirection::Ascending => ordering,
                SortDirection::Descending => ordering.reverse(),
            };
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        Ordering::Equal
    });

    indices
}

/// Two numbers compare numerically; any other pairing compares by
/// display string.
fn compare_values(a: Option<&CellValue>, b: Option<&CellValue>) -> Ordering {
    match (a, b) {
        (Some(CellValue::Number(x)), Some(CellValue::Number(y))) => {
            x.partial_cmp(y).unwrap_or(Ordering::Equal)
        }
        (a, b) => {
            let a = a.map(|v| v.display_value()).unwrap_or_default();
            let b = b.map(|v| v.display_value()).unwrap_or_default();
            a.cmp(&b)
        }
    }
}

// ============================================================================
// GROUPING
// ============================================================================

/// One group of rows sharing a key value.
#[derive(Debug, Clone)]
pub struct RowGroup {
    /// The column value shared by every row in the group.
    pub key: CellValue,

    /// Canonical string form of the key. Collapse tracking and key
    /// equality both use this, so numeric and text keys coexist.
    pub label: String,

    /// Dataset row indices belonging to this group, in sorted order.
    /// Non-empty by construction.
    pub rows: Vec<usize>,
}

/// Partitions already-sorted rows into groups keyed by one column's
/// value. Group order is first-seen order in the sorted input; it is
/// not independently sorted.
pub fn group_rows(dataset: &Dataset, sorted: &[usize], column: usize) -> Vec<RowGroup> {
    let mut groups: Vec<RowGroup> = Vec::new();
    let mut by_label: FxHashMap<String, usize> = FxHashMap::default();

    for &row in sorted {
        let key = match dataset.value(row, column) {
            Some(value) => value.clone(),
            None => CellValue::Text(String::new()),
        };
        let label = key.display_value();

        match by_label.get(&label) {
            Some(&index) => groups[index].rows.push(row),
            None => {
                by_label.insert(label.clone(), groups.len());
                groups.push(RowGroup {
                    key,
                    label,
                    rows: vec![row],
                });
            }
        }
    }

    groups
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Accumulator for computing aggregates incrementally.
///
/// `count` tracks every value; `count_numbers` only numeric ones. Sum
/// coerces non-numeric entries to 0 (they contribute nothing but are
/// still counted), while average divides by the numeric count only.
#[derive(Debug, Clone, Default)]
pub struct AggregateAccumulator {
    pub sum: f64,
    pub count: u64,
    pub count_numbers: u64,
}

impl AggregateAccumulator {
    pub fn new() -> Self {
        AggregateAccumulator::default()
    }

    pub fn add(&mut self, value: &CellValue) {
        match value.as_number() {
            Some(n) => self.add_number(n),
            None => self.add_non_number(),
        }
    }

    pub fn add_number(&mut self, value: f64) {
        self.count += 1;
        self.count_numbers += 1;
        self.sum += value;
    }

    /// Adds a non-numeric value (only increments count).
    pub fn add_non_number(&mut self) {
        self.count += 1;
    }

    /// Computes the final aggregate value. Empty input yields 0 for
    /// every function.
    pub fn compute(&self, function: AggregateFunction) -> f64 {
        match function {
            AggregateFunction::Sum => self.sum,
            AggregateFunction::Count => self.count as f64,
            AggregateFunction::Average => {
                if self.count_numbers > 0 {
                    self.sum / (self.count_numbers as f64)
                } else {
                    0.0
                }
            }
        }
    }
}

/// Aggregates a sequence of values with the given function.
pub fn aggregate_values<'a, I>(values: I, function: AggregateFunction) -> f64
where
    I: IntoIterator<Item = &'a CellValue>,
{
    let mut acc = AggregateAccumulator::new();
    for value in values {
        acc.add(value);
    }
    acc.compute(function)
}

/// Aggregates with a stored function name. Unknown names resolve to 0
/// without failing; the stored configuration is left alone.
pub fn aggregate_by_name<'a, I>(values: I, function: &str) -> f64
where
    I: IntoIterator<Item = &'a CellValue>,
{
    match AggregateFunction::from_name(function) {
        Some(f) => aggregate_values(values, f),
        None => 0.0,
    }
}

/// Formats an aggregate for display: grouped integers for sums and
/// counts, one decimal place for averages with a trailing `.0`
/// dropped.
pub fn format_aggregate(value: f64, function: Option<AggregateFunction>) -> String {
    match function {
        Some(AggregateFunction::Average) => {
            let rounded = (value * 10.0).round() / 10.0;
            if rounded.fract() == 0.0 {
                format!("{:.0}", rounded)
            } else {
                format!("{:.1}", rounded)
            }
        }
        _ => format_number(value.round()),
    }
}
