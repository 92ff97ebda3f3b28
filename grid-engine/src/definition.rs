//! FILENAME: grid-engine/src/definition.rs
//! Grid State Definition - The serializable state layer.
//!
//! This module contains all the types that DESCRIBE what the grid is
//! currently showing: the sort chain, the grouping column with its
//! collapsed set, per-column aggregation choices, and per-column text
//! wrap flags. These structures are designed to be:
//! - Serializable (the wrap and aggregation maps persist as JSON blobs)
//! - Mutated in place by user actions, read fresh on every rebuild

use engine::Schema;
use rustc_hash::{FxHashMap, FxHashSet};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

// ============================================================================
// SORTING
// ============================================================================

/// Sort direction for one criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[serde(rename = "desc")]
    Descending,
}

/// One entry in the sort chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortCriterion {
    /// Column name this criterion sorts by.
    pub column: String,

    pub direction: SortDirection,

    /// 1-based position in the chain. Kept dense after every mutation.
    pub priority: usize,
}

/// The ordered list of active sort criteria.
/// Empty means dataset original order. A column appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SortState {
    criteria: SmallVec<[SortCriterion; 4]>,
}

impl SortState {
    pub fn new() -> Self {
        SortState::default()
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn criteria(&self) -> &[SortCriterion] {
        &self.criteria
    }

    pub fn criterion_for(&self, column: &str) -> Option<&SortCriterion> {
        self.criteria.iter().find(|c| c.column == column)
    }

    pub fn clear(&mut self) {
        self.criteria.clear();
    }

    /// Primary interaction: cycles a single-column sort through
    /// ascending, descending, and none. Clicking a different column
    /// resets the chain to that column ascending.
    pub fn toggle_primary(&mut self, column: &str) {
        if self.criteria.len() == 1 && self.criteria[0].column == column {
            match self.criteria[0].direction {
                SortDirection::Ascending => {
                    self.criteria[0].direction = SortDirection::Descending;
                }
                SortDirection::Descending => {
                    self.criteria.clear();
                }
            }
        } else {
            self.criteria.clear();
            self.criteria.push(SortCriterion {
                column: column.to_string(),
                direction: SortDirection::Ascending,
                priority: 1,
            });
        }
    }

    /// Additive interaction: appends the column to the chain, flips it
    /// to descending, or removes it, compacting the remaining
    /// priorities to a dense 1..N sequence.
    pub fn toggle_additive(&mut self, column: &str) {
        if let Some(index) = self.criteria.iter().position(|c| c.column == column) {
            match self.criteria[index].direction {
                SortDirection::Ascending => {
                    self.criteria[index].direction = SortDirection::Descending;
                }
                SortDirection::Descending => {
                    self.criteria.remove(index);
                    self.renumber();
                }
            }
        } else {
            let priority = self.criteria.len() + 1;
            self.criteria.push(SortCriterion {
                column: column.to_string(),
                direction: SortDirection::Ascending,
                priority,
            });
        }
    }

    fn renumber(&mut self) {
        for (i, criterion) in self.criteria.iter_mut().enumerate() {
            criterion.priority = i + 1;
        }
    }
}

// ============================================================================
// GROUPING
// ============================================================================

/// Single-level grouping state: the grouped column (if any) and the set
/// of collapsed group keys. The collapsed set only ever holds keys of
/// groups that exist under the current grouping column; it is cleared
/// whenever the grouping column changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupState {
    group_by: Option<String>,
    collapsed: FxHashSet<String>,
}

impl GroupState {
    pub fn new() -> Self {
        GroupState::default()
    }

    pub fn group_by(&self) -> Option<&str> {
        self.group_by.as_deref()
    }

    pub fn is_grouped(&self) -> bool {
        self.group_by.is_some()
    }

    /// Activates grouping on a column. Every group starts collapsed.
    pub fn set_group_by(
        &mut self,
        column: impl Into<String>,
        group_keys: impl IntoIterator<Item = String>,
    ) {
        self.group_by = Some(column.into());
        self.collapsed = group_keys.into_iter().collect();
    }

    /// Ends grouping and forgets the collapsed set.
    pub fn clear(&mut self) {
        self.group_by = None;
        self.collapsed.clear();
    }

    pub fn is_collapsed(&self, key: &str) -> bool {
        self.collapsed.contains(key)
    }

    pub fn toggle_collapsed(&mut self, key: &str) {
        if !self.collapsed.remove(key) {
            self.collapsed.insert(key.to_string());
        }
    }
}

// ============================================================================
// AGGREGATION
// ============================================================================

/// Supported aggregation functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunction {
    Sum,
    Average,
    Count,
}

impl AggregateFunction {
    /// Resolves a stored function name. Unknown names return None and
    /// compute 0 downstream; the stored string itself is never touched.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sum" => Some(AggregateFunction::Sum),
            "average" => Some(AggregateFunction::Average),
            "count" => Some(AggregateFunction::Count),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AggregateFunction::Sum => "sum",
            AggregateFunction::Average => "average",
            AggregateFunction::Count => "count",
        }
    }
}

/// Where an aggregation applies: per group or over the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregationScope {
    Group,
    Table,
}

/// One scope's stored choice for a column.
/// The function is stored as its raw name so a value this build does
/// not recognize survives a load/save round trip unmodified.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregationSetting {
    pub function: String,
}

impl AggregationSetting {
    pub fn new(function: AggregateFunction) -> Self {
        AggregationSetting {
            function: function.name().to_string(),
        }
    }

    /// The resolved function, if the stored name is recognized.
    pub fn resolve(&self) -> Option<AggregateFunction> {
        AggregateFunction::from_name(&self.function)
    }
}

/// A column's aggregation configuration across both scopes.
/// Never persisted with both scopes unset; the owning map prunes it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnAggregation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_aggregation: Option<AggregationSetting>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_aggregation: Option<AggregationSetting>,
}

impl ColumnAggregation {
    pub fn is_empty(&self) -> bool {
        self.group_aggregation.is_none() && self.table_aggregation.is_none()
    }

    pub fn scope(&self, scope: AggregationScope) -> Option<&AggregationSetting> {
        match scope {
            AggregationScope::Group => self.group_aggregation.as_ref(),
            AggregationScope::Table => self.table_aggregation.as_ref(),
        }
    }

    fn scope_mut(&mut self, scope: AggregationScope) -> &mut Option<AggregationSetting> {
        match scope {
            AggregationScope::Group => &mut self.group_aggregation,
            AggregationScope::Table => &mut self.table_aggregation,
        }
    }
}

/// Per-column aggregation choices, keyed by column name.
/// Serializes to the same JSON shape the preference store persists:
/// `{"orders":{"groupAggregation":{"function":"sum"}}}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AggregationState {
    columns: FxHashMap<String, ColumnAggregation>,
}

impl AggregationState {
    pub fn new() -> Self {
        AggregationState::default()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn column(&self, name: &str) -> Option<&ColumnAggregation> {
        self.columns.get(name)
    }

    /// Whether the column has a choice stored for the scope, even one
    /// whose function name is unrecognized.
    pub fn is_configured(&self, column: &str, scope: AggregationScope) -> bool {
        self.setting(column, scope).is_some()
    }

    pub fn setting(&self, column: &str, scope: AggregationScope) -> Option<&AggregationSetting> {
        self.columns.get(column).and_then(|c| c.scope(scope))
    }

    /// The resolved function for a column and scope. None when unset
    /// or when the stored name is unrecognized.
    pub fn function(&self, column: &str, scope: AggregationScope) -> Option<AggregateFunction> {
        self.setting(column, scope).and_then(|s| s.resolve())
    }

    /// Whether any column has a choice for the scope.
    pub fn has_any(&self, scope: AggregationScope) -> bool {
        self.columns.values().any(|c| c.scope(scope).is_some())
    }

    /// Sets or clears one column's choice for a scope. An entry whose
    /// scopes are both unset is removed entirely.
    pub fn set(&mut self, column: &str, scope: AggregationScope, function: Option<AggregateFunction>) {
        match function {
            Some(function) => {
                let entry = self.columns.entry(column.to_string()).or_default();
                *entry.scope_mut(scope) = Some(AggregationSetting::new(function));
            }
            None => {
                if let Some(entry) = self.columns.get_mut(column) {
                    *entry.scope_mut(scope) = None;
                    if entry.is_empty() {
                        self.columns.remove(column);
                    }
                }
            }
        }
    }

    /// Applies a choice with metric fan-out: picking an aggregation on
    /// any numeric column applies the same function to every numeric
    /// column, keeping homogeneous metrics consistent. Categorical
    /// columns never accept aggregation. Returns whether the state was
    /// touched.
    pub fn apply(
        &mut self,
        schema: &Schema,
        column: &str,
        scope: AggregationScope,
        function: Option<AggregateFunction>,
    ) -> bool {
        let index = match schema.index_of(column) {
            Some(i) => i,
            None => return false,
        };
        if !schema.is_numeric(index) {
            return false;
        }

        for metric in schema.metric_columns() {
            if let Some(col) = schema.column(metric) {
                self.set(&col.name, scope, function);
            }
        }
        true
    }
}

// ============================================================================
// TEXT WRAP
// ============================================================================

/// Per-column text wrap flags, keyed by column name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextWrapState {
    columns: FxHashMap<String, bool>,
}

impl TextWrapState {
    pub fn new() -> Self {
        TextWrapState::default()
    }

    pub fn is_wrapped(&self, column: &str) -> bool {
        self.columns.get(column).copied().unwrap_or(false)
    }

    pub fn set(&mut self, column: &str, wrapped: bool) {
        self.columns.insert(column.to_string(), wrapped);
    }

    /// Applies a wrap toggle with the same metric fan-out as
    /// aggregation: numeric columns move together.
    pub fn apply(&mut self, schema: &Schema, column: &str, wrapped: bool) {
        let numeric = schema
            .index_of(column)
            .map(|i| schema.is_numeric(i))
            .unwrap_or(false);

        if numeric {
            for metric in schema.metric_columns() {
                if let Some(col) = schema.column(metric) {
                    self.set(&col.name, wrapped);
                }
            }
        } else {
            self.set(column, wrapped);
        }
    }
}
