//! FILENAME: session/src/menu.rs
//! Header UI models derived from session state.
//!
//! Pure descriptions of what a column header shows: the sort indicator
//! with its priority digit, and the per-column menu (group action,
//! wrap checkbox, aggregation entries). The host renders these however
//! it likes.

use engine::Schema;
use grid_engine::{AggregationScope, AggregationState, GroupState, SortDirection, SortState, TextWrapState};

/// Superscript digits for sort priorities 0-9.
const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Sort indicator for a column header: a direction arrow plus the
/// criterion's priority as a superscript digit (plain digits past 9).
pub fn sort_indicator(sort: &SortState, column: &str) -> Option<String> {
    let criterion = sort.criterion_for(column)?;
    let arrow = match criterion.direction {
        SortDirection::Ascending => '▲',
        SortDirection::Descending => '▼',
    };
    let priority = if criterion.priority <= 9 {
        SUPERSCRIPT_DIGITS[criterion.priority].to_string()
    } else {
        criterion.priority.to_string()
    };
    Some(format!("{}{}", arrow, priority))
}

/// The group entry a column's menu offers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupAction {
    /// "Group by {column}".
    Group,
    /// "Ungroup" (the column is the active grouping column).
    Ungroup,
}

/// Current aggregation choices shown in the menu, as stored names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregationMenu {
    pub group_function: Option<String>,
    pub table_function: Option<String>,
}

/// One column's header menu, derived from state on open.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMenu {
    pub column: String,
    pub group_action: GroupAction,
    pub wrap_enabled: bool,

    /// Present only for numeric columns; categorical columns show no
    /// aggregation entries.
    pub aggregation: Option<AggregationMenu>,
}

pub fn header_menu(
    schema: &Schema,
    column: &str,
    group: &GroupState,
    wrap: &TextWrapState,
    aggregation: &AggregationState,
) -> Option<HeaderMenu> {
    let index = schema.index_of(column)?;

    let group_action = if group.group_by() == Some(column) {
        GroupAction::Ungroup
    } else {
        GroupAction::Group
    };

    let aggregation = if schema.is_numeric(index) {
        Some(AggregationMenu {
            group_function: aggregation
                .setting(column, AggregationScope::Group)
                .map(|s| s.function.clone()),
            table_function: aggregation
                .setting(column, AggregationScope::Table)
                .map(|s| s.function.clone()),
        })
    } else {
        None
    };

    Some(HeaderMenu {
        column: column.to_string(),
        group_action,
        wrap_enabled: wrap.is_wrapped(column),
        aggregation,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::sample::orders_dataset;
    use grid_engine::AggregateFunction;

    #[test]
    fn indicator_shows_arrow_and_priority() {
        let mut sort = SortState::new();
        sort.toggle_additive("category");
        sort.toggle_additive("publisher");
        sort.toggle_additive("publisher"); // desc

        assert_eq!(sort_indicator(&sort, "category").as_deref(), Some("▲¹"));
        assert_eq!(sort_indicator(&sort, "publisher").as_deref(), Some("▼²"));
        assert_eq!(sort_indicator(&sort, "orders"), None);
    }

    #[test]
    fn menu_reflects_grouping_and_aggregation() {
        let data = orders_dataset();
        let schema = data.schema();

        let mut group = GroupState::new();
        group.set_group_by("category", ["Books".to_string(), "Games".to_string()]);

        let mut aggregation = AggregationState::new();
        aggregation.set("orders", AggregationScope::Group, Some(AggregateFunction::Sum));

        let wrap = TextWrapState::new();

        let category = header_menu(schema, "category", &group, &wrap, &aggregation).unwrap();
        assert_eq!(category.group_action, GroupAction::Ungroup);
        assert!(category.aggregation.is_none());

        let orders = header_menu(schema, "orders", &group, &wrap, &aggregation).unwrap();
        assert_eq!(orders.group_action, GroupAction::Group);
        let menu = orders.aggregation.unwrap();
        assert_eq!(menu.group_function.as_deref(), Some("sum"));
        assert_eq!(menu.table_function, None);

        assert!(header_menu(schema, "missing", &group, &wrap, &aggregation).is_none());
    }
}
