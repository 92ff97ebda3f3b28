//! FILENAME: tests/test_grid_flow.rs
//! Integration tests for the sort/group/aggregate flow.

mod common;

use common::{catalog_session, catalog_session_with_store, orders_session};
use grid_engine::{AggregateFunction, AggregationScope, GridRowKind};
use session::{GridEvent, MemoryStore, PreferenceStore, RecordingTarget, SessionError};

// ============================================================================
// GROUPING AND AGGREGATION
// ============================================================================

#[test]
fn test_group_aggregation_end_to_end() {
    let mut session = catalog_session();

    session
        .apply(GridEvent::GroupBy {
            column: "cat".to_string(),
        })
        .unwrap();
    session
        .apply(GridEvent::SetAggregation {
            column: "orders".to_string(),
            scope: AggregationScope::Group,
            function: Some(AggregateFunction::Sum),
        })
        .unwrap();
    session
        .apply(GridEvent::ToggleGroup {
            key: "Books".to_string(),
        })
        .unwrap();

    let view = session.view();
    // Books expanded: lead + member + group total; Games collapsed.
    assert_eq!(view.row_count(), 4);

    let total = view
        .rows
        .iter()
        .find(|r| r.kind == GridRowKind::GroupTotal)
        .expect("expanded group gets a total row");
    assert_eq!(total.group_key.as_deref(), Some("Books"));
    assert_eq!(total.cells[2].text, "30");

    let games = view
        .rows
        .iter()
        .find(|r| r.kind == GridRowKind::GroupHeader)
        .expect("collapsed group keeps its header");
    assert_eq!(games.group_key.as_deref(), Some("Games"));
    assert_eq!(games.cells[2].text, "5");
}

#[test]
fn test_collapse_and_expand_is_idempotent() {
    let mut session = orders_session();
    session
        .apply(GridEvent::GroupBy {
            column: "category".to_string(),
        })
        .unwrap();

    let toggle = |s: &mut session::GridSession<MemoryStore>| {
        s.apply(GridEvent::ToggleGroup {
            key: "Books".to_string(),
        })
        .unwrap();
    };

    toggle(&mut session);
    let expanded_once: Vec<Option<usize>> =
        session.view().rows.iter().map(|r| r.source_row).collect();

    toggle(&mut session);
    toggle(&mut session);
    let expanded_again: Vec<Option<usize>> =
        session.view().rows.iter().map(|r| r.source_row).collect();

    assert_eq!(expanded_once, expanded_again);
}

#[test]
fn test_regroup_resets_collapse_state() {
    let mut session = orders_session();
    session
        .apply(GridEvent::GroupBy {
            column: "category".to_string(),
        })
        .unwrap();
    session
        .apply(GridEvent::ToggleGroup {
            key: "Books".to_string(),
        })
        .unwrap();
    assert!(!session.state().group.is_collapsed("Books"));

    // Grouping by another column clears the collapsed set; grouping by
    // category again starts fully collapsed.
    session
        .apply(GridEvent::GroupBy {
            column: "publisher".to_string(),
        })
        .unwrap();
    session
        .apply(GridEvent::GroupBy {
            column: "category".to_string(),
        })
        .unwrap();
    assert!(session.state().group.is_collapsed("Books"));
    assert_eq!(session.view().row_count(), 2);
}

#[test]
fn test_grouping_by_numeric_column() {
    let mut session = orders_session();
    session
        .apply(GridEvent::GroupBy {
            column: "orders".to_string(),
        })
        .unwrap();

    // Every orders value is unique: six collapsed headers.
    let view = session.view();
    assert_eq!(view.row_count(), 6);
    assert_eq!(view.group_by, Some(2));
    assert!(view.rows.iter().all(|r| r.kind == GridRowKind::GroupHeader));
    // The merged cell sits in the metric's own column position.
    assert_eq!(view.rows[0].cells[2].text, "▸ 8,234 (1 items)");
}

#[test]
fn test_table_aggregation_ignores_grouping_and_collapse() {
    let mut session = orders_session();
    session
        .apply(GridEvent::SetAggregation {
            column: "orders".to_string(),
            scope: AggregationScope::Table,
            function: Some(AggregateFunction::Average),
        })
        .unwrap();
    session
        .apply(GridEvent::GroupBy {
            column: "category".to_string(),
        })
        .unwrap();

    let view = session.view();
    let total = view.rows.last().unwrap();
    assert_eq!(total.kind, GridRowKind::TableTotal);
    // (8234+6789+4853+5567+2890+2777)/6 = 5185
    assert_eq!(total.cells[2].text, "5185");
}

// ============================================================================
// SORTING
// ============================================================================

#[test]
fn test_sort_chain_feeds_grouping_order() {
    let mut session = orders_session();
    session
        .apply(GridEvent::SortClick {
            column: "category".to_string(),
        })
        .unwrap();
    session
        .apply(GridEvent::SortClick {
            column: "category".to_string(),
        })
        .unwrap(); // descending

    session
        .apply(GridEvent::GroupBy {
            column: "category".to_string(),
        })
        .unwrap();

    // Group order follows the sorted input, not key order.
    let keys: Vec<&str> = session
        .view()
        .rows
        .iter()
        .filter_map(|r| r.group_key.as_deref())
        .collect();
    assert_eq!(keys, vec!["Games", "Books"]);
}

// ============================================================================
// PREFERENCES
// ============================================================================

#[test]
fn test_aggregation_survives_a_new_session() {
    // A store carrying the blob a previous session saved.
    let mut store = MemoryStore::new();
    store
        .set(
            session::AGGREGATION_STATES_KEY,
            r#"{"orders":{"tableAggregation":{"function":"sum"}}}"#,
        )
        .unwrap();

    let session = catalog_session_with_store(store);
    let view = session.view();
    assert_eq!(view.rows.last().unwrap().kind, GridRowKind::TableTotal);
    assert_eq!(view.rows.last().unwrap().cells[2].text, "35");
}

#[test]
fn test_corrupt_preferences_fall_back_to_defaults() {
    let mut store = MemoryStore::new();
    store
        .set(session::AGGREGATION_STATES_KEY, "{broken")
        .unwrap();
    store.set(session::WRAP_STATES_KEY, "42").unwrap();

    let session = catalog_session_with_store(store);
    assert!(session.state().aggregation.is_empty());
    assert!(!session.state().text_wrap.is_wrapped("orders"));
}

// ============================================================================
// RENDERING
// ============================================================================

#[test]
fn test_render_paints_the_current_plan() {
    let session = catalog_session();
    let mut target = RecordingTarget::new();

    session.render(&mut target).unwrap();
    assert_eq!(target.paints, 1);
    assert_eq!(target.last().map(|v| v.row_count()), Some(3));
}

#[test]
fn test_render_failure_aborts_the_pass() {
    struct FailingTarget;
    impl session::RenderTarget for FailingTarget {
        fn paint(&mut self, _view: &grid_engine::GridView) -> Result<(), String> {
            Err("missing table anchor".to_string())
        }
    }

    let session = catalog_session();
    let result = session.render(&mut FailingTarget);
    assert!(matches!(result, Err(SessionError::Render(_))));
}
