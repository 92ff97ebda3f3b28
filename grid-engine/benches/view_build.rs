//! FILENAME: grid-engine/benches/view_build.rs
//! Benchmarks for the row-plan builder.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use engine::sample::quarterly_dataset;
use grid_engine::{
    build_view, group_rows, sort_rows, AggregateFunction, AggregationScope, AggregationState,
    GroupState, SortState,
};

fn bench_flat_view(c: &mut Criterion) {
    let dataset = quarterly_dataset();
    let mut sort = SortState::new();
    sort.toggle_additive("category");
    sort.toggle_additive("q1_2024");

    c.bench_function("flat_view_sorted", |b| {
        b.iter(|| {
            build_view(
                black_box(&dataset),
                &sort,
                &GroupState::new(),
                &AggregationState::new(),
            )
        })
    });
}

fn bench_grouped_view(c: &mut Criterion) {
    let dataset = quarterly_dataset();
    let sorted = sort_rows(&dataset, &SortState::new());
    let col = dataset.schema().index_of("category").unwrap();
    let keys = group_rows(&dataset, &sorted, col).into_iter().map(|g| g.label);

    let mut group = GroupState::new();
    group.set_group_by("category", keys);
    group.toggle_collapsed("Books");

    let mut aggregation = AggregationState::new();
    aggregation.apply(
        dataset.schema(),
        "q1_2024",
        AggregationScope::Group,
        Some(AggregateFunction::Sum),
    );
    aggregation.apply(
        dataset.schema(),
        "q1_2024",
        AggregationScope::Table,
        Some(AggregateFunction::Average),
    );

    c.bench_function("grouped_view_with_aggregates", |b| {
        b.iter(|| build_view(black_box(&dataset), &SortState::new(), &group, &aggregation))
    });
}

criterion_group!(benches, bench_flat_view, bench_grouped_view);
criterion_main!(benches);
