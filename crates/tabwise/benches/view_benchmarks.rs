//! View engine performance benchmarks.
//!
//! Measures ingestion, search, sort, and selection statistics across
//! dataset sizes.

use std::sync::Arc;

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tabwise::{Dataset, Parser, Row, SortSpec, ViewConfig, ViewEngine};

/// Generate synthetic CSV text with a mix of numeric, text, and blank cells.
fn generate_csv_data(rows: usize, cols: usize) -> String {
    let mut rng = StdRng::seed_from_u64(7);
    let mut data = String::new();

    let header: Vec<String> = (0..cols).map(|i| format!("column_{}", i + 1)).collect();
    data.push_str(&header.join(","));
    data.push('\n');

    for row in 0..rows {
        let fields: Vec<String> = (0..cols)
            .map(|col| match col % 4 {
                0 => format!("ID_{:06}", row),
                1 => format!("{:.2}", rng.gen_range(0.0..1000.0)),
                2 => format!("Category_{}", rng.gen_range(0..10)),
                _ if rng.gen_range(0..10) == 0 => String::new(),
                _ => rng.gen_range(-500i64..500).to_string(),
            })
            .collect();
        data.push_str(&fields.join(","));
        data.push('\n');
    }

    data
}

fn generate_dataset(rows: usize) -> Arc<Dataset> {
    let mut rng = StdRng::seed_from_u64(11);
    let columns = vec!["id".to_string(), "value".to_string(), "label".to_string()];
    let rows: Vec<Row> = (0..rows)
        .map(|i| {
            Row::new()
                .with("id", format!("ID_{:06}", i))
                .with("value", rng.gen_range(0.0..1000.0))
                .with("label", format!("Category_{}", rng.gen_range(0..50)))
        })
        .collect();
    Arc::new(Dataset::from_rows("bench", columns, rows))
}

/// Benchmark parsing CSV text of various sizes.
fn bench_parse_csv(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_csv");

    for rows in [100, 1_000, 10_000].iter() {
        let data = generate_csv_data(*rows, 8);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &data, |b, data| {
            let parser = Parser::new();
            b.iter(|| black_box(parser.parse_bytes(data.as_bytes(), "bench.csv").unwrap()))
        });
    }

    group.finish();
}

/// Benchmark recomputing the visible sequence for a search term.
fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for rows in [1_000, 10_000, 100_000].iter() {
        let dataset = generate_dataset(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("rows", rows), &dataset, |b, dataset| {
            b.iter_with_setup(
                || ViewEngine::new(Arc::clone(dataset)),
                |mut view| {
                    view.set_search("category_4");
                    black_box(view.visible_count())
                },
            )
        });
    }

    group.finish();
}

/// Benchmark sorting numeric and text columns.
fn bench_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("sort");
    let dataset = generate_dataset(10_000);

    for key in ["value", "label"].iter() {
        group.bench_with_input(BenchmarkId::new("key", key), key, |b, key| {
            b.iter_with_setup(
                || ViewEngine::new(Arc::clone(&dataset)),
                |mut view| {
                    view.set_sort(Some(SortSpec::ascending(*key)));
                    black_box(view.displayed_count())
                },
            )
        });
    }

    group.finish();
}

/// Benchmark statistics over a whole-column selection.
fn bench_column_stats(c: &mut Criterion) {
    let mut group = c.benchmark_group("column_stats");

    for rows in [1_000, 10_000].iter() {
        let mut view = ViewEngine::with_config(generate_dataset(*rows), ViewConfig::default().full());
        view.select_column(1);
        group.bench_function(BenchmarkId::new("rows", rows), |b| {
            b.iter(|| black_box(view.stats()))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_parse_csv,
    bench_search,
    bench_sort,
    bench_column_stats,
);
criterion_main!(benches);
