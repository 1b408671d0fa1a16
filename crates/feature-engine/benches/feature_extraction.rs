//! Benchmarks for the windowed feature reducers.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use feature_engine::{
    csi_feature_extraction, median_filter_bitrate, WindowSpec, DEFAULT_CSI_WINDOW,
};
use timeline_align::{AlignedTable, Column};

fn synthetic_csi_table(rows: usize, subcarriers: usize) -> AlignedTable {
    let grid = (0..rows).map(|i| i as f64 * 0.1).collect();
    let columns = (0..subcarriers)
        .map(|s| {
            let values = (0..rows)
                .map(|i| ((i + s) as f64 * 0.37).sin() * 10.0 + 40.0)
                .collect();
            Column::new(format!("subcarrier_{s}"), values)
        })
        .collect();
    AlignedTable::new(grid, columns)
}

fn synthetic_bitrate_table(rows: usize) -> AlignedTable {
    let grid = (0..rows).map(|i| i as f64 * 0.1).collect();
    let values = (0..rows).map(|i| ((i % 17) * 120) as f64).collect();
    AlignedTable::new(grid, vec![Column::new("bitrate_bytes", values)])
}

fn benchmark_csi_feature(c: &mut Criterion) {
    let table_12 = synthetic_csi_table(600, 12);
    let table_64 = synthetic_csi_table(600, 64);

    c.bench_function("csi_feature_600x12", |b| {
        b.iter(|| csi_feature_extraction(black_box(&table_12), DEFAULT_CSI_WINDOW))
    });

    c.bench_function("csi_feature_600x64", |b| {
        b.iter(|| csi_feature_extraction(black_box(&table_64), DEFAULT_CSI_WINDOW))
    });
}

fn benchmark_median_filter(c: &mut Criterion) {
    let table = synthetic_bitrate_table(600);

    c.bench_function("bitrate_median_600", |b| {
        b.iter(|| median_filter_bitrate(black_box(&table), WindowSpec::new(3, 1)))
    });
}

criterion_group!(benches, benchmark_csi_feature, benchmark_median_filter);
criterion_main!(benches);
