use avexport_core::dedup::{CropRect, RunLengthReducer};
use avexport_core::summarize;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn loudness_like(n: usize) -> Vec<f64> {
    // one short-term value per 100 ms, with silent stretches
    (0..n)
        .map(|i| if i % 5_000 < 40 { f64::NEG_INFINITY } else { (i as f64 * 0.003).sin() * 6.0 - 23.0 })
        .collect()
}

fn crop_like(n: usize) -> Vec<(u64, f64, CropRect)> {
    let full = CropRect::new(0, 0, 1920, 1080);
    let letterbox = CropRect::new(0, 140, 1920, 800);
    (0..n)
        .map(|i| {
            let rect = if (i / 20_000) % 2 == 1 { letterbox } else { full };
            (i as u64, i as f64 / 25.0, rect)
        })
        .collect()
}

fn bench_summarize(c: &mut Criterion) {
    let mut group = c.benchmark_group("summarize");
    for &n in &[100_000usize, 1_000_000usize] {
        let data = loudness_like(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, d| {
            b.iter_batched(|| d.clone(), |d| black_box(summarize(d)), BatchSize::LargeInput);
        });
    }
    group.finish();
}

fn bench_dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("run_length");
    let full = CropRect::new(0, 0, 1920, 1080);
    for &n in &[100_000usize, 1_000_000usize] {
        let data = crop_like(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &data, |b, d| {
            let reducer = RunLengthReducer::new().with_baseline(full).with_max_events(200);
            b.iter(|| black_box(reducer.reduce(d.iter().copied())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_summarize, bench_dedup);
criterion_main!(benches);
