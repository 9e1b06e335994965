use avexport_chart::downsample::lttb;
use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

fn gen_xy(n: usize) -> Vec<(f64, f64)> {
    // one sample per frame at 25 fps, loudness-like drift
    (0..n)
        .map(|i| (i as f64 / 25.0, (i as f64 * 0.01).sin() * 10.0 - 23.0 + (i as f64 * 0.0001)))
        .collect()
}

fn bench_lttb(c: &mut Criterion) {
    let mut group = c.benchmark_group("lttb");
    for &n in &[100_000usize, 1_000_000usize] {
        let data = gen_xy(n);
        for &target in &[1_000usize, 2_400usize] {
            group.bench_with_input(BenchmarkId::from_parameter(format!("n{n}_t{target}")), &target, |b, &t| {
                b.iter_batched(
                    || data.clone(),
                    |d| { let _ = black_box(lttb(&d, t)); },
                    BatchSize::LargeInput,
                );
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_lttb);
criterion_main!(benches);
