use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use media_squeeze::search::{search_quality, single_trial, QualityRange};

const ORIGINAL: u64 = 10_000_000;

fn linear_encoder(quality: u8) -> media_squeeze::Result<u64> {
    Ok(ORIGINAL * quality as u64 / 100)
}

fn bench_search_quality(c: &mut Criterion) {
    let mut group = c.benchmark_group("search_quality");

    for target in [0.1, 0.5, 0.8, 0.99] {
        group.bench_with_input(
            BenchmarkId::from_parameter(target),
            &target,
            |b, &target| {
                b.iter(|| {
                    search_quality(
                        black_box(ORIGINAL),
                        black_box(target),
                        QualityRange::default(),
                        linear_encoder,
                    )
                    .unwrap()
                })
            },
        );
    }

    group.finish();
}

fn bench_single_trial(c: &mut Criterion) {
    c.bench_function("single_trial", |b| {
        b.iter(|| single_trial(black_box(ORIGINAL), black_box(0.8), 85, linear_encoder).unwrap())
    });
}

criterion_group!(benches, bench_search_quality, bench_single_trial);
criterion_main!(benches);
