use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use rand::{rngs::StdRng, SeedableRng};

use lookup_bench::Fixture;

// Same targets as the lookup-bench binary: a fresh fixture per
// invocation, one timed lookup of the marked key.
fn bench_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("lookup");
    for capacity in [10_usize, 100, 1_000].iter().cloned() {
        group.bench_with_input(BenchmarkId::new("tree", capacity), &capacity, |b, &n| {
            b.iter_batched_ref(
                || Fixture::setup(n, &mut StdRng::from_entropy()).unwrap(),
                |fixture| black_box(fixture.tree_lookup()),
                BatchSize::SmallInput,
            )
        });
        group.bench_with_input(BenchmarkId::new("hash", capacity), &capacity, |b, &n| {
            b.iter_batched_ref(
                || Fixture::setup(n, &mut StdRng::from_entropy()).unwrap(),
                |fixture| black_box(fixture.hash_lookup()),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lookup);
criterion_main!(benches);
