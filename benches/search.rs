//! Benchmarks for Keydrill search performance
//!
//! Run: cargo bench
//! Run specific: cargo bench -- decode
//! Compare: cargo bench -- --save-baseline v1 && cargo bench -- --baseline v1

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use keydrill::engine::{
    Algorithm, AlgorithmChoice, CharsetPreset, DispatchPolicy, Matcher, SearchOrchestrator,
    SearchRequest, SearchSpace, Target, WorkerCap,
};

// ============================================================================
// Keyspace Decoding
// ============================================================================

fn benchmark_decode(c: &mut Criterion) {
    let charset = CharsetPreset::Full.chars(None);
    let space = SearchSpace::new(&charset, 6).unwrap();
    let step = space.size() / 10_000;

    let mut group = c.benchmark_group("decode");
    group.throughput(Throughput::Elements(10_000));
    group.bench_function("full_len6_10k", |b| {
        let mut buf = String::with_capacity(6);
        b.iter(|| {
            for i in 0..10_000u128 {
                space.decode_into(black_box(i * step), &mut buf).unwrap();
                black_box(&buf);
            }
        })
    });
    group.finish();
}

// ============================================================================
// Digest Matching
// ============================================================================

fn benchmark_matchers(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");

    for algorithm in Algorithm::ALL {
        let matcher = Matcher::new(Target::hashed("zzzzzz", algorithm));
        group.bench_with_input(
            BenchmarkId::from_parameter(algorithm.name()),
            &matcher,
            |b, m| b.iter(|| black_box(m.matches(black_box("abcdef")))),
        );
    }

    let plain = Matcher::new(Target::Plain("zzzzzz".to_string()));
    group.bench_function("plain", |b| {
        b.iter(|| black_box(plain.matches(black_box("abcdef"))))
    });

    group.finish();
}

// ============================================================================
// Full Search - sequential vs parallel on the same space
// ============================================================================

fn benchmark_full_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_search");
    group.sample_size(10);

    // Last candidate of the length-4 lowercase space: worst case
    let digest = Algorithm::Sha256.hex_digest(b"zzzz");
    let request = SearchRequest::new(digest, AlgorithmChoice::Sha256, "abcdefghijklmnopqrstuvwxyz")
        .with_lengths(4, 4)
        .with_workers(num_cpus::get());

    let sequential = DispatchPolicy {
        sequential_space_threshold: u64::MAX,
        ..Default::default()
    };
    let parallel = DispatchPolicy {
        sequential_space_threshold: 0,
        sequential_max_length: 0,
        worker_cap: WorkerCap::Parallelism,
    };

    for (name, policy) in [("sequential", sequential), ("parallel", parallel)] {
        let orchestrator = SearchOrchestrator::new(&request).unwrap().with_policy(policy);
        group.bench_function(name, |b| b.iter(|| black_box(orchestrator.run().unwrap())));
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_decode,
    benchmark_matchers,
    benchmark_full_search
);
criterion_main!(benches);
