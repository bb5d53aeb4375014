use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stanza::prelude::*;
use tempfile::TempDir;
use tokio::runtime::Runtime;

/// Write `count` stanza files of `bytes` bytes each into a fresh directory
fn fixture(count: u32, bytes: usize) -> TempDir {
    let dir = TempDir::new().unwrap();
    let poem = dir.path().join("poem");
    std::fs::create_dir(&poem).unwrap();
    for n in 1..=count {
        std::fs::write(poem.join(format!("stanza-{n:02}.txt")), "x".repeat(bytes)).unwrap();
    }
    dir
}

/// Compare fan-out against one-at-a-time reads for growing batches
fn bench_parallel_vs_sequential(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_reads");
    let runtime = Runtime::new().unwrap();

    for count in [8u32, 64, 256] {
        let dir = fixture(count, 4 * 1024);
        let batch = BatchFileReader::new(FileStore::new(dir.path()));
        let batch = &batch;

        group.bench_with_input(BenchmarkId::new("parallel", count), &count, |b, &count| {
            b.to_async(&runtime).iter(|| async move {
                batch
                    .read_all_parallel(BatchRequest::numbered("poem", 1..=count), NoopObserver)
                    .await
            });
        });

        group.bench_with_input(BenchmarkId::new("sequential", count), &count, |b, &count| {
            b.to_async(&runtime).iter(|| async move {
                batch
                    .read_all_sequential_ignoring_errors(
                        BatchRequest::numbered("poem", 1..=count),
                        NoopObserver,
                    )
                    .await
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_parallel_vs_sequential);
criterion_main!(benches);
