// Criterion benchmarks for the operation set and the RPC codec
//
// Run benchmarks with:
//   cargo bench -p wirebench-common

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use wirebench_common::ops;
use wirebench_common::protocol::{Call, NumberList, RpcRequest};
use wirebench_common::transport::PostcardCodec;

fn sample_numbers(n: i64) -> Vec<i64> {
    // deterministic spread of values, some negative
    (0..n).map(|i| (i * 7919) % 10_007 - 5_000).collect()
}

fn bench_operations(c: &mut Criterion) {
    let mut group = c.benchmark_group("operations");
    let numbers = sample_numbers(10_000);
    let text = "the quick brown fox jumps over the lazy dog ".repeat(1_000);

    group.bench_function("reduce_10k", |b| b.iter(|| ops::reduce(black_box(&numbers))));
    group.bench_function("word_count_9k_words", |b| b.iter(|| ops::word_count(black_box(&text))));
    group.bench_function("min_max_10k", |b| b.iter(|| ops::min_max(black_box(&numbers))));
    group.bench_function("sort_10k", |b| b.iter(|| ops::sort(black_box(&numbers))));
    group.bench_function("primes_10k", |b| b.iter(|| ops::primes(black_box(&numbers))));

    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut group = c.benchmark_group("postcard_codec");

    for size in [5, 1_000] {
        let request = RpcRequest::new(Call::Sort(NumberList::new(sample_numbers(size))));
        let encoded = PostcardCodec::encode_request(&request).unwrap();

        group.bench_function(format!("encode_{}", size), |b| {
            b.iter(|| PostcardCodec::encode_request(black_box(&request)))
        });
        group.bench_function(format!("decode_{}", size), |b| {
            b.iter(|| PostcardCodec::decode_request(black_box(&encoded)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_operations, bench_codec);
criterion_main!(benches);
