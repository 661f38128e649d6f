//! Dispatch benchmarks using criterion.
//!
//! Measures exact-match resolution, the conversion fallback path, and
//! element-wise traversal of nested collections.
//!
//! Run with: cargo bench --bench dispatch_bench

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use polymath::{TypeTag, Value};
use polymath_std::Library;

fn bench_scalar_dispatch(c: &mut Criterion) {
    let Ok(lib) = Library::new() else {
        return;
    };
    let mut group = c.benchmark_group("scalar_dispatch");

    let number = Value::from(-4.2);
    group.bench_function("exact_match", |b| {
        b.iter(|| black_box(lib.sign().call_one(black_box(&number))))
    });

    // boolean reaches `number` through the conversion table
    let boolean = Value::from(true);
    group.bench_function("converted", |b| {
        b.iter(|| black_box(lib.sign().call_one(black_box(&boolean))))
    });

    group.bench_function("resolve_only", |b| {
        b.iter(|| {
            black_box(
                lib.bit_and()
                    .resolve(black_box(&[TypeTag::Boolean, TypeTag::Number])),
            )
        })
    });

    group.finish();
}

fn bench_collection_dispatch(c: &mut Criterion) {
    let Ok(lib) = Library::new() else {
        return;
    };
    let mut group = c.benchmark_group("collection_dispatch");

    for size in [16usize, 256, 4096] {
        let input = Value::Array(
            (0..size)
                .map(|i| Value::Number(i as f64 - (size / 2) as f64))
                .collect(),
        );
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("sign", size), &input, |b, input| {
            b.iter(|| black_box(lib.sign().call_one(input)))
        });

        group.bench_with_input(BenchmarkId::new("bit_and_broadcast", size), &input, |b, input| {
            let mask = Value::from(0xff);
            b.iter(|| black_box(lib.bit_and().call(&[input.clone(), mask.clone()])))
        });
    }

    group.finish();
}

fn bench_nested_depth(c: &mut Criterion) {
    let Ok(lib) = Library::new() else {
        return;
    };
    let mut group = c.benchmark_group("nested_depth");

    for depth in [8usize, 64, 512] {
        let mut value = Value::from(-1);
        for _ in 0..depth {
            value = Value::Array(vec![value]);
        }

        group.bench_with_input(BenchmarkId::new("abs", depth), &value, |b, value| {
            b.iter(|| black_box(lib.abs().call_one(value)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scalar_dispatch,
    bench_collection_dispatch,
    bench_nested_depth,
);
criterion_main!(benches);
