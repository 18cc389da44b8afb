use array_hash::ArrayHash;
use criterion::{criterion_group, criterion_main, BatchSize, Criterion};

fn keys(count: usize) -> Vec<String> {
    (0..count).map(|_| nanoid::nanoid!()).collect()
}

fn insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for count in [1_000, 10_000, 100_000] {
        let keys = keys(count);

        group.bench_function(format!("array hash, {count} keys"), |b| {
            b.iter_batched(
                ArrayHash::<2_048>::new,
                |mut set| {
                    for key in &keys {
                        set.insert(key).expect("should insert");
                    }
                    set
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_function(format!("fx hash set, {count} keys"), |b| {
            b.iter_batched(
                rustc_hash::FxHashSet::<String>::default,
                |mut set| {
                    for key in &keys {
                        set.insert(key.clone());
                    }
                    set
                },
                BatchSize::LargeInput,
            );
        });
    }
}

fn insert_duplicate(c: &mut Criterion) {
    let keys = keys(10_000);

    let mut set: ArrayHash = ArrayHash::new();
    for key in &keys {
        set.insert(key).expect("should insert");
    }

    let mut idx = 0;

    c.bench_function("insert duplicate", |b| {
        b.iter(|| {
            idx = (idx + 1) % keys.len();
            let key = keys.get(idx).expect("should exist");
            assert!(!set.insert(key).expect("should insert"));
        });
    });
}

criterion_group!(benches, insert, insert_duplicate);
criterion_main!(benches);
