//! # Graph Benchmarks
//!
//! Performance benchmarks for seadawg-core index operations.
//!
//! Run with: `cargo bench -p seadawg-core`

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use seadawg_core::{SeaDawg, Sink};
use std::hint::black_box;

/// Seeded random words over a small alphabet, so factors repeat.
fn create_words(count: usize, length: usize) -> Vec<String> {
    let alphabet: Vec<char> = "abcdefgh".chars().collect();
    let mut rng = StdRng::seed_from_u64(42);
    (0..count)
        .map(|_| {
            (0..length)
                .map(|_| alphabet[rng.random_range(0..alphabet.len())])
                .collect()
        })
        .collect()
}

/// Index `words` with their position as payload.
fn create_index(words: &[String]) -> SeaDawg<char, usize> {
    let mut dawg = SeaDawg::new();
    for (i, word) in words.iter().enumerate() {
        dawg.add_str(word, Sink::new(i)).expect("add");
    }
    dawg
}

// =============================================================================
// BENCHMARKS
// =============================================================================

fn bench_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("add");

    for size in [100, 1000, 5000].iter() {
        let words = create_words(*size, 24);
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| black_box(create_index(words)));
        });
    }

    group.finish();
}

fn bench_find_exact(c: &mut Criterion) {
    let mut group = c.benchmark_group("find_exact");

    for size in [100, 1000, 5000].iter() {
        let words = create_words(*size, 24);
        let dawg = create_index(&words);
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                for word in words {
                    black_box(dawg.find_exact_str(word).expect("find"));
                }
            });
        });
    }

    group.finish();
}

fn bench_delete(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");

    for size in [100, 1000].iter() {
        let words = create_words(*size, 24);
        let dawg = create_index(&words);
        group.bench_with_input(BenchmarkId::from_parameter(size), &words, |b, words| {
            b.iter(|| {
                let mut dawg = dawg.clone();
                for word in words {
                    black_box(dawg.delete_str(word).expect("delete"));
                }
            });
        });
    }

    group.finish();
}

fn bench_prefix(c: &mut Criterion) {
    let words = create_words(1000, 24);
    let dawg = create_index(&words);

    c.bench_function("prefix_two_symbols", |b| {
        b.iter(|| black_box(dawg.find_with_prefix_str("ab").expect("prefix").len()));
    });
}

fn bench_substring(c: &mut Criterion) {
    let words = create_words(1000, 24);
    let dawg = create_index(&words);

    c.bench_function("substring_three_symbols", |b| {
        b.iter(|| black_box(dawg.find_with_substring_str("abc").expect("substring").len()));
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_find_exact,
    bench_delete,
    bench_prefix,
    bench_substring,
);
criterion_main!(benches);
