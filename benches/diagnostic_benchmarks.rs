//! Benchmarks for diagnostic set operations.
//!
//! Run with: cargo bench

use codeview_diagnostics::{Category, DiagnosticSet, LocatedMessage, Message, TextLocation};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

/// Generates `count` distinct messages spread over lines.
fn generate_messages(count: usize) -> Vec<LocatedMessage> {
    (0..count)
        .map(|i| {
            let category = Category::ALL[i % Category::ALL.len()];
            LocatedMessage::new(
                TextLocation::clamped(i / 4 + 1, i % 80 + 1),
                Message::new(category, 1, format!("Message {}", i)),
            )
        })
        .collect()
}

/// Benchmarks building a set from distinct messages.
fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for size in [100, 1000, 10000].iter() {
        let messages = generate_messages(*size);

        group.bench_with_input(BenchmarkId::new("distinct", size), &messages, |b, messages| {
            b.iter(|| {
                let set: DiagnosticSet = black_box(messages).iter().cloned().collect();
                black_box(set)
            })
        });
    }

    group.finish();
}

/// Benchmarks re-inserting messages that are already present.
fn bench_duplicate_insert(c: &mut Criterion) {
    let messages = generate_messages(1000);
    let base: DiagnosticSet = messages.iter().cloned().collect();

    c.bench_function("insert_duplicates", |b| {
        b.iter_with_setup(
            || base.clone(),
            |mut set| {
                for m in &messages {
                    set.insert_located(black_box(m.clone()));
                }
                black_box(set)
            },
        )
    });
}

/// Benchmarks per-line lookup, as done when rendering a visible line.
fn bench_on_line(c: &mut Criterion) {
    let set: DiagnosticSet = generate_messages(10000).into_iter().collect();

    c.bench_function("on_line", |b| {
        b.iter(|| black_box(set.on_line(black_box(1200)).count()))
    });
}

/// Benchmarks the sorted listing.
fn bench_sorted(c: &mut Criterion) {
    let set: DiagnosticSet = generate_messages(10000).into_iter().collect();

    c.bench_function("sorted", |b| b.iter(|| black_box(set.sorted().len())));
}

criterion_group!(
    benches,
    bench_insert,
    bench_duplicate_insert,
    bench_on_line,
    bench_sorted,
);

criterion_main!(benches);
