//! Criterion micro-benchmarks for construction, access, assignment and
//! guard verification across both placements.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use stowage_bench::{
    InlineBlock, InlineGuardedWord, InlineWord, OwnedBlock, OwnedGuardedWord, OwnedWord, BLOCK,
};
use stowage_region::CorruptionPolicy;

/// Benchmark: construct and drop, inline vs owned vs `Box`.
fn bench_construct(c: &mut Criterion) {
    let mut group = c.benchmark_group("construct_drop");
    group.bench_function("inline_word", |b| {
        b.iter(|| black_box(InlineWord::new(black_box(42))))
    });
    group.bench_function("owned_word", |b| {
        b.iter(|| black_box(OwnedWord::new(black_box(42))))
    });
    group.bench_function("box_word", |b| {
        b.iter(|| black_box(Box::new(black_box(42u64))))
    });
    group.bench_function("inline_guarded_word", |b| {
        b.iter(|| black_box(InlineGuardedWord::new(black_box(42))))
    });
    group.bench_function("owned_guarded_word", |b| {
        b.iter(|| black_box(OwnedGuardedWord::new(black_box(42))))
    });
    group.finish();
}

/// Benchmark: read-modify-write through `DerefMut`.
fn bench_access(c: &mut Criterion) {
    let mut inline = InlineWord::new(0);
    let mut owned = OwnedWord::new(0);

    let mut group = c.benchmark_group("access");
    group.bench_function("inline_word", |b| {
        b.iter(|| {
            *inline = inline.wrapping_add(1);
            black_box(*inline)
        })
    });
    group.bench_function("owned_word", |b| {
        b.iter(|| {
            *owned = owned.wrapping_add(1);
            black_box(*owned)
        })
    });
    group.finish();
}

/// Benchmark: copy-assign a 256-byte block.
fn bench_assign_block(c: &mut Criterion) {
    let source = [7u8; BLOCK];
    let mut inline = InlineBlock::new([0; BLOCK]);
    let mut owned = OwnedBlock::new([0; BLOCK]);

    let mut group = c.benchmark_group("assign_block");
    group.bench_function("inline", |b| b.iter(|| inline.assign(black_box(&source))));
    group.bench_function("owned", |b| b.iter(|| owned.assign(black_box(&source))));
    group.finish();
}

/// Benchmark: guard verification on intact 16- and 64-byte guards.
fn bench_guard_check(c: &mut Criterion) {
    let word = OwnedGuardedWord::new(1);
    let block = InlineBlock::new([0; BLOCK]);

    let mut group = c.benchmark_group("guard_check");
    group.bench_function("guard_16", |b| {
        b.iter(|| black_box(word.check_guard_values(CorruptionPolicy::ReportOnly)))
    });
    group.bench_function("guard_64", |b| {
        b.iter(|| black_box(block.check_guard_values(CorruptionPolicy::ReportOnly)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_construct,
    bench_access,
    bench_assign_block,
    bench_guard_check
);
criterion_main!(benches);
