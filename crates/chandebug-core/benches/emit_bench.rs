//! Benchmarks for debug channel emission
//!
//! Run with: cargo bench -p chandebug-core
//!
//! These benchmarks establish baselines for:
//! - The disabled fast path (should cost a lock and a branch)
//! - Enabled emission into an in-memory sink
//! - Filter evaluation at channel creation

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use chandebug_core::{DebugConfig, DebugContext, FilterExpr, MemorySink, WriterSink};

// ============================================================================
// Emit Benchmarks
// ============================================================================

fn bench_emit(c: &mut Criterion) {
    let mut group = c.benchmark_group("emit");

    group.bench_function("disabled", |b| {
        let ctx = DebugContext::new(DebugConfig::default(), MemorySink::new());
        let dbg = ctx.create("bench");
        b.iter(|| dbg.emit(format_args!("value {}", black_box(42))))
    });

    group.bench_function("enabled_piped", |b| {
        let ctx = DebugContext::new(
            DebugConfig::default().with_filter("*"),
            WriterSink::new(std::io::sink()),
        );
        let dbg = ctx.create("bench");
        b.iter(|| dbg.emit(format_args!("value {}", black_box(42))))
    });

    group.bench_function("enabled_interactive", |b| {
        let ctx = DebugContext::new(
            DebugConfig::default().with_filter("*").with_interactive(true),
            WriterSink::new(std::io::sink()),
        );
        let dbg = ctx.create("bench");
        b.iter(|| dbg.emit(format_args!("value {}", black_box(42))))
    });

    group.finish();
}

// ============================================================================
// Filter Benchmarks
// ============================================================================

fn bench_filter(c: &mut Criterion) {
    let expr = FilterExpr::parse("api*,db:*,-db:pool,cache,worker:*,-worker:heartbeat");

    c.bench_function("filter_is_enabled", |b| {
        b.iter(|| black_box(expr.is_enabled(black_box("worker:queue"))))
    });

    c.bench_function("create_channel", |b| {
        b.iter_batched(
            || DebugContext::new(DebugConfig::default().with_filter("*"), MemorySink::new()),
            |ctx| black_box(ctx.create("api:http")),
            criterion::BatchSize::SmallInput,
        )
    });
}

criterion_group!(benches, bench_emit, bench_filter);
criterion_main!(benches);
