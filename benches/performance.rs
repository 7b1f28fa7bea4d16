use criterion::{black_box, criterion_group, criterion_main, Criterion};
use webquota_alloc::{calculate_global_limit, QuotaAllocator};
use webquota_core::units::MIB;
use webquota_io::{FixedCacheInfo, FixedDiskInfo};

const GIB: i64 = 1024 * MIB;

fn bench_global_limit(c: &mut Criterion) {
    c.bench_function("calculate_global_limit", |b| {
        b.iter(|| calculate_global_limit(black_box(64 * GIB), black_box(17 * GIB + 12_345)))
    });
}

fn bench_decisions(c: &mut Criterion) {
    let allocator =
        QuotaAllocator::new(&FixedDiskInfo::new(64 * GIB, 32 * GIB), &FixedCacheInfo(0));
    c.bench_function("database_quota_decision", |b| {
        b.iter(|| {
            allocator.on_exceeded_database_quota(
                "https://bench.example",
                "db",
                black_box(4 * MIB),
                black_box(100 * MIB),
            )
        })
    });
    c.bench_function("app_cache_denial", |b| {
        b.iter(|| allocator.on_reached_max_app_cache_size(black_box(64 * GIB), black_box(0)))
    });
}

criterion_group!(benches, bench_global_limit, bench_decisions);
criterion_main!(benches);
