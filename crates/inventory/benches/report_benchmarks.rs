use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use warehouse_core::{MovementId, ProductId};
use warehouse_inventory::{
    CreateProduct, InventoryReport, Movement, MovementReport, MovementType, Product, RecordMovement,
};

fn products(count: usize) -> Vec<Product> {
    (0..count)
        .map(|idx| {
            let cmd = CreateProduct::new(
                ProductId::new(format!("P{idx:05}")).expect("valid id"),
                format!("Product {idx}"),
                "",
                Decimal::new(idx as i64 * 37 + 99, 2),
            )
            .with_quantity((idx % 250) as i64);
            Product::create(cmd, Utc::now()).expect("valid product")
        })
        .collect()
}

/// Movements in reverse chronological order (worst case for the sort).
fn movements(count: usize) -> Vec<Movement> {
    let start = Utc::now();
    (0..count)
        .map(|idx| {
            let change = if idx % 3 == 0 { -((idx % 7) as i64 + 1) } else { (idx % 11) as i64 + 1 };
            let kind = if change > 0 { MovementType::In } else { MovementType::Out };
            let cmd = RecordMovement::new(
                ProductId::new(format!("P{:05}", idx % 100)).expect("valid id"),
                "bench",
                change,
                kind,
                start - Duration::seconds(idx as i64),
            );
            Movement::record(MovementId::generate(), cmd).expect("non-zero change")
        })
        .collect()
}

fn bench_inventory_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("inventory_report");
    for size in [100usize, 1_000, 10_000] {
        let snapshot = products(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| InventoryReport::from_products(black_box(snapshot), Utc::now()))
        });
    }
    group.finish();
}

fn bench_movement_report(c: &mut Criterion) {
    let mut group = c.benchmark_group("movement_report");
    for size in [100usize, 1_000, 10_000] {
        let snapshot = movements(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &snapshot, |b, snapshot| {
            b.iter(|| {
                let report = MovementReport::from_movements(black_box(snapshot.clone()), Utc::now());
                report.to_string()
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_inventory_report, bench_movement_report);
criterion_main!(benches);
