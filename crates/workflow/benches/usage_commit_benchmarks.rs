use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use chrono::Utc;
use wardstock_core::{ItemId, PatientId};
use wardstock_inventory::{InventoryItem, ItemKind, ScannedUsageEntry};
use wardstock_store::{InMemoryRecordStore, RecordStore, RecordWrite, path};
use wardstock_workflow::{ScanQueue, UsageCommitter};

fn seeded_store(items: u64) -> InMemoryRecordStore {
    let store = InMemoryRecordStore::new();
    for i in 0..items {
        let item = InventoryItem::new(
            ItemId::new(format!("item-{i}")),
            ItemKind::Supplies,
            format!("Item {i}"),
            1_000_000,
        );
        store
            .put(RecordWrite {
                path: path::item(item.kind.as_str(), &item.id),
                payload: serde_json::to_value(&item).unwrap(),
                expected_version: None,
            })
            .unwrap();
    }
    store
}

fn full_queue(items: u64, scans_per_item: u64) -> ScanQueue {
    let mut queue = ScanQueue::new();
    for i in 0..items {
        let item = InventoryItem::new(
            ItemId::new(format!("item-{i}")),
            ItemKind::Supplies,
            format!("Item {i}"),
            1_000_000,
        );
        for _ in 0..scans_per_item {
            queue
                .enqueue(ScannedUsageEntry::new(&item, 1, Utc::now()).unwrap())
                .unwrap();
        }
    }
    queue
}

fn bench_enqueue(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_queue_enqueue");
    for scans in [10u64, 100, 1_000] {
        group.throughput(Throughput::Elements(scans));
        group.bench_with_input(BenchmarkId::from_parameter(scans), &scans, |b, &scans| {
            b.iter(|| black_box(full_queue(1, scans)));
        });
    }
    group.finish();
}

fn bench_commit(c: &mut Criterion) {
    let mut group = c.benchmark_group("usage_commit");
    let patient = PatientId::new("bench-patient");

    for items in [1u64, 10, 100] {
        group.throughput(Throughput::Elements(items));
        group.bench_with_input(BenchmarkId::from_parameter(items), &items, |b, &items| {
            let queue = full_queue(items, 2);
            b.iter(|| {
                let store = seeded_store(items);
                let committer = UsageCommitter::new(&store);
                black_box(committer.commit(&patient, &queue).unwrap());
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_enqueue, bench_commit);
criterion_main!(benches);
