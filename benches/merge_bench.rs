//! Criterion benchmarks for the id merge

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use numex::services::merge;
use serde_json::{json, Value};
use std::hint::black_box;

/// Synthetic payloads shaped like the live API responses
fn fixtures(info_rows: usize) -> (Vec<Value>, Vec<Value>, Vec<Value>) {
    let services: Vec<Value> = (0..50)
        .map(|i| json!({"id": i, "name": format!("service {}", i), "name_en": format!("service_en {}", i)}))
        .collect();
    let countries: Vec<Value> = (0..200)
        .map(|i| json!({"id": i.to_string(), "name": format!("country {}", i), "name_en": format!("country_en {}", i), "areacode": i.to_string()}))
        .collect();
    let info: Vec<Value> = (0..info_rows)
        .map(|i| {
            json!({
                "service": i % 60,
                "country": (i % 250).to_string(),
                "cname": format!("cname {}", i),
                "price": i * 10,
            })
        })
        .collect();
    (services, countries, info)
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");

    for rows in [100usize, 1_000, 10_000] {
        let (services, countries, info) = fixtures(rows);
        group.throughput(Throughput::Elements(rows as u64));
        group.bench_with_input(BenchmarkId::from_parameter(rows), &rows, |b, _| {
            b.iter(|| merge(black_box(&services), black_box(&countries), black_box(&info)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_merge);
criterion_main!(benches);
