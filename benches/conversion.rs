use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use plist_protocols::{root_value_of, to_root_value, value_of, ConvertOptions, KeyFormatter};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Serialize, Clone)]
struct Product {
    sku: String,
    name: String,
    price: f64,
    quantity: u32,
}

fn products(size: usize) -> Vec<BTreeMap<String, String>> {
    (0..size)
        .map(|i| {
            let mut map = BTreeMap::new();
            map.insert("sku".to_string(), format!("SKU-{:04}", i));
            map.insert("name".to_string(), format!("Product {}", i));
            map
        })
        .collect()
}

fn benchmark_scalars(c: &mut Criterion) {
    let numbers: Vec<i64> = (0..1000).collect();

    c.bench_function("value_of_1000_integers", |b| {
        b.iter(|| value_of(black_box(&numbers)))
    });
}

fn benchmark_root_maps(c: &mut Criterion) {
    let mut group = c.benchmark_group("root_value_of");

    for size in [10, 100, 1000].iter() {
        let mut root = BTreeMap::new();
        root.insert("items".to_string(), products(*size));

        group.bench_with_input(BenchmarkId::from_parameter(size), &root, |b, root| {
            b.iter(|| root_value_of(black_box(root)))
        });
    }

    group.finish();
}

fn benchmark_key_formatters(c: &mut Criterion) {
    let mut root = BTreeMap::new();
    root.insert("items".to_string(), products(100));

    let verbatim = ConvertOptions::new();
    let lowercase = ConvertOptions::new().with_key_formatter(KeyFormatter::lowercase());

    c.bench_function("keys_verbatim", |b| {
        b.iter(|| plist_protocols::root_value_of_with_options(black_box(&root), &verbatim))
    });
    c.bench_function("keys_lowercase", |b| {
        b.iter(|| plist_protocols::root_value_of_with_options(black_box(&root), &lowercase))
    });
}

fn benchmark_serde_bridge(c: &mut Criterion) {
    let items: Vec<Product> = (0..100)
        .map(|i| Product {
            sku: format!("SKU-{:04}", i),
            name: format!("Product {}", i),
            price: 9.99 + i as f64,
            quantity: i,
        })
        .collect();
    let mut root = BTreeMap::new();
    root.insert("items".to_string(), items);

    c.bench_function("to_root_value_100_structs", |b| {
        b.iter(|| to_root_value(black_box(&root)))
    });
}

criterion_group!(
    benches,
    benchmark_scalars,
    benchmark_root_maps,
    benchmark_key_formatters,
    benchmark_serde_bridge
);
criterion_main!(benches);
