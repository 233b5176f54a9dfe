use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use pickup_postage::{
    AreaId, CountryId, DeliveryModule, Destination, InMemoryAreaStore, InMemoryConfigStore,
    InMemoryPriceStore, ModuleId, PickupDeliveryService, PriceIndex, PriceRow, QuoteRequest,
    TierTable,
};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::thread;

const MODULE: ModuleId = ModuleId(1);

/// `areas` areas of `tiers` tiers each, one country per area.
fn price_rows(areas: u32, tiers: i64) -> Vec<PriceRow> {
    (1..=areas)
        .flat_map(|area| {
            (1..=tiers).map(move |tier| PriceRow {
                area_id: AreaId(area),
                weight_max: Decimal::new(tier, 0),
                price: Decimal::new(400 + tier * 25, 2),
                area_name: format!("Area {}", area),
            })
        })
        .collect()
}

fn service(areas: u32, tiers: i64) -> PickupDeliveryService {
    let area_store = InMemoryAreaStore::new();
    for area in 1..=areas {
        area_store.add_country(AreaId(area), CountryId(area));
        area_store.enable(AreaId(area), MODULE);
    }

    PickupDeliveryService::builder()
        .with_module_id(MODULE)
        .with_price_store(Arc::new(InMemoryPriceStore::new(price_rows(areas, tiers))))
        .with_area_store(Arc::new(area_store))
        .with_config_store(Arc::new(InMemoryConfigStore::new()))
        .build()
        .unwrap()
}

/// Benchmark tier lookup for growing tier tables
fn bench_tier_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("tier_selection");

    for tiers in [4i64, 32, 256].iter() {
        let table = TierTable::from_pairs(
            (1..=*tiers).map(|tier| (Decimal::new(tier, 0), Decimal::new(tier * 10, 2))),
        );
        let weight = Decimal::new(*tiers, 0) - Decimal::new(5, 1);

        group.bench_with_input(BenchmarkId::from_parameter(tiers), &table, |b, table| {
            b.iter(|| table.select(black_box(weight)))
        });
    }

    group.finish();
}

/// Benchmark building the index from raw rows
fn bench_index_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("index_build");

    for areas in [10u32, 100].iter() {
        let rows = price_rows(*areas, 20);
        group.throughput(Throughput::Elements(rows.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(areas), &rows, |b, rows| {
            b.iter(|| PriceIndex::from_rows(black_box(rows.clone())))
        });
    }

    group.finish();
}

/// Benchmark full quotes on a warm cache
fn bench_quote(c: &mut Criterion) {
    let mut group = c.benchmark_group("quote");
    let service = service(50, 20);
    service.price_table().load().unwrap();

    let request = QuoteRequest::new(
        Destination::country(CountryId(25)),
        Decimal::new(125, 1),
        Decimal::new(30, 0),
    );
    group.throughput(Throughput::Elements(1));
    group.bench_function("warm_cache", |b| {
        b.iter(|| service.quote(black_box(&request)))
    });

    let unserved = QuoteRequest::new(
        Destination::country(CountryId(999)),
        Decimal::ONE,
        Decimal::new(30, 0),
    );
    group.bench_function("country_not_served", |b| {
        b.iter(|| service.quote(black_box(&unserved)))
    });

    group.finish();
}

/// Benchmark concurrent quotes against one shared service
fn bench_concurrent_quotes(c: &mut Criterion) {
    let mut group = c.benchmark_group("concurrent_quotes");

    for num_threads in [2usize, 4, 8].iter() {
        group.throughput(Throughput::Elements((*num_threads * 1000) as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(num_threads),
            num_threads,
            |b, &num_threads| {
                b.iter(|| {
                    let service = Arc::new(service(20, 20));
                    let handles: Vec<_> = (0..num_threads)
                        .map(|i| {
                            let service = Arc::clone(&service);
                            thread::spawn(move || {
                                let destination =
                                    Destination::country(CountryId(i as u32 % 20 + 1));
                                for w in 0..1000i64 {
                                    let weight = Decimal::new(w % 200, 1);
                                    let request =
                                        QuoteRequest::new(destination, weight, Decimal::new(30, 0));
                                    let _ = black_box(service.quote(&request));
                                }
                            })
                        })
                        .collect();

                    for handle in handles {
                        handle.join().unwrap();
                    }
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_tier_selection,
    bench_index_build,
    bench_quote,
    bench_concurrent_quotes
);
criterion_main!(benches);
