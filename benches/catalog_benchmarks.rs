use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use product_dashboard::models::{FilterCriteria, PriceRange, Product, Rating, SortKey};
use product_dashboard::services::filter_and_sort;
use product_dashboard::{Action, StateManager};
use std::hint::black_box;

const CATEGORIES: [&str; 4] = ["electronics", "jewelery", "men's clothing", "women's clothing"];

fn catalog(size: usize) -> Vec<Product> {
    (0..size)
        .map(|i| Product {
            id: i as u64 + 1,
            title: format!("Product {}", i + 1),
            category: CATEGORIES[i % CATEGORIES.len()].to_string(),
            price: ((i * 37) % 1000) as f64 + 0.99,
            image: String::new(),
            description: String::new(),
            rating: (i % 5 != 0).then(|| Rating {
                rate: (i % 50) as f64 / 10.0,
                count: Some(i as u32),
            }),
        })
        .collect()
}

fn bench_filter_and_sort(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter_and_sort");

    let criteria = FilterCriteria {
        category: "electronics".to_string(),
        price_range: PriceRange::new(50.0, 750.0),
        min_rating: Some(2.5),
    };

    for size in [20usize, 1_000, 10_000] {
        let products = catalog(size);
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("unsorted", size), &products, |b, products| {
            b.iter(|| filter_and_sort(black_box(products), black_box(&criteria), SortKey::None))
        });

        group.bench_with_input(
            BenchmarkId::new("price_descending", size),
            &products,
            |b, products| {
                b.iter(|| {
                    filter_and_sort(
                        black_box(products),
                        black_box(&criteria),
                        SortKey::PriceDescending,
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch");

    let state = StateManager::new();
    state.products_loaded(catalog(1_000));

    group.bench_function("set_sort", |b| {
        let mut ascending = true;
        b.iter(|| {
            ascending = !ascending;
            let sort = if ascending {
                SortKey::PriceAscending
            } else {
                SortKey::PriceDescending
            };
            state.dispatch(black_box(Action::SetSort(sort)))
        })
    });

    group.bench_function("reveal_more", |b| {
        b.iter(|| state.dispatch(black_box(Action::RevealMore)))
    });

    group.finish();
}

criterion_group!(benches, bench_filter_and_sort, bench_dispatch);
criterion_main!(benches);
