//! Property tests for the filter/sort engine
//!
//! These tests verify, for arbitrary catalogs and criteria:
//! - Results are a subset of the input with no duplicates
//! - Every filter keeps exactly the products that satisfy it
//! - Sorting orders by price and is stable
//! - Re-running with unchanged inputs yields the same sequence

use product_dashboard::models::{FilterCriteria, PriceRange, Product, Rating, SortKey};
use product_dashboard::services::{filter_and_sort, matches};
use proptest::prelude::*;
use std::collections::HashSet;

const CATEGORIES: [&str; 5] = [
    "",
    "electronics",
    "jewelery",
    "men's clothing",
    "women's clothing",
];

fn arb_catalog() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(
        (
            1usize..CATEGORIES.len(),
            0u32..100_000,
            prop::option::of(0u32..=50),
        ),
        0..40,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (category, cents, rate))| Product {
                id: i as u64 + 1,
                title: format!("Product {}", i + 1),
                category: CATEGORIES[category].to_string(),
                price: f64::from(cents) / 100.0,
                image: String::new(),
                description: String::new(),
                rating: rate.map(|r| Rating {
                    rate: f64::from(r) / 10.0,
                    count: None,
                }),
            })
            .collect()
    })
}

fn arb_criteria() -> impl Strategy<Value = FilterCriteria> {
    (
        0usize..CATEGORIES.len(),
        0u32..1000,
        0u32..1000,
        prop::option::of(1u32..=50),
    )
        .prop_map(|(category, a, b, rating)| FilterCriteria {
            category: CATEGORIES[category].to_string(),
            price_range: PriceRange::new(f64::from(a.min(b)), f64::from(a.max(b))),
            min_rating: rating.map(|r| f64::from(r) / 10.0),
        })
}

fn arb_sort() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::None),
        Just(SortKey::PriceAscending),
        Just(SortKey::PriceDescending),
    ]
}

proptest! {
    #[test]
    fn result_is_subset_without_duplicates(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
        sort in arb_sort(),
    ) {
        let result = filter_and_sort(&catalog, &criteria, sort);

        let ids: HashSet<u64> = result.iter().map(|p| p.id).collect();
        prop_assert_eq!(ids.len(), result.len());
        for product in &result {
            prop_assert!(catalog.contains(product));
        }
    }

    #[test]
    fn kept_exactly_the_matching_products(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
    ) {
        let result = filter_and_sort(&catalog, &criteria, SortKey::None);
        let expected: Vec<&Product> = catalog.iter().filter(|p| matches(p, &criteria)).collect();

        prop_assert_eq!(result.iter().collect::<Vec<_>>(), expected);
    }

    #[test]
    fn price_filter_respects_inclusive_bounds(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
    ) {
        let range = criteria.price_range;
        let criteria = FilterCriteria::with_price_range(range);
        let result = filter_and_sort(&catalog, &criteria, SortKey::None);
        let kept: HashSet<u64> = result.iter().map(|p| p.id).collect();

        for product in &catalog {
            let inside = range.min <= product.price && product.price <= range.max;
            prop_assert_eq!(kept.contains(&product.id), inside);
        }
    }

    #[test]
    fn category_filter_is_idempotent(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
    ) {
        let once = filter_and_sort(&catalog, &criteria, SortKey::None);
        let twice = filter_and_sort(&once, &criteria, SortKey::None);
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn active_minimum_excludes_unrated(
        catalog in arb_catalog(),
        min in 1u32..=50,
    ) {
        let criteria = FilterCriteria {
            min_rating: Some(f64::from(min) / 10.0),
            ..FilterCriteria::default()
        };
        let result = filter_and_sort(&catalog, &criteria, SortKey::None);
        prop_assert!(result.iter().all(|p| p.rating.is_some()));
    }

    #[test]
    fn no_minimum_excludes_nothing_on_rating(catalog in arb_catalog()) {
        let criteria = FilterCriteria::with_price_range(PriceRange::new(0.0, 1000.0));
        let result = filter_and_sort(&catalog, &criteria, SortKey::None);
        prop_assert_eq!(result.len(), catalog.len());
    }

    #[test]
    fn sorting_orders_by_price(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
    ) {
        let ascending = filter_and_sort(&catalog, &criteria, SortKey::PriceAscending);
        prop_assert!(ascending.windows(2).all(|w| w[0].price <= w[1].price));

        let descending = filter_and_sort(&catalog, &criteria, SortKey::PriceDescending);
        prop_assert!(descending.windows(2).all(|w| w[0].price >= w[1].price));
    }

    #[test]
    fn sorting_is_stable(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
        sort in prop_oneof![Just(SortKey::PriceAscending), Just(SortKey::PriceDescending)],
    ) {
        let result = filter_and_sort(&catalog, &criteria, sort);
        // Ids follow catalog order, so equal prices must keep ascending ids
        for pair in result.windows(2) {
            if pair[0].price == pair[1].price {
                prop_assert!(pair[0].id < pair[1].id);
            }
        }
    }

    #[test]
    fn unsorted_preserves_relative_order(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
    ) {
        let result = filter_and_sort(&catalog, &criteria, SortKey::None);
        prop_assert!(result.windows(2).all(|w| w[0].id < w[1].id));
    }

    #[test]
    fn rerun_is_identical(
        catalog in arb_catalog(),
        criteria in arb_criteria(),
        sort in arb_sort(),
    ) {
        prop_assert_eq!(
            filter_and_sort(&catalog, &criteria, sort),
            filter_and_sort(&catalog, &criteria, sort)
        );
    }
}
