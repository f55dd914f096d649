use crate::models::{FilterCriteria, Product, SortKey};
use std::cmp::Ordering;

/// Keep a product iff no category is selected or it matches exactly.
pub fn matches_category(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria.category.is_empty() || product.category == criteria.category
}

pub fn matches_price(product: &Product, criteria: &FilterCriteria) -> bool {
    criteria.price_range.contains(product.price)
}

/// Keep a product iff no minimum rating is active, or it is rated at least
/// that high. Unrated products fail any active minimum.
pub fn matches_rating(product: &Product, criteria: &FilterCriteria) -> bool {
    match criteria.min_rating {
        None => true,
        Some(min) => product.rate().is_some_and(|rate| rate >= min),
    }
}

pub fn matches(product: &Product, criteria: &FilterCriteria) -> bool {
    matches_category(product, criteria)
        && matches_price(product, criteria)
        && matches_rating(product, criteria)
}

/// Derive the ordered result list from the full collection.
///
/// Always starts from `products`, never from a previous result, and never
/// mutates its inputs. Filtering keeps catalog order; both price sorts are
/// stable so equal prices stay in catalog order too.
pub fn filter_and_sort(
    products: &[Product],
    criteria: &FilterCriteria,
    sort: SortKey,
) -> Vec<Product> {
    let mut ordered: Vec<Product> = products
        .iter()
        .filter(|product| matches(product, criteria))
        .cloned()
        .collect();

    sort_by_price(&mut ordered, sort);

    tracing::trace!(
        total = products.len(),
        matching = ordered.len(),
        sort = sort.selector_value(),
        "Applied filters and sorting"
    );

    ordered
}

fn sort_by_price(products: &mut [Product], sort: SortKey) {
    match sort {
        SortKey::None => {}
        SortKey::PriceAscending => products.sort_by(|a, b| compare_price(a, b)),
        SortKey::PriceDescending => products.sort_by(|a, b| compare_price(b, a)),
    }
}

fn compare_price(a: &Product, b: &Product) -> Ordering {
    a.price.total_cmp(&b.price)
}
