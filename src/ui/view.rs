use crate::models::{DashboardState, Product, ProductId, SortKey, category_label};

pub const DASHBOARD_HEADING: &str = "E-commerce Product Dashboard";

/// A product tile in the result grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductCard {
    pub id: ProductId,
    pub title: String,
    pub price_label: String,
    pub image: String,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            price_label: product.price_label(),
            image: product.image.clone(),
        }
    }
}

/// Contents of the detail overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDetail {
    pub id: ProductId,
    pub title: String,
    pub image: String,
    pub description: String,
    pub price_label: String,
    pub rating_label: Option<String>,
}

impl From<&Product> for ProductDetail {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id,
            title: product.title.clone(),
            image: product.image.clone(),
            description: product.description.clone(),
            price_label: product.price_label(),
            rating_label: product.rating.map(|rating| match rating.count {
                Some(count) => format!("{} / 5 ({} reviews)", rating.rate, count),
                None => format!("{} / 5", rating.rate),
            }),
        }
    }
}

/// Everything a presentation surface needs to draw the dashboard.
///
/// Derived from a [`DashboardState`] on every render; holds no state of its
/// own.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub heading: &'static str,
    pub error: Option<String>,
    pub is_loading: bool,
    pub category_label: String,
    pub sort: SortKey,
    pub min_rating: Option<f64>,
    pub cards: Vec<ProductCard>,
    /// e.g. `Showing 10 of 25 products`
    pub summary: String,
    pub matching: usize,
    pub load_more_visible: bool,
    pub detail: Option<ProductDetail>,
}

impl DashboardView {
    pub fn from_state(state: &DashboardState) -> Self {
        Self {
            heading: DASHBOARD_HEADING,
            error: state.load_error.clone(),
            is_loading: state.is_loading,
            category_label: category_label(&state.criteria.category).to_string(),
            sort: state.sort,
            min_rating: state.criteria.min_rating,
            cards: state.visible_products().iter().map(ProductCard::from).collect(),
            summary: state.results_summary(),
            matching: state.ordered.len(),
            load_more_visible: state.has_more(),
            detail: state.selected_product().map(ProductDetail::from),
        }
    }
}
