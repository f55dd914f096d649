use crate::models::config::{DEFAULT_PAGE_SIZE, DashboardConfig};
use crate::models::criteria::{FilterCriteria, SortKey};
use crate::models::product::{Product, ProductId};
use std::sync::Arc;

/// Message shown for any failure of the initial catalog fetch.
pub const LOAD_FAILURE_MESSAGE: &str = "Failed to load products. Please try again later.";

/// How the reveal count grows and whether criteria changes reset it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    pub page_size: usize,
    pub initial_reveal: usize,
    pub reset_on_criteria_change: bool,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            initial_reveal: DEFAULT_PAGE_SIZE,
            reset_on_criteria_change: false,
        }
    }
}

/// Single source of truth for the dashboard.
///
/// `DashboardState` is never mutated in place by callers: every transition
/// goes through [`crate::state::reduce`], which returns the next state, and
/// [`crate::state::StateManager`] swaps it in. The loaded collection sits
/// behind an `Arc` so cloning a state to derive the next one stays cheap.
///
/// `ordered` is derived data. It is only refreshed by
/// [`StateManager::dispatch`](crate::state::StateManager::dispatch) after
/// actions that touch the collection, the criteria or the sort key.
#[derive(Clone, Debug)]
pub struct DashboardState {
    // Catalog
    pub products: Arc<Vec<Product>>,
    pub ordered: Vec<Product>,

    // Criteria
    pub criteria: FilterCriteria,
    pub sort: SortKey,

    // Presentation
    pub reveal_count: usize,
    pub selected: Option<ProductId>,
    pub pagination: Pagination,

    // Loading
    pub is_loading: bool,
    pub load_error: Option<String>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::with_pagination(Pagination::default(), FilterCriteria::default())
    }
}

impl DashboardState {
    pub fn with_pagination(pagination: Pagination, criteria: FilterCriteria) -> Self {
        Self {
            products: Arc::new(Vec::new()),
            ordered: Vec::new(),
            criteria,
            sort: SortKey::None,
            reveal_count: pagination.initial_reveal,
            selected: None,
            pagination,
            is_loading: false,
            load_error: None,
        }
    }

    /// Build the startup state from configuration.
    pub fn from_config(config: &DashboardConfig) -> Self {
        let pagination = Pagination {
            page_size: config.page_size,
            initial_reveal: config.initial_reveal,
            reset_on_criteria_change: config.reset_reveal_on_criteria_change,
        };
        Self::with_pagination(
            pagination,
            FilterCriteria::with_price_range(config.default_price_range),
        )
    }

    /// The revealed prefix of the ordered list.
    pub fn visible_products(&self) -> &[Product] {
        let end = self.reveal_count.min(self.ordered.len());
        &self.ordered[..end]
    }

    /// Whether a "load more" step would reveal anything.
    pub fn has_more(&self) -> bool {
        self.reveal_count < self.ordered.len()
    }

    pub fn find_product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// The product shown in the detail overlay, if any.
    pub fn selected_product(&self) -> Option<&Product> {
        self.selected.and_then(|id| self.find_product(id))
    }

    /// Short description of the result list, e.g. `Showing 10 of 25 products`.
    pub fn results_summary(&self) -> String {
        if self.ordered.is_empty() {
            return "No products match the current filters".to_string();
        }

        format!(
            "Showing {} of {} products",
            self.visible_products().len(),
            self.ordered.len()
        )
    }
}
