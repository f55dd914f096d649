//! Data models for the product dashboard.
//!
//! - [`Product`]: a catalog entry as delivered by the product endpoint
//! - [`FilterCriteria`] and [`SortKey`]: what the user has asked to see
//! - [`DashboardState`]: the immutable-update state object driven by
//!   [`crate::state::reduce`]
//! - [`DashboardConfig`]: settings loaded from `dashboard.yaml`

pub mod app_state;
pub mod config;
pub mod criteria;
pub mod product;

pub use app_state::{DashboardState, LOAD_FAILURE_MESSAGE, Pagination};
pub use config::{DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, DashboardConfig, LoggingSettings};
pub use criteria::{
    CATEGORY_OPTIONS, DEFAULT_PRICE_RANGE, FilterCriteria, PriceRange, SortKey,
    category_label, normalize_min_rating, parse_min_rating,
};
pub use product::{Product, ProductId, Rating};
