//! Services module - catalog loading and the filter/sort engine.
//!
//! Nothing in here knows about the terminal or any other presentation
//! surface.
//!
//! # Components
//!
//! - [`catalog`]: the pure filter/sort engine. [`filter_and_sort`] derives
//!   the ordered result list from the full collection, the
//!   [`FilterCriteria`](crate::models::FilterCriteria) and the
//!   [`SortKey`](crate::models::SortKey). It never fails and never mutates
//!   its inputs.
//!
//! - [`loader`]: the one-shot catalog fetch. [`ProductSource`] abstracts
//!   where products come from; [`HttpProductSource`] performs the single
//!   `GET`; [`load_catalog`] drives the loading indicator and delivers the
//!   result into the [`StateManager`](crate::state::StateManager).
//!
//! # Usage Example
//!
//! ```ignore
//! use product_dashboard::services::{HttpProductSource, load_catalog};
//!
//! let source = HttpProductSource::new(&config.endpoint, None)?;
//! match load_catalog(&source, &state_manager, &metrics).await {
//!     Ok(count) => tracing::info!("{} products available", count),
//!     Err(e) => tracing::warn!("Catalog unavailable: {}", e),
//! }
//! ```

pub mod catalog;
pub mod loader;

pub use catalog::{filter_and_sort, matches, matches_category, matches_price, matches_rating};
pub use loader::{HttpProductSource, LoadError, ProductSource, load_catalog};
