// Product Dashboard - browse a remote product catalog
//
// This is the library crate containing the filter/sort engine, the dashboard
// state machine and the catalog loader. The binary crate (main.rs) provides
// the terminal entry point.

pub mod config;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod services;
pub mod state;
pub mod ui;

// Re-export commonly used types for convenience
pub use config::ConfigManager;
pub use metrics::Metrics;
pub use models::{DashboardConfig, DashboardState, FilterCriteria, Product, SortKey};
pub use state::{Action, StateChange, StateManager};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
