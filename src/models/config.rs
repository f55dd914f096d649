use crate::models::criteria::{DEFAULT_PRICE_RANGE, PriceRange};
use serde::{Deserialize, Serialize};

/// Endpoint serving the product collection as a JSON array.
pub const DEFAULT_ENDPOINT: &str = "https://fakestoreapi.com/products";

/// Number of products revealed per "load more" step.
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Dashboard configuration from `dashboard.yaml`
///
/// Every field has a default, so a missing file or a partial file is valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Product collection endpoint
    pub endpoint: String,

    /// Request timeout in seconds; unset means the request may wait forever
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_timeout_secs: Option<u64>,

    /// Products revealed per "load more"
    pub page_size: usize,

    /// Products revealed before the first "load more"
    pub initial_reveal: usize,

    /// Price bounds applied at startup
    pub default_price_range: PriceRange,

    /// Reset the reveal count to `initial_reveal` whenever filters or sort change
    pub reset_reveal_on_criteria_change: bool,

    pub logging: LoggingSettings,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            request_timeout_secs: None,
            page_size: DEFAULT_PAGE_SIZE,
            initial_reveal: DEFAULT_PAGE_SIZE,
            default_price_range: DEFAULT_PRICE_RANGE,
            reset_reveal_on_criteria_change: false,
            logging: LoggingSettings::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Directory for rotating log files
    pub directory: String,

    /// File name prefix for log files
    pub prefix: String,

    #[serde(rename = "debug")]
    pub debug_mode: bool,

    /// Mirror log output to stderr
    #[serde(rename = "console")]
    pub console_output: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            prefix: "product-dashboard".to_string(),
            debug_mode: false,
            console_output: false,
        }
    }
}
