use crate::metrics::Metrics;
use crate::models::{LOAD_FAILURE_MESSAGE, Product};
use crate::state::StateManager;
use std::future::Future;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Errors that can occur while fetching the product collection
///
/// The user only ever sees [`LOAD_FAILURE_MESSAGE`]; the variants exist for
/// the logs.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Endpoint returned status {0}")]
    Status(u16),

    #[error("Malformed product payload: {0}")]
    Malformed(String),

    #[error("Invalid endpoint configuration: {0}")]
    InvalidEndpoint(String),
}

impl From<reqwest::Error> for LoadError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            LoadError::Malformed(err.to_string())
        } else if let Some(status) = err.status() {
            LoadError::Status(status.as_u16())
        } else if err.is_builder() {
            LoadError::InvalidEndpoint(err.to_string())
        } else {
            LoadError::Network(err.to_string())
        }
    }
}

/// Something that can deliver the full product collection in one go.
pub trait ProductSource {
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, LoadError>> + Send;
}

/// Fetches the collection with a single `GET` to a fixed endpoint.
///
/// No query parameters, headers or authentication are sent; filtering,
/// sorting and pagination all happen client-side.
#[derive(Debug, Clone)]
pub struct HttpProductSource {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpProductSource {
    /// Create a source for `endpoint`
    ///
    /// # Arguments
    /// * `endpoint` - URL returning a JSON array of products
    /// * `timeout` - Optional request timeout; `None` waits indefinitely
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, LoadError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ProductSource for HttpProductSource {
    async fn fetch_products(&self) -> Result<Vec<Product>, LoadError> {
        tracing::debug!("GET {}", self.endpoint);

        let response = self.client.get(&self.endpoint).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let products = response.json::<Vec<Product>>().await?;
        Ok(products)
    }
}

/// Run the one-shot catalog load against `state`.
///
/// Turns the loading indicator on, awaits `source` exactly once, then
/// delivers either the whole collection or the load-failure message. There
/// is no retry: a failed load leaves the collection empty for the session.
///
/// # Returns
/// The number of products loaded, or the underlying error (already
/// reflected in `state` by the time it is returned)
pub async fn load_catalog<S>(
    source: &S,
    state: &StateManager,
    metrics: &Metrics,
) -> Result<usize, LoadError>
where
    S: ProductSource,
{
    state.begin_loading();
    let started = Instant::now();

    let result = source.fetch_products().await;
    metrics.record_fetch_time(started.elapsed());

    match result {
        Ok(products) => {
            let count = products.len();
            tracing::info!(
                "Loaded {} products in {:.0}ms",
                count,
                started.elapsed().as_secs_f64() * 1000.0
            );
            metrics.record_fetch_succeeded();
            state.products_loaded(products);
            Ok(count)
        }
        Err(e) => {
            tracing::error!("Failed to load products: {}", e);
            metrics.record_fetch_failed();
            state.load_failed(LOAD_FAILURE_MESSAGE.to_string());
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StateChange;

    struct StaticSource(Vec<Product>);

    impl ProductSource for StaticSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, LoadError> {
            Ok(self.0.clone())
        }
    }

    struct FailingSource;

    impl ProductSource for FailingSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, LoadError> {
            Err(LoadError::Status(503))
        }
    }

    fn product(id: u64) -> Product {
        Product {
            id,
            title: format!("Product {}", id),
            category: "electronics".to_string(),
            price: 10.0 * id as f64,
            image: String::new(),
            description: String::new(),
            rating: None,
        }
    }

    #[tokio::test]
    async fn test_load_success_populates_state() {
        let state = StateManager::new();
        let metrics = Metrics::new();
        let mut rx = state.subscribe();

        let count = load_catalog(&StaticSource(vec![product(1), product(2)]), &state, &metrics)
            .await
            .unwrap();

        assert_eq!(count, 2);
        let snapshot = state.snapshot();
        assert!(!snapshot.is_loading);
        assert!(snapshot.load_error.is_none());
        assert_eq!(snapshot.products.len(), 2);
        assert_eq!(snapshot.ordered.len(), 2);

        assert_eq!(
            rx.try_recv().unwrap(),
            StateChange::LoadingChanged { is_loading: true }
        );
    }

    #[tokio::test]
    async fn test_load_failure_sets_single_message() {
        let state = StateManager::new();
        let metrics = Metrics::new();

        let result = load_catalog(&FailingSource, &state, &metrics).await;

        assert!(matches!(result, Err(LoadError::Status(503))));
        let snapshot = state.snapshot();
        assert!(!snapshot.is_loading);
        assert_eq!(snapshot.load_error.as_deref(), Some(LOAD_FAILURE_MESSAGE));
        assert!(snapshot.products.is_empty());
        assert!(snapshot.ordered.is_empty());
        assert!(!snapshot.has_more());
    }

    #[test]
    fn test_load_error_display() {
        assert_eq!(LoadError::Status(404).to_string(), "Endpoint returned status 404");
        assert!(
            LoadError::Malformed("expected array".to_string())
                .to_string()
                .contains("expected array")
        );
    }
}
