// Session metrics module
//
// Lightweight counters for the catalog fetch and the interactive session

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Session-wide metrics
///
/// Uses atomic operations so the loader task and the session loop can both
/// record without locks. Logged once at shutdown.
#[derive(Debug)]
pub struct Metrics {
    /// Catalog fetches that delivered a collection
    pub fetches_succeeded: AtomicU64,

    /// Catalog fetches that failed
    pub fetches_failed: AtomicU64,

    /// Time spent waiting on catalog fetches, in milliseconds
    pub fetch_time_ms: AtomicU64,

    /// User commands that were turned into actions
    pub commands_handled: AtomicU64,

    /// User input that could not be parsed
    pub invalid_commands: AtomicU64,

    /// Views rendered to the sink
    pub renders: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            fetches_succeeded: AtomicU64::new(0),
            fetches_failed: AtomicU64::new(0),
            fetch_time_ms: AtomicU64::new(0),
            commands_handled: AtomicU64::new(0),
            invalid_commands: AtomicU64::new(0),
            renders: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    pub fn record_fetch_succeeded(&self) {
        self.fetches_succeeded.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_failed(&self) {
        self.fetches_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_fetch_time(&self, duration: Duration) {
        self.fetch_time_ms
            .fetch_add(duration.as_millis() as u64, Ordering::Relaxed);
    }

    pub fn record_command(&self) {
        self.commands_handled.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_invalid_command(&self) {
        self.invalid_commands.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_render(&self) {
        self.renders.fetch_add(1, Ordering::Relaxed);
    }

    pub fn uptime(&self) -> Duration {
        self.start_time.elapsed()
    }

    /// Log metrics summary
    pub fn log_summary(&self) {
        tracing::info!("=== Session Metrics Summary ===");
        tracing::info!("Uptime: {:.2}s", self.uptime().as_secs_f64());
        tracing::info!(
            "Catalog fetches: {} succeeded, {} failed, {}ms waiting",
            self.fetches_succeeded.load(Ordering::Relaxed),
            self.fetches_failed.load(Ordering::Relaxed),
            self.fetch_time_ms.load(Ordering::Relaxed)
        );
        tracing::info!(
            "Commands: {} handled, {} invalid; renders: {}",
            self.commands_handled.load(Ordering::Relaxed),
            self.invalid_commands.load(Ordering::Relaxed),
            self.renders.load(Ordering::Relaxed)
        );
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_metrics_creation() {
        let metrics = Metrics::new();
        assert_eq!(metrics.fetches_succeeded.load(Ordering::Relaxed), 0);
        assert_eq!(metrics.renders.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_record_fetch() {
        let metrics = Metrics::new();

        metrics.record_fetch_failed();
        metrics.record_fetch_time(Duration::from_millis(250));
        metrics.record_fetch_time(Duration::from_millis(100));

        assert_eq!(metrics.fetches_failed.load(Ordering::Relaxed), 1);
        assert_eq!(metrics.fetch_time_ms.load(Ordering::Relaxed), 350);
    }

    #[test]
    fn test_concurrent_recording() {
        let metrics = Arc::new(Metrics::new());

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let metrics = Arc::clone(&metrics);
                thread::spawn(move || {
                    for _ in 0..100 {
                        metrics.record_render();
                        metrics.record_command();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(metrics.renders.load(Ordering::Relaxed), 400);
        assert_eq!(metrics.commands_handled.load(Ordering::Relaxed), 400);
    }
}
