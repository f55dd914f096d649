// Session Controller - wires user input, the catalog loader and the view
//
// This module contains the SessionController which coordinates between:
// - StateManager (dashboard state)
// - the catalog loader (one background fetch)
// - line-based user input
// - a ViewSink that draws DashboardViews
//
// It handles:
// - Spawning the catalog fetch without blocking input
// - Turning input lines into actions
// - Re-rendering once per batch of state change events

use crate::metrics::Metrics;
use crate::services::loader::{ProductSource, load_catalog};
use crate::state::{StateChange, StateManager};
use crate::ui::terminal::{Command, help_text};
use crate::ui::view::DashboardView;
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::RecvError, error::TryRecvError};
use tokio::task::JoinHandle;

/// Where rendered dashboards go.
#[cfg_attr(test, mockall::automock)]
pub trait ViewSink {
    /// Draw the full dashboard.
    fn render(&mut self, view: &DashboardView) -> Result<()>;

    /// Show a one-off message (help text, input errors).
    fn notice(&mut self, message: &str) -> Result<()>;
}

/// What the session loop should do after handling an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Drives one interactive dashboard session
///
/// # Example
/// ```ignore
/// let state_manager = Arc::new(StateManager::with_state(DashboardState::from_config(&config)));
/// let controller = SessionController::new(state_manager, Arc::new(Metrics::new()));
///
/// let source = Arc::new(HttpProductSource::new(&config.endpoint, None)?);
/// let stdin = tokio::io::BufReader::new(tokio::io::stdin());
/// let mut sink = TerminalSink::new(std::io::stdout());
/// controller.run(source, stdin, &mut sink).await?;
/// ```
pub struct SessionController {
    state_manager: Arc<StateManager>,
    metrics: Arc<Metrics>,
}

impl SessionController {
    pub fn new(state_manager: Arc<StateManager>, metrics: Arc<Metrics>) -> Self {
        Self {
            state_manager,
            metrics,
        }
    }

    pub fn state_manager(&self) -> &Arc<StateManager> {
        &self.state_manager
    }

    /// Start the one-shot catalog fetch as a background task.
    ///
    /// The loading indicator is switched on before the task is spawned, so
    /// it is already visible on the first render. The task is never
    /// cancelled; if the source never resolves the indicator stays on for
    /// the rest of the session.
    pub fn spawn_loader<S>(&self, source: Arc<S>) -> JoinHandle<()>
    where
        S: ProductSource + Send + Sync + 'static,
    {
        self.state_manager.begin_loading();

        let state = Arc::clone(&self.state_manager);
        let metrics = Arc::clone(&self.metrics);

        tokio::spawn(async move {
            if let Err(e) = load_catalog(source.as_ref(), &state, &metrics).await {
                tracing::warn!("Catalog unavailable for this session: {}", e);
            }
        })
    }

    /// Run the session until `quit` or end of input.
    ///
    /// Input keeps being accepted while the catalog is loading; commands
    /// simply act on an empty collection until it arrives.
    pub async fn run<S, R, V>(&self, source: Arc<S>, input: R, sink: &mut V) -> Result<()>
    where
        S: ProductSource + Send + Sync + 'static,
        R: AsyncBufRead + Unpin,
        V: ViewSink,
    {
        let mut changes = self.state_manager.subscribe();
        let _loader = self.spawn_loader(source);

        self.render(sink)?;

        let mut lines = input.lines();
        loop {
            tokio::select! {
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read input")? else {
                        tracing::info!("Input closed, ending session");
                        break;
                    };
                    if self.handle_line(&line, sink)? == Flow::Quit {
                        tracing::info!("Quit requested");
                        break;
                    }
                }
                change = changes.recv() => {
                    match change {
                        Ok(change) => tracing::debug!(?change, "State changed"),
                        Err(RecvError::Lagged(skipped)) => {
                            tracing::warn!("View lagged behind by {} state changes", skipped);
                        }
                        Err(RecvError::Closed) => break,
                    }
                    drain(&mut changes);
                    self.render(sink)?;
                }
            }
        }

        Ok(())
    }

    /// Parse one input line and apply it.
    pub fn handle_line<V: ViewSink>(&self, line: &str, sink: &mut V) -> Result<Flow> {
        if line.trim().is_empty() {
            return Ok(Flow::Continue);
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                tracing::debug!("Rejected input '{}': {}", line, e);
                self.metrics.record_invalid_command();
                sink.notice(&e.to_string())?;
                return Ok(Flow::Continue);
            }
        };

        self.metrics.record_command();

        match command {
            Command::Quit => Ok(Flow::Quit),
            Command::Help => {
                sink.notice(&help_text())?;
                Ok(Flow::Continue)
            }
            other => {
                if let Some(action) = other.into_action() {
                    let changes = self.state_manager.dispatch(action);
                    if changes.is_empty() {
                        tracing::debug!("Command '{}' changed nothing", line.trim());
                    }
                }
                Ok(Flow::Continue)
            }
        }
    }

    fn render<V: ViewSink>(&self, sink: &mut V) -> Result<()> {
        let view = self.state_manager.read(DashboardView::from_state);
        sink.render(&view)?;
        self.metrics.record_render();
        Ok(())
    }
}

/// Discard queued change events so a burst produces a single render.
fn drain(changes: &mut broadcast::Receiver<StateChange>) {
    loop {
        match changes.try_recv() {
            Ok(_) | Err(TryRecvError::Lagged(_)) => continue,
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Product, SortKey};
    use crate::services::loader::LoadError;
    use std::sync::atomic::Ordering;

    struct StaticSource(Vec<Product>);

    impl ProductSource for StaticSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, LoadError> {
            Ok(self.0.clone())
        }
    }

    /// Never resolves, like a request that hangs forever.
    struct PendingSource;

    impl ProductSource for PendingSource {
        async fn fetch_products(&self) -> Result<Vec<Product>, LoadError> {
            std::future::pending().await
        }
    }

    fn controller() -> SessionController {
        SessionController::new(Arc::new(StateManager::new()), Arc::new(Metrics::new()))
    }

    fn permissive_sink() -> MockViewSink {
        let mut sink = MockViewSink::new();
        sink.expect_render().returning(|_| Ok(()));
        sink.expect_notice().returning(|_| Ok(()));
        sink
    }

    #[tokio::test]
    async fn test_commands_accepted_while_loading() {
        let controller = controller();
        let input = tokio_test::io::Builder::new()
            .read(b"sort highToLow\n")
            .read(b"category jewelery\n")
            .read(b"quit\n")
            .build();
        let mut sink = permissive_sink();

        controller
            .run(Arc::new(PendingSource), tokio::io::BufReader::new(input), &mut sink)
            .await
            .unwrap();

        let state = controller.state_manager().snapshot();
        assert!(state.is_loading);
        assert_eq!(state.sort, SortKey::PriceDescending);
        assert_eq!(state.criteria.category, "jewelery");
        assert!(state.ordered.is_empty());
    }

    #[tokio::test]
    async fn test_first_render_shows_loading() {
        let controller = controller();
        let input = tokio_test::io::Builder::new().read(b"quit\n").build();

        let seen = Arc::new(std::sync::Mutex::new(Vec::new()));
        let recorded = Arc::clone(&seen);
        let mut sink = MockViewSink::new();
        sink.expect_render().returning(move |view| {
            recorded.lock().unwrap().push(view.is_loading);
            Ok(())
        });
        sink.expect_notice().never();

        controller
            .run(Arc::new(PendingSource), tokio::io::BufReader::new(input), &mut sink)
            .await
            .unwrap();

        let seen = seen.lock().unwrap();
        assert_eq!(seen.first(), Some(&true));
        assert!(controller.state_manager().read(|s| s.is_loading));
    }

    #[tokio::test]
    async fn test_end_of_input_ends_session() {
        let controller = controller();
        let input = tokio_test::io::Builder::new().read(b"more\n").build();
        let mut sink = permissive_sink();

        controller
            .run(Arc::new(StaticSource(Vec::new())), tokio::io::BufReader::new(input), &mut sink)
            .await
            .unwrap();

        assert_eq!(controller.state_manager().read(|s| s.reveal_count), 20);
    }

    #[tokio::test]
    async fn test_initial_render_happens() {
        let controller = controller();
        let input = tokio_test::io::Builder::new().read(b"quit\n").build();

        let mut sink = MockViewSink::new();
        sink.expect_render()
            .withf(|view| view.heading == crate::ui::view::DASHBOARD_HEADING)
            .times(1..)
            .returning(|_| Ok(()));
        sink.expect_notice().never();

        controller
            .run(Arc::new(PendingSource), tokio::io::BufReader::new(input), &mut sink)
            .await
            .unwrap();

        assert!(controller.metrics.renders.load(Ordering::Relaxed) >= 1);
    }

    #[test]
    fn test_invalid_input_reported() {
        let controller = controller();
        let mut sink = MockViewSink::new();
        sink.expect_notice()
            .withf(|message| message.contains("unknown command 'dance'"))
            .times(1)
            .returning(|_| Ok(()));

        let flow = controller.handle_line("dance", &mut sink).unwrap();

        assert_eq!(flow, Flow::Continue);
        assert_eq!(controller.metrics.invalid_commands.load(Ordering::Relaxed), 1);
    }

    #[test]
    fn test_help_shows_notice() {
        let controller = controller();
        let mut sink = MockViewSink::new();
        sink.expect_notice()
            .withf(|message| message.starts_with("Commands:"))
            .times(1)
            .returning(|_| Ok(()));

        assert_eq!(controller.handle_line("help", &mut sink).unwrap(), Flow::Continue);
    }

    #[test]
    fn test_blank_line_ignored() {
        let controller = controller();
        let mut sink = MockViewSink::new();

        assert_eq!(controller.handle_line("   ", &mut sink).unwrap(), Flow::Continue);
        assert_eq!(controller.metrics.commands_handled.load(Ordering::Relaxed), 0);
    }

    #[tokio::test]
    async fn test_loader_populates_state() {
        let controller = controller();
        let products = vec![Product {
            id: 1,
            title: "Lamp".to_string(),
            category: "electronics".to_string(),
            price: 12.5,
            image: String::new(),
            description: String::new(),
            rating: None,
        }];

        controller
            .spawn_loader(Arc::new(StaticSource(products)))
            .await
            .unwrap();

        let state = controller.state_manager().snapshot();
        assert!(!state.is_loading);
        assert_eq!(state.ordered.len(), 1);
    }
}
