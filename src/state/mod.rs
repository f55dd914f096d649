// State management module
//
// The dashboard state is transformed by a pure reducer. StateManager owns the
// current state behind Arc<RwLock<T>>, re-derives the ordered product list
// after catalog-touching actions and emits change events for the view.

use crate::models::{
    DashboardState, FilterCriteria, PriceRange, Product, ProductId, SortKey, normalize_min_rating,
};
use crate::services::catalog;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

/// Every transition the dashboard knows about.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    /// The catalog fetch has been issued
    LoadStarted,

    /// The catalog fetch delivered the whole collection
    ProductsLoaded(Vec<Product>),

    /// The catalog fetch failed; carries the user-facing message
    LoadFailed(String),

    /// Empty string clears the category constraint
    SetCategory(String),

    SetSort(SortKey),

    /// Raw minimum rating; zero and NaN clear the constraint
    SetMinRating(f64),

    SetPriceRange(PriceRange),

    /// Reveal one more page of results
    RevealMore,

    SelectForDetail(ProductId),

    DismissDetail,
}

impl Action {
    /// Whether the ordered list must be re-derived after this action.
    pub fn touches_catalog(&self) -> bool {
        matches!(
            self,
            Action::ProductsLoaded(_)
                | Action::LoadFailed(_)
                | Action::SetCategory(_)
                | Action::SetSort(_)
                | Action::SetMinRating(_)
                | Action::SetPriceRange(_)
        )
    }

    /// Short name for logging; avoids dumping whole product lists.
    pub fn name(&self) -> &'static str {
        match self {
            Action::LoadStarted => "LoadStarted",
            Action::ProductsLoaded(_) => "ProductsLoaded",
            Action::LoadFailed(_) => "LoadFailed",
            Action::SetCategory(_) => "SetCategory",
            Action::SetSort(_) => "SetSort",
            Action::SetMinRating(_) => "SetMinRating",
            Action::SetPriceRange(_) => "SetPriceRange",
            Action::RevealMore => "RevealMore",
            Action::SelectForDetail(_) => "SelectForDetail",
            Action::DismissDetail => "DismissDetail",
        }
    }

    fn changes_criteria(&self) -> bool {
        matches!(
            self,
            Action::SetCategory(_)
                | Action::SetSort(_)
                | Action::SetMinRating(_)
                | Action::SetPriceRange(_)
        )
    }
}

/// Apply `action` to `state` and return the next state.
///
/// Pure: `state` is left untouched and no I/O happens. The derived
/// `ordered` list is carried over as-is; deriving it again is the caller's
/// job (see [`StateManager::dispatch`]).
pub fn reduce(state: &DashboardState, action: Action) -> DashboardState {
    let mut next = state.clone();
    let changes_criteria = action.changes_criteria();

    match action {
        Action::LoadStarted => {
            next.is_loading = true;
            next.load_error = None;
        }
        Action::ProductsLoaded(products) => {
            next.products = Arc::new(products);
            next.is_loading = false;
            next.load_error = None;
            if next.selected.is_some_and(|id| next.find_product(id).is_none()) {
                next.selected = None;
            }
        }
        Action::LoadFailed(message) => {
            next.products = Arc::new(Vec::new());
            next.is_loading = false;
            next.load_error = Some(message);
            next.selected = None;
        }
        Action::SetCategory(category) => {
            next.criteria.category = category;
        }
        Action::SetSort(sort) => {
            next.sort = sort;
        }
        Action::SetMinRating(value) => {
            next.criteria.min_rating = normalize_min_rating(value);
        }
        Action::SetPriceRange(range) => {
            next.criteria.price_range = range;
        }
        Action::RevealMore => {
            next.reveal_count = next.reveal_count.saturating_add(next.pagination.page_size);
        }
        Action::SelectForDetail(id) => {
            if next.find_product(id).is_some() {
                next.selected = Some(id);
            } else {
                tracing::warn!("Ignoring detail request for unknown product {}", id);
            }
        }
        Action::DismissDetail => {
            next.selected = None;
        }
    }

    // Only an actual change of criteria or sort restarts the reveal count
    if changes_criteria
        && next.pagination.reset_on_criteria_change
        && (next.criteria != state.criteria || next.sort != state.sort)
    {
        next.reveal_count = next.pagination.initial_reveal;
    }

    next
}

/// Change events emitted when state is modified
///
/// These let the view re-render without polling the state.
#[derive(Clone, Debug, PartialEq)]
pub enum StateChange {
    /// Loading indicator toggled
    LoadingChanged { is_loading: bool },

    /// Product collection delivered
    CatalogLoaded { count: usize },

    /// Product collection could not be loaded
    LoadFailed { message: String },

    /// Filter criteria or sort key changed
    CriteriaChanged { criteria: FilterCriteria, sort: SortKey },

    /// The ordered list or its revealed slice changed
    ResultsChanged {
        matching: usize,
        visible: usize,
        has_more: bool,
    },

    /// Detail overlay opened for a product
    DetailShown { product_id: ProductId },

    /// Detail overlay closed
    DetailDismissed,
}

/// Thread-safe state manager with event emission
///
/// This is the central state component that:
/// - Owns the current [`DashboardState`] behind `Arc<RwLock<T>>`
/// - Applies [`Action`]s through [`reduce`]
/// - Re-runs the filter/sort engine after actions that touch the catalog
/// - Detects what changed and emits [`StateChange`] events on a tokio
///   broadcast channel
///
/// Clones share the same state and channel.
pub struct StateManager {
    state: Arc<RwLock<DashboardState>>,

    /// Multiple subscribers can listen for state changes
    state_tx: broadcast::Sender<StateChange>,
}

impl StateManager {
    /// Create a new StateManager with default state
    pub fn new() -> Self {
        Self::with_state(DashboardState::default())
    }

    /// Create a StateManager starting from `initial`
    ///
    /// # Returns
    /// A new StateManager with a broadcast channel buffer of 100 events
    pub fn with_state(initial: DashboardState) -> Self {
        let (state_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(initial)),
            state_tx,
        }
    }

    /// Get a copy of the current state
    pub fn snapshot(&self) -> DashboardState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Execute a function with read access to the state
    ///
    /// # Example
    /// ```ignore
    /// let has_more = state_manager.read(|state| state.has_more());
    /// ```
    pub fn read<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&DashboardState) -> R,
    {
        let state = self.state.read().unwrap_or_else(PoisonError::into_inner);
        f(&state)
    }

    /// Apply an action and emit change events
    ///
    /// This is the only way to modify state. It:
    /// 1. Runs the pure reducer
    /// 2. Re-derives the ordered list if the action touched the catalog
    /// 3. Detects what changed
    /// 4. Emits the corresponding events
    ///
    /// # Returns
    /// The StateChange events that were emitted
    pub fn dispatch(&self, action: Action) -> Vec<StateChange> {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        let recompute = action.touches_catalog();
        tracing::debug!(action = action.name(), "Dispatching action");

        let mut next = reduce(&state, action);
        if recompute {
            next.ordered = catalog::filter_and_sort(&next.products, &next.criteria, next.sort);
        }

        let changes = Self::detect_changes(&state, &next);
        *state = next;
        drop(state);

        for change in &changes {
            // No subscribers is fine
            let _ = self.state_tx.send(change.clone());
        }

        changes
    }

    /// Subscribe to state change events
    pub fn subscribe(&self) -> broadcast::Receiver<StateChange> {
        self.state_tx.subscribe()
    }

    fn detect_changes(old: &DashboardState, new: &DashboardState) -> Vec<StateChange> {
        let mut changes = Vec::new();

        if old.is_loading != new.is_loading {
            changes.push(StateChange::LoadingChanged {
                is_loading: new.is_loading,
            });
        }

        if !Arc::ptr_eq(&old.products, &new.products) && new.load_error.is_none() {
            changes.push(StateChange::CatalogLoaded {
                count: new.products.len(),
            });
        }

        if old.load_error != new.load_error {
            if let Some(message) = &new.load_error {
                changes.push(StateChange::LoadFailed {
                    message: message.clone(),
                });
            }
        }

        if old.criteria != new.criteria || old.sort != new.sort {
            changes.push(StateChange::CriteriaChanged {
                criteria: new.criteria.clone(),
                sort: new.sort,
            });
        }

        if old.ordered != new.ordered || old.reveal_count != new.reveal_count {
            changes.push(StateChange::ResultsChanged {
                matching: new.ordered.len(),
                visible: new.visible_products().len(),
                has_more: new.has_more(),
            });
        }

        if old.selected != new.selected {
            match new.selected {
                Some(product_id) => changes.push(StateChange::DetailShown { product_id }),
                None => changes.push(StateChange::DetailDismissed),
            }
        }

        changes
    }

    // Convenience methods for each action

    pub fn begin_loading(&self) -> Vec<StateChange> {
        self.dispatch(Action::LoadStarted)
    }

    pub fn products_loaded(&self, products: Vec<Product>) -> Vec<StateChange> {
        self.dispatch(Action::ProductsLoaded(products))
    }

    pub fn load_failed(&self, message: String) -> Vec<StateChange> {
        self.dispatch(Action::LoadFailed(message))
    }

    pub fn set_category(&self, category: impl Into<String>) -> Vec<StateChange> {
        self.dispatch(Action::SetCategory(category.into()))
    }

    pub fn set_sort(&self, sort: SortKey) -> Vec<StateChange> {
        self.dispatch(Action::SetSort(sort))
    }

    pub fn set_min_rating(&self, value: f64) -> Vec<StateChange> {
        self.dispatch(Action::SetMinRating(value))
    }

    pub fn set_price_range(&self, range: PriceRange) -> Vec<StateChange> {
        self.dispatch(Action::SetPriceRange(range))
    }

    pub fn reveal_more(&self) -> Vec<StateChange> {
        self.dispatch(Action::RevealMore)
    }

    pub fn select_for_detail(&self, id: ProductId) -> Vec<StateChange> {
        self.dispatch(Action::SelectForDetail(id))
    }

    pub fn dismiss_detail(&self) -> Vec<StateChange> {
        self.dispatch(Action::DismissDetail)
    }
}

impl Default for StateManager {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for StateManager {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            state_tx: self.state_tx.clone(),
        }
    }
}
