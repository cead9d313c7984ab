pub mod client;
pub mod errors;
pub mod messages;
pub mod models;
pub mod services;

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use client::http::HttpAllocatorClient;
use client::traits::AllocatorApi;
use errors::CoreError;
use models::{
    allocation::AllocationResult,
    budget::PortfolioBudget,
    item::{Item, ItemId},
    notification::{Notification, NotificationChannel},
    settings::Settings,
    snapshot::{StoreSnapshot, StoreState},
};
use services::notification_timer::{NotificationTimer, DEFAULT_NOTIFICATION_TTL};
use services::validation;

/// Main entry point for the Portfolio Allocator core library.
///
/// Holds the local copy of the watch-list, the portfolio value and the last
/// allocation result, and keeps them in step with the backend. Every
/// operation catches its own failures and reports them on one of two
/// independent notification channels (ticker / portfolio); nothing is
/// returned as an error and nothing is retried.
///
/// Operations take `&self` and can be awaited concurrently. The state lock is
/// never held across a network call, so each resumed step applies its
/// update in one piece. Responses are applied in the order they return.
#[must_use]
pub struct PortfolioAllocator {
    api: Arc<dyn AllocatorApi>,
    state: Mutex<StoreState>,
    ticker_notice: NotificationTimer,
    portfolio_notice: NotificationTimer,
}

impl std::fmt::Debug for PortfolioAllocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state();
        f.debug_struct("PortfolioAllocator")
            .field("items", &state.items.len())
            .field("budget", &state.budget)
            .field("has_allocation", &state.allocation.is_some())
            .field("ticker_notice", &self.ticker_notice)
            .field("portfolio_notice", &self.portfolio_notice)
            .finish()
    }
}

impl PortfolioAllocator {
    /// Create a store on top of any `AllocatorApi`, with 2s notifications.
    pub fn new(api: Arc<dyn AllocatorApi>) -> Self {
        Self::with_notification_ttl(api, DEFAULT_NOTIFICATION_TTL)
    }

    pub fn with_notification_ttl(api: Arc<dyn AllocatorApi>, ttl: Duration) -> Self {
        Self {
            api,
            state: Mutex::new(StoreState::default()),
            ticker_notice: NotificationTimer::new(NotificationChannel::Ticker, ttl),
            portfolio_notice: NotificationTimer::new(NotificationChannel::Portfolio, ttl),
        }
    }

    /// Build the HTTP client and the store from validated settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, CoreError> {
        settings.validate()?;
        let api = Arc::new(HttpAllocatorClient::new(settings));
        Ok(Self::with_notification_ttl(
            api,
            Duration::from_millis(settings.notification_ttl_ms),
        ))
    }

    // ── Lifecycle ───────────────────────────────────────────────────

    /// Load the watch-list and the portfolio value side by side.
    /// Each fetch applies its own result as soon as it lands.
    pub async fn initialize(&self) {
        tokio::join!(self.refresh_items(), self.load_budget());
    }

    /// Re-fetch the watch-list and replace the local copy with it.
    /// On failure the current list stays and the ticker channel is notified.
    pub async fn refresh_items(&self) {
        match self.api.list_items().await {
            Ok(items) => {
                log::debug!("Loaded {} ticker(s)", items.len());
                self.state().items = items;
            }
            Err(e) => {
                log::warn!("Listing tickers failed: {e}");
                self.ticker_notice.show(messages::LOAD_TICKERS_FAILED);
            }
        }
    }

    /// Fetch the portfolio value. `null` from the server means unset.
    pub async fn load_budget(&self) {
        match self.api.get_budget().await {
            Ok(None) => self.state().budget = None,
            Ok(Some(value)) => match PortfolioBudget::new(value) {
                Some(budget) => self.state().budget = Some(budget),
                None => {
                    log::warn!("Server returned a non-positive portfolio value: {value}");
                    self.portfolio_notice.show(messages::LOAD_BUDGET_FAILED);
                }
            },
            Err(e) => {
                log::warn!("Loading portfolio value failed: {e}");
                self.portfolio_notice.show(messages::LOAD_BUDGET_FAILED);
            }
        }
    }

    // ── Watch-list ──────────────────────────────────────────────────

    /// Add `raw` to the watch-list. The text is used as typed (no case folding).
    /// On success the ticker input is cleared and the list is re-fetched.
    pub async fn submit_ticker(&self, raw: &str) {
        if !validation::is_valid_ticker(raw) {
            self.ticker_notice.show(messages::INVALID_TICKER);
            return;
        }

        match self.api.add_item(raw).await {
            Ok(item) => {
                log::debug!("Added ticker {} as {}", item.ticker, item.id);
                self.state().ticker_input.clear();
                self.refresh_items().await;
            }
            Err(e) => {
                log::warn!("Adding ticker {raw} failed: {e}");
                self.ticker_notice
                    .show(failure_message(&e, messages::ADD_TICKER_FAILED));
            }
        }
    }

    /// Submit whatever is currently in the ticker input.
    pub async fn submit_ticker_input(&self) {
        let raw = self.state().ticker_input.clone();
        self.submit_ticker(&raw).await;
    }

    /// Delete an entry, then re-fetch the list whether or not the delete worked.
    pub async fn delete_ticker(&self, id: &ItemId) {
        if let Err(e) = self.api.delete_item(id).await {
            log::warn!("Deleting ticker {id} failed: {e}");
            self.ticker_notice.show(messages::DELETE_TICKER_FAILED);
        }
        self.refresh_items().await;
    }

    // ── Portfolio value ─────────────────────────────────────────────

    /// Store a new portfolio value. On success the submitted number is kept
    /// locally as-is (no re-fetch) and the budget input is cleared.
    pub async fn submit_budget(&self, raw: &str) {
        let Some(budget) = validation::parse_positive_number(raw).and_then(PortfolioBudget::new)
        else {
            self.portfolio_notice.show(messages::INVALID_BUDGET);
            return;
        };

        match self.api.set_budget(budget.value()).await {
            Ok(()) => {
                let mut state = self.state();
                state.budget = Some(budget);
                state.budget_input.clear();
            }
            Err(e) => {
                log::warn!("Setting portfolio value to {} failed: {e}", budget.value());
                self.portfolio_notice
                    .show(failure_message(&e, messages::SET_BUDGET_FAILED));
            }
        }
    }

    /// Submit whatever is currently in the budget input.
    pub async fn submit_budget_input(&self) {
        let raw = self.state().budget_input.clone();
        self.submit_budget(&raw).await;
    }

    // ── Allocation ──────────────────────────────────────────────────

    /// Ask the backend to allocate the budget across the watch-list.
    ///
    /// Needs a budget and at least one ticker; otherwise nothing is sent.
    /// A failure leaves the previous result in place.
    pub async fn calculate_allocation(&self) {
        let (budget, tickers) = {
            let state = self.state();
            let tickers: Vec<String> = state.items.iter().map(|i| i.ticker.clone()).collect();
            (state.budget, tickers)
        };
        let Some(budget) = budget.filter(|_| !tickers.is_empty()) else {
            self.portfolio_notice.show(messages::MISSING_ALLOCATION_INPUTS);
            return;
        };

        match self.api.compute_allocation(budget.value(), &tickers).await {
            Ok(result) => {
                log::debug!("Allocation computed for {} ticker(s)", tickers.len());
                self.state().allocation = Some(result);
            }
            Err(e) => {
                log::warn!("Allocation failed: {e}");
                self.portfolio_notice
                    .show(failure_message(&e, messages::CALCULATE_FAILED));
            }
        }
    }

    /// Drop the displayed result, e.g. when leaving the results view.
    pub fn clear_allocation(&self) {
        self.state().allocation = None;
    }

    // ── Inputs ──────────────────────────────────────────────────────

    pub fn set_ticker_input(&self, text: impl Into<String>) {
        self.state().ticker_input = text.into();
    }

    pub fn set_budget_input(&self, text: impl Into<String>) {
        self.state().budget_input = text.into();
    }

    // ── Notifications ───────────────────────────────────────────────

    #[must_use]
    pub fn notification(&self, channel: NotificationChannel) -> Option<Notification> {
        self.timer(channel).current()
    }

    /// Clear both channels immediately.
    pub fn dismiss_notifications(&self) {
        self.ticker_notice.clear();
        self.portfolio_notice.clear();
    }

    // ── Reads ───────────────────────────────────────────────────────

    /// Copy of everything the presentation layer renders.
    #[must_use]
    pub fn snapshot(&self) -> StoreSnapshot {
        let state = self.state().clone();
        StoreSnapshot {
            items: state.items,
            budget: state.budget,
            allocation: state.allocation,
            ticker_input: state.ticker_input,
            budget_input: state.budget_input,
            ticker_notification: self.ticker_notice.current(),
            portfolio_notification: self.portfolio_notice.current(),
        }
    }

    #[must_use]
    pub fn items(&self) -> Vec<Item> {
        self.state().items.clone()
    }

    /// Tickers in list order, as they would be sent for allocation.
    #[must_use]
    pub fn tickers(&self) -> Vec<String> {
        self.state().items.iter().map(|i| i.ticker.clone()).collect()
    }

    #[must_use]
    pub fn find_item(&self, id: &ItemId) -> Option<Item> {
        self.state().items.iter().find(|i| &i.id == id).cloned()
    }

    #[must_use]
    pub fn budget(&self) -> Option<f64> {
        self.state().budget.map(PortfolioBudget::value)
    }

    #[must_use]
    pub fn allocation(&self) -> Option<AllocationResult> {
        self.state().allocation.clone()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn timer(&self, channel: NotificationChannel) -> &NotificationTimer {
        match channel {
            NotificationChannel::Ticker => &self.ticker_notice,
            NotificationChannel::Portfolio => &self.portfolio_notice,
        }
    }
}

/// Server-supplied text for explicit rejections, `fallback` for everything else.
fn failure_message(err: &CoreError, fallback: &str) -> String {
    match err {
        CoreError::Validation(msg) | CoreError::Computation(msg) => msg.clone(),
        CoreError::Transport(_) => fallback.to_string(),
    }
}
