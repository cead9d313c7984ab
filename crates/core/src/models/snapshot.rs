use serde::Serialize;

use super::allocation::AllocationResult;
use super::budget::PortfolioBudget;
use super::item::Item;
use super::notification::Notification;

/// Mutable state owned by the store. Notifications live in their timers.
#[derive(Debug, Clone, Default)]
pub(crate) struct StoreState {
    pub items: Vec<Item>,
    pub budget: Option<PortfolioBudget>,
    pub allocation: Option<AllocationResult>,
    pub ticker_input: String,
    pub budget_input: String,
}

/// Point-in-time copy of everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    /// Watch-list in server response order.
    pub items: Vec<Item>,
    pub budget: Option<PortfolioBudget>,
    pub allocation: Option<AllocationResult>,
    pub ticker_input: String,
    pub budget_input: String,
    pub ticker_notification: Option<Notification>,
    pub portfolio_notification: Option<Notification>,
}

impl StoreSnapshot {
    /// Budget as a plain number, if set.
    pub fn budget_value(&self) -> Option<f64> {
        self.budget.map(PortfolioBudget::value)
    }

    /// Whether `calculate_allocation` would reach the network.
    pub fn can_calculate(&self) -> bool {
        self.budget.is_some() && !self.items.is_empty()
    }
}
