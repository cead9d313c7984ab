use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::allocation::AllocationResult;
use crate::models::item::{Item, ItemId};

/// Remote resource store behind the allocator: the ticker watch-list, the
/// portfolio value singleton, and the allocation computation.
///
/// Every call is single-shot. Retrying, or turning a failure into something
/// the user sees, is the caller's job.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AllocatorApi: Send + Sync {
    /// Fetch the whole watch-list, in server order.
    async fn list_items(&self) -> Result<Vec<Item>, CoreError>;

    /// Create a watch-list entry. The server assigns the id.
    async fn add_item(&self, ticker: &str) -> Result<Item, CoreError>;

    async fn delete_item(&self, id: &ItemId) -> Result<(), CoreError>;

    /// Current portfolio value, or `None` when it has never been set.
    async fn get_budget(&self) -> Result<Option<f64>, CoreError>;

    async fn set_budget(&self, value: f64) -> Result<(), CoreError>;

    /// Ask the service to allocate `budget` across `tickers`.
    async fn compute_allocation(
        &self,
        budget: f64,
        tickers: &[String],
    ) -> Result<AllocationResult, CoreError>;
}
