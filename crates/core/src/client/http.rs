use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use super::traits::AllocatorApi;
use crate::errors::CoreError;
use crate::messages;
use crate::models::allocation::AllocationResult;
use crate::models::item::{Item, ItemId};
use crate::models::settings::Settings;

/// reqwest-backed client for the allocator backend.
///
/// Endpoints: `/items`, `/items/{id}`, `/portfolio`, `/calculate_portfolio`.
/// Errors carry the server's `{error}` message whenever the body has one.
pub struct HttpAllocatorClient {
    client: Client,
    base_url: String,
}

impl HttpAllocatorClient {
    pub fn new(settings: &Settings) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match settings.request_timeout_secs {
            Some(secs) => builder.timeout(Duration::from_secs(secs)),
            None => builder,
        };
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: settings.normalized_base_url().to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for HttpAllocatorClient {
    fn default() -> Self {
        Self::new(&Settings::default())
    }
}

// ── Wire types ──────────────────────────────────────────────────────

#[derive(Serialize)]
struct NewItemRequest<'a> {
    ticker: &'a str,
}

#[derive(Serialize)]
struct SetBudgetRequest {
    value: f64,
}

#[derive(Serialize)]
struct AllocationRequest<'a> {
    budget: f64,
    stocks: &'a [String],
}

#[derive(Deserialize)]
struct BudgetResponse {
    portfolio_value: Option<f64>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// What a non-success status means for a given endpoint.
#[derive(Debug, Clone, Copy)]
enum Rejection {
    /// 4xx with `{error}` is a validation failure.
    Input,
    /// Any status with `{error}` is a computation failure.
    Computation,
    /// Always a transport failure.
    Transport,
}

/// Pull the `{error}` message out of a failure body, if there is one.
fn parse_error_message(body: &str) -> Option<String> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .filter(|msg| !msg.trim().is_empty())
}

fn classify_failure(status: StatusCode, body: &str, rejection: Rejection) -> CoreError {
    let server_message = parse_error_message(body);
    match (rejection, server_message) {
        (Rejection::Input, Some(msg)) if status.is_client_error() => CoreError::Validation(msg),
        (Rejection::Computation, Some(msg)) => CoreError::Computation(msg),
        (_, Some(msg)) => CoreError::Transport(format!("HTTP {}: {msg}", status.as_u16())),
        (_, None) => CoreError::Transport(format!("Unexpected HTTP status {status}")),
    }
}

/// Turn a non-success response into the right `CoreError`.
async fn check_status(resp: Response, rejection: Rejection) -> Result<Response, CoreError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(classify_failure(status, &body, rejection))
}

async fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T, CoreError> {
    let bytes = resp.bytes().await?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Parse an allocation body. The service writes a bare `NaN` Sharpe ratio
/// when nothing could be bought, which is not valid JSON.
fn parse_allocation(body: &[u8]) -> Result<AllocationResult, CoreError> {
    serde_json::from_slice(body).map_err(|e| {
        if has_bare_nan(body) {
            CoreError::Computation(messages::BUDGET_TOO_SMALL.to_string())
        } else {
            e.into()
        }
    })
}

/// Whether `NaN` appears as a value, outside any string literal.
fn has_bare_nan(body: &[u8]) -> bool {
    let mut in_string = false;
    let mut escaped = false;
    for (i, &b) in body.iter().enumerate() {
        if in_string {
            match b {
                _ if escaped => escaped = false,
                b'\\' => escaped = true,
                b'"' => in_string = false,
                _ => {}
            }
        } else if b == b'"' {
            in_string = true;
        } else if body[i..].starts_with(b"NaN") {
            return true;
        }
    }
    false
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AllocatorApi for HttpAllocatorClient {
    async fn list_items(&self) -> Result<Vec<Item>, CoreError> {
        let url = self.url("/items");
        log::debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        let resp = check_status(resp, Rejection::Transport).await?;
        read_json(resp).await
    }

    async fn add_item(&self, ticker: &str) -> Result<Item, CoreError> {
        let url = self.url("/items");
        log::debug!("POST {url} ticker={ticker}");
        let resp = self
            .client
            .post(&url)
            .json(&NewItemRequest { ticker })
            .send()
            .await?;
        let resp = check_status(resp, Rejection::Input).await?;
        read_json(resp).await
    }

    async fn delete_item(&self, id: &ItemId) -> Result<(), CoreError> {
        let url = self.url(&format!("/items/{id}"));
        log::debug!("DELETE {url}");
        let resp = self.client.delete(&url).send().await?;
        check_status(resp, Rejection::Transport).await?;
        Ok(())
    }

    async fn get_budget(&self) -> Result<Option<f64>, CoreError> {
        let url = self.url("/portfolio");
        log::debug!("GET {url}");
        let resp = self.client.get(&url).send().await?;
        let resp = check_status(resp, Rejection::Transport).await?;
        let body: BudgetResponse = read_json(resp).await?;
        Ok(body.portfolio_value)
    }

    async fn set_budget(&self, value: f64) -> Result<(), CoreError> {
        let url = self.url("/portfolio");
        log::debug!("POST {url} value={value}");
        let resp = self
            .client
            .post(&url)
            .json(&SetBudgetRequest { value })
            .send()
            .await?;
        check_status(resp, Rejection::Input).await?;
        Ok(())
    }

    async fn compute_allocation(
        &self,
        budget: f64,
        tickers: &[String],
    ) -> Result<AllocationResult, CoreError> {
        let url = self.url("/calculate_portfolio");
        log::debug!("POST {url} budget={budget} stocks={}", tickers.len());
        let resp = self
            .client
            .post(&url)
            .json(&AllocationRequest {
                budget,
                stocks: tickers,
            })
            .send()
            .await?;
        let resp = check_status(resp, Rejection::Computation).await?;
        let bytes = resp.bytes().await?;
        parse_allocation(&bytes)
    }
}
