use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Expected risk/return figures for the allocated portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpectedPerformance {
    #[serde(rename = "Expected Annual Return")]
    pub expected_annual_return: f64,

    #[serde(rename = "Annual Volatility")]
    pub annual_volatility: f64,

    #[serde(rename = "Sharpe Ratio")]
    pub sharpe_ratio: f64,
}

/// Result of one allocation computation, exactly as returned by the service.
///
/// Weights are passed through untouched; they are not checked to sum to 1.
/// Field names follow the wire format of `POST /calculate_portfolio`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    /// Ticker → portfolio fraction.
    #[serde(rename = "Weights")]
    pub weights: BTreeMap<String, f64>,

    /// Ticker → whole shares to buy.
    #[serde(rename = "Shares to Purchase")]
    pub shares_to_purchase: BTreeMap<String, i64>,

    #[serde(rename = "Expected Performance")]
    pub performance: ExpectedPerformance,

    /// Cash left over after buying whole shares.
    #[serde(rename = "Remaining Budget")]
    pub remaining_budget: f64,
}

impl AllocationResult {
    /// Tickers that received a non-zero share count, in ticker order.
    pub fn purchased_tickers(&self) -> Vec<&str> {
        self.shares_to_purchase
            .iter()
            .filter(|(_, &count)| count > 0)
            .map(|(ticker, _)| ticker.as_str())
            .collect()
    }
}
