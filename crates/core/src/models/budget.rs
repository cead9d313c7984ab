use serde::{Deserialize, Serialize};

/// The total amount available for allocation.
///
/// Always finite and strictly positive. An unset budget is `Option::None`,
/// which is distinct from zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct PortfolioBudget(f64);

impl PortfolioBudget {
    /// Returns `None` for zero, negative, NaN or infinite values.
    pub fn new(value: f64) -> Option<Self> {
        if value.is_finite() && value > 0.0 {
            Some(Self(value))
        } else {
            None
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for PortfolioBudget {
    type Error = String;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("portfolio value must be positive, got {value}"))
    }
}

impl From<PortfolioBudget> for f64 {
    fn from(budget: PortfolioBudget) -> Self {
        budget.0
    }
}
