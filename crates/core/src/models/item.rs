use serde::{Deserialize, Serialize};
use std::fmt;

/// Server-assigned identifier of a watch-list entry.
///
/// Opaque to the client: the backend currently hands out integers, but any
/// JSON number or string is accepted. The id keeps the JSON type it arrived
/// as, so it serializes back unchanged and `/items/{id}` uses the same text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemId {
    Int(u64),
    Text(String),
}

impl ItemId {
    /// A string id, kept as text even if it looks numeric.
    pub fn new(raw: impl Into<String>) -> Self {
        Self::Text(raw.into())
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Int(n) => write!(f, "{n}"),
            ItemId::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ItemId {
    fn from(id: u64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for ItemId {
    fn from(id: &str) -> Self {
        Self::Text(id.to_string())
    }
}

/// One watch-list entry. Never edited in place; a ticker change is a delete + add.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub ticker: String,
}

impl Item {
    pub fn new(id: impl Into<ItemId>, ticker: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ticker: ticker.into(),
        }
    }
}
