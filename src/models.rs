use serde::{Deserialize, Serialize};

// One entry of an address's transaction history; provider-specific fields are ignored
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub txid: String,
}

impl HistoryEntry {
    pub fn new(txid: impl Into<String>) -> Self {
        HistoryEntry { txid: txid.into() }
    }
}

// Response body for a single request lookup; txid is null when nothing matched
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RequestLookup {
    pub address: String,
    pub tag: String,
    pub txid: Option<String>,
}

// Response body listing every matching transaction in history order
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RequestLookupAll {
    pub address: String,
    pub tag: String,
    pub txids: Vec<String>,
}
