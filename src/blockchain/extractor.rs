use futures::stream::{self, StreamExt, TryStreamExt};
use log::{debug, info, warn};
use rayon::prelude::*;
use std::sync::Arc;

use super::fetcher::{HistoryProvider, TransactionProvider};
use super::matcher::RequestMatcher;
use super::tx::decode_tx;
use crate::error::ProviderError;
use crate::metrics::{DECODE_FAILURES, LOOKUPS, LOOKUP_TIME, MATCHES, TXS_SCANNED};
use crate::models::HistoryEntry;

// Default bound on concurrent tx hex requests per lookup
pub const DEFAULT_MAX_CONCURRENT_FETCHES: usize = 8;

// Resolves a payment request, identified by an OP_RETURN tag, to the transaction
// in an address's history that carries it. Every lookup re-fetches history and
// transactions; provider failures abort the lookup, undecodable transactions are skipped.
#[derive(Clone)]
pub struct RequestExtractor {
    history: Arc<dyn HistoryProvider>,
    transactions: Arc<dyn TransactionProvider>,
    max_concurrent_fetches: usize,
}

impl RequestExtractor {
    // Builds an extractor over separate history and transaction sources (often the same client)
    pub fn new(history: Arc<dyn HistoryProvider>, transactions: Arc<dyn TransactionProvider>) -> Self {
        RequestExtractor {
            history,
            transactions,
            max_concurrent_fetches: DEFAULT_MAX_CONCURRENT_FETCHES,
        }
    }

    // Bounds in-flight tx hex requests; values below 1 are raised to 1
    pub fn with_max_concurrent_fetches(mut self, limit: usize) -> Self {
        self.max_concurrent_fetches = limit.max(1);
        self
    }

    // First transaction, in history order, with an output OP_RETURN <tag>
    pub async fn find_request(&self, address: &str, tag: &str) -> Result<Option<String>, ProviderError> {
        Ok(self.find_all_requests(address, tag).await?.into_iter().next())
    }

    // Every qualifying transaction in history order; a transaction appears once
    // no matter how many of its outputs carry the tag
    pub async fn find_all_requests(&self, address: &str, tag: &str) -> Result<Vec<String>, ProviderError> {
        let _timer = LOOKUP_TIME.start_timer();
        LOOKUPS.inc();
        let matcher = RequestMatcher::new(tag);
        debug!("Looking up request {} for {}", matcher.tag(), address);

        // History order is authoritative and is the tie-break for the result
        let history = self.history.tx_history(address).await?;
        if history.is_empty() {
            info!("No history for {}", address);
            return Ok(Vec::new());
        }

        // Any provider error here aborts the whole lookup
        let hexes = self.fetch_all(&history).await?;
        TXS_SCANNED.inc_by(hexes.len() as f64);

        // Indexed parallel map keeps history order in the collected result
        let contributions: Vec<Option<String>> = history
            .par_iter()
            .zip(&hexes)
            .map(|(entry, tx_hex)| match decode_tx(tx_hex) {
                Ok(tx) => {
                    let hits = matcher.count_matches(&tx);
                    if hits > 1 {
                        debug!("{} has {} outputs tagged {}", entry.txid, hits, matcher.tag());
                    }
                    (hits > 0).then(|| entry.txid.clone())
                }
                Err(e) => {
                    warn!("Skipping {}: {}", entry.txid, e);
                    DECODE_FAILURES.inc();
                    None
                }
            })
            .collect();

        let matches: Vec<String> = contributions.into_iter().flatten().collect();
        if let Some(first) = matches.first() {
            MATCHES.inc();
            info!(
                "Request {} for {} found in {} ({} of {} transactions match)",
                matcher.tag(),
                address,
                first,
                matches.len(),
                history.len()
            );
        } else {
            info!(
                "Request {} for {} not found among {} transactions",
                matcher.tag(),
                address,
                history.len()
            );
        }
        Ok(matches)
    }

    // Fetches every transaction's hex with bounded concurrency; output order follows history order
    async fn fetch_all(&self, history: &[HistoryEntry]) -> Result<Vec<String>, ProviderError> {
        stream::iter(history)
            .map(|entry| self.transactions.tx_hex(&entry.txid))
            .buffered(self.max_concurrent_fetches)
            .try_collect()
            .await
    }
}
