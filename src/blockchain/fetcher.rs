use async_trait::async_trait;
use backoff::{future::retry, ExponentialBackoff};
use log::{debug, info, warn};
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;

use crate::config::Config;
use crate::error::ProviderError;
use crate::models::HistoryEntry;

// Esplora returns confirmed history in pages of this size
const CHAIN_PAGE_SIZE: usize = 25;

// Source of an address's transaction ids, in the order the caller should scan them
#[async_trait]
pub trait HistoryProvider: Send + Sync {
    async fn tx_history(&self, address: &str) -> Result<Vec<HistoryEntry>, ProviderError>;
}

// Source of raw transactions, hex encoded
#[async_trait]
pub trait TransactionProvider: Send + Sync {
    async fn tx_hex(&self, txid: &str) -> Result<String, ProviderError>;
}

#[derive(Debug, Deserialize)]
struct EsploraTxStatus {
    confirmed: bool,
}

#[derive(Debug, Deserialize)]
struct EsploraTx {
    txid: String,
    status: EsploraTxStatus,
}

fn parse_history_page(body: &str) -> Result<Vec<EsploraTx>, ProviderError> {
    Ok(serde_json::from_str(body)?)
}

// HTTP client for an Esplora-compatible REST API, serving both history and raw transactions
pub struct EsploraClient {
    http: reqwest::Client,
    base_url: String,
    timeout: Duration,
    max_retry_elapsed: Duration,
}

impl EsploraClient {
    // Builds the HTTP client with the configured per-request timeout
    pub fn new(config: &Config) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()?;
        info!("Using Esplora provider at {}", config.esplora_url);
        Ok(EsploraClient {
            http,
            base_url: config.esplora_url.clone(),
            timeout: config.request_timeout,
            max_retry_elapsed: config.max_retry_elapsed,
        })
    }

    // GETs a path under the base URL, retrying transient failures with exponential backoff
    async fn get_text(&self, path: &str) -> Result<String, ProviderError> {
        let url = format!("{}{}", self.base_url, path);
        let backoff = ExponentialBackoff {
            max_elapsed_time: Some(self.max_retry_elapsed),
            ..Default::default()
        };
        let (http, url, timeout) = (&self.http, url.as_str(), self.timeout);

        retry(backoff, move || async move {
            let response = http.get(url).send().await.map_err(|e| {
                warn!("Request to {} failed: {}", url, e);
                if e.is_timeout() {
                    backoff::Error::transient(ProviderError::Timeout(timeout.as_secs()))
                } else if e.is_connect() || e.is_request() {
                    backoff::Error::transient(ProviderError::Http(e))
                } else {
                    backoff::Error::permanent(ProviderError::Http(e))
                }
            })?;

            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                return Err(backoff::Error::permanent(ProviderError::NotFound(url.to_string())));
            }
            if !status.is_success() {
                let err = ProviderError::Status {
                    status: status.as_u16(),
                    url: url.to_string(),
                };
                // Rate limiting and server errors are worth another attempt
                return Err(if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
                    warn!("{}. Retrying...", err);
                    backoff::Error::transient(err)
                } else {
                    backoff::Error::permanent(err)
                });
            }

            response
                .text()
                .await
                .map_err(|e| backoff::Error::transient(ProviderError::Http(e)))
        })
        .await
    }
}

#[async_trait]
impl HistoryProvider for EsploraClient {
    // Mempool entries first, then confirmed history newest to oldest, following chain pagination
    async fn tx_history(&self, address: &str) -> Result<Vec<HistoryEntry>, ProviderError> {
        let first = parse_history_page(&self.get_text(&format!("/address/{address}/txs")).await?)?;
        let mut confirmed_in_page = first.iter().filter(|tx| tx.status.confirmed).count();
        let mut last_confirmed = first
            .iter()
            .rev()
            .find(|tx| tx.status.confirmed)
            .map(|tx| tx.txid.clone());
        let mut history: Vec<HistoryEntry> = first.into_iter().map(|tx| HistoryEntry::new(tx.txid)).collect();

        while confirmed_in_page == CHAIN_PAGE_SIZE {
            let Some(after) = last_confirmed.take() else {
                break;
            };
            let page = parse_history_page(
                &self
                    .get_text(&format!("/address/{address}/txs/chain/{after}"))
                    .await?,
            )?;
            confirmed_in_page = page.len();
            last_confirmed = page.last().map(|tx| tx.txid.clone());
            history.extend(page.into_iter().map(|tx| HistoryEntry::new(tx.txid)));
        }

        debug!("Fetched {} history entries for {}", history.len(), address);
        Ok(history)
    }
}

#[async_trait]
impl TransactionProvider for EsploraClient {
    async fn tx_hex(&self, txid: &str) -> Result<String, ProviderError> {
        let body = self.get_text(&format!("/tx/{txid}/hex")).await?;
        Ok(body.trim().to_string())
    }
}
