#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use bitcoin::absolute::LockTime;
use bitcoin::consensus::serialize;
use bitcoin::opcodes::all::OP_RETURN;
use bitcoin::script::{Builder, PushBytesBuf};
use bitcoin::transaction::Version;
use bitcoin::{Amount, OutPoint, ScriptBuf, Sequence, Transaction, TxIn, TxOut, Witness};
use oprequest::blockchain::{HistoryProvider, RequestExtractor, TransactionProvider};
use oprequest::{HistoryEntry, ProviderError};

// P2PKH locking script with a zero key hash
pub fn p2pkh_script() -> ScriptBuf {
    let mut script = vec![0x76, 0xa9, 0x14];
    script.extend_from_slice(&[0u8; 20]);
    script.extend_from_slice(&[0x88, 0xac]);
    ScriptBuf::from_bytes(script)
}

// OP_RETURN <data> with a single push of the payload
pub fn op_return_script(data: &[u8]) -> ScriptBuf {
    let push = PushBytesBuf::try_from(data.to_vec()).unwrap();
    Builder::new().push_opcode(OP_RETURN).push_slice(push).into_script()
}

// Single-input transaction with the given locking scripts as outputs
pub fn tx_with_scripts(scripts: Vec<ScriptBuf>) -> Transaction {
    Transaction {
        version: Version::TWO,
        lock_time: LockTime::ZERO,
        input: vec![TxIn {
            previous_output: OutPoint::null(),
            script_sig: ScriptBuf::from_bytes(vec![0x51]),
            sequence: Sequence::MAX,
            witness: Witness::new(),
        }],
        output: scripts
            .into_iter()
            .enumerate()
            .map(|(i, script_pubkey)| TxOut {
                value: Amount::from_sat(1_000 * i as u64),
                script_pubkey,
            })
            .collect(),
    }
}

pub fn to_hex(tx: &Transaction) -> String {
    hex::encode(serialize(tx))
}

// Hex of a transaction paying to P2PKH with an OP_RETURN <payload> output
pub fn tagged_tx_hex(payload: &[u8]) -> String {
    to_hex(&tx_with_scripts(vec![p2pkh_script(), op_return_script(payload)]))
}

pub fn plain_tx_hex() -> String {
    to_hex(&tx_with_scripts(vec![p2pkh_script()]))
}

// In-memory provider serving both history and transaction hex
#[derive(Default)]
pub struct FakeProvider {
    history: HashMap<String, Vec<HistoryEntry>>,
    txs: HashMap<String, String>,
    failing: HashSet<String>,
    delays: HashMap<String, Duration>,
    pub hex_calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_history(mut self, address: &str, txids: &[&str]) -> Self {
        self.history.insert(
            address.to_string(),
            txids.iter().map(|txid| HistoryEntry::new(*txid)).collect(),
        );
        self
    }

    pub fn with_tx(mut self, txid: &str, tx_hex: impl Into<String>) -> Self {
        self.txs.insert(txid.to_string(), tx_hex.into());
        self
    }

    pub fn with_delay(mut self, txid: &str, millis: u64) -> Self {
        self.delays.insert(txid.to_string(), Duration::from_millis(millis));
        self
    }

    pub fn failing(mut self, txid: &str) -> Self {
        self.failing.insert(txid.to_string());
        self
    }

    pub fn hex_calls(&self) -> usize {
        self.hex_calls.load(Ordering::SeqCst)
    }

    pub fn into_extractor(self) -> (Arc<FakeProvider>, RequestExtractor) {
        let provider = Arc::new(self);
        let extractor = RequestExtractor::new(provider.clone(), provider.clone());
        (provider, extractor)
    }
}

#[async_trait]
impl HistoryProvider for FakeProvider {
    async fn tx_history(&self, address: &str) -> Result<Vec<HistoryEntry>, ProviderError> {
        self.history
            .get(address)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(address.to_string()))
    }
}

#[async_trait]
impl TransactionProvider for FakeProvider {
    async fn tx_hex(&self, txid: &str) -> Result<String, ProviderError> {
        self.hex_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delays.get(txid) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(txid) {
            return Err(ProviderError::Status {
                status: 503,
                url: format!("/tx/{txid}/hex"),
            });
        }
        self.txs
            .get(txid)
            .cloned()
            .ok_or_else(|| ProviderError::NotFound(txid.to_string()))
    }
}
