use bitcoin::{Transaction, TxOut};

use super::script::{decompile, op_return_payload};
use crate::utils::normalize_hex;

// Matches transaction outputs against the OP_RETURN tag of a payment request
#[derive(Debug, Clone)]
pub struct RequestMatcher {
    // Normalized lowercase hex; a malformed tag simply never matches
    tag: String,
}

impl RequestMatcher {
    // Builds a matcher from a caller-supplied tag (0x prefix and case are ignored)
    pub fn new(tag: &str) -> Self {
        RequestMatcher {
            tag: normalize_hex(tag),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    // An output qualifies when its script decompiles to OP_RETURN followed by a data push equal to the tag
    pub fn output_matches(&self, output: &TxOut) -> bool {
        // Scripts that fail to decompile are skipped, not reported
        let Some(chunks) = decompile(&output.script_pubkey) else {
            return false;
        };
        // Compare hex forms; hex::encode is always lowercase
        op_return_payload(&chunks).is_some_and(|data| hex::encode(data) == self.tag)
    }

    // Number of qualifying outputs in a transaction
    pub fn count_matches(&self, tx: &Transaction) -> usize {
        tx.output.iter().filter(|out| self.output_matches(out)).count()
    }
}
