use bitcoin::consensus::encode;
use bitcoin::Transaction;

use crate::error::DecodeError;

// Decodes a hex-encoded raw transaction as served by a transaction provider.
// Legacy and segwit serializations are both accepted; truncated input, non-minimal
// CompactSize counts, a witness flag without witnesses and trailing bytes are all rejected.
pub fn decode_tx(tx_hex: &str) -> Result<Transaction, DecodeError> {
    // Providers may pad the body with whitespace or use uppercase digits
    let bytes = hex::decode(tx_hex.trim())?;
    // deserialize fails unless every byte is consumed
    Ok(encode::deserialize(&bytes)?)
}
