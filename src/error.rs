use thiserror::Error;

// Failures talking to a history or transaction provider; always surfaced to the caller
#[derive(Debug, Error)]
pub enum ProviderError {
    // Transport-level failure (connection refused, TLS, body read)
    #[error("provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    // Non-success HTTP status other than 404
    #[error("provider returned {status} for {url}")]
    Status { status: u16, url: String },

    // Provider has no such address or transaction
    #[error("not found: {0}")]
    NotFound(String),

    // Body did not have the expected shape
    #[error("invalid provider response: {0}")]
    InvalidResponse(String),

    // Request did not finish within the configured deadline
    #[error("provider request timed out after {0} seconds")]
    Timeout(u64),
}

impl From<serde_json::Error> for ProviderError {
    fn from(e: serde_json::Error) -> Self {
        ProviderError::InvalidResponse(e.to_string())
    }
}

// Reasons a raw transaction could not be decoded; never surfaced past the extractor
#[derive(Debug, Error)]
pub enum DecodeError {
    // Provider body is not hex
    #[error("invalid hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    // Bytes are not a well-formed consensus-encoded transaction
    #[error("malformed transaction: {0}")]
    Consensus(#[from] bitcoin::consensus::encode::Error),
}

// Environment configuration problems
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}
