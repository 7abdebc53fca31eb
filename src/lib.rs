pub mod blockchain;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod rest;
pub mod utils;

pub use blockchain::{decode_tx, RequestExtractor};
pub use config::Config;
pub use error::{ConfigError, DecodeError, ProviderError};
pub use models::{HistoryEntry, RequestLookup, RequestLookupAll};
pub use rest::AppState;
