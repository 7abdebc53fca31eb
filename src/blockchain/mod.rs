pub mod extractor;
pub mod fetcher;
pub mod matcher;
pub mod script;
pub mod tx;

pub use extractor::RequestExtractor;
pub use fetcher::{EsploraClient, HistoryProvider, TransactionProvider};
pub use matcher::RequestMatcher;
pub use script::Chunk;
pub use tx::decode_tx;
