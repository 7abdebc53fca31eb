pub mod routes;

use crate::blockchain::RequestExtractor;

// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub extractor: RequestExtractor,
}

pub use routes::configure;
