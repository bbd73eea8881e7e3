use thiserror::Error;

use crate::net::FetchError;
use crate::store::StoreError;

/// Failure of one intercepted request. Nothing here propagates across
/// requests; each handler invocation fails independently.
#[derive(Error, Debug)]
pub enum RouteError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Cache store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Offline with no cached fallback for {url}")]
    Offline { url: String },
}
