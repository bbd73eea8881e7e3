//! Network fetch collaborator.
//!
//! This module provides the `Network` trait the interceptor fetches
//! through, and `HttpClient`, the reqwest-backed production implementation.
//! `fetch_fresh` forces a true network round trip past intermediate HTTP
//! caches; provisioning uses it so a stale browser-level copy cannot poison
//! the offline cache.

pub mod client;
pub mod error;

pub use client::{HttpClient, Network};
pub use error::FetchError;
