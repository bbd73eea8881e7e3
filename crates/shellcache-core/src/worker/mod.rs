//! The cache interceptor.
//!
//! This module provides `CacheInterceptor`, the component wired to the
//! hosting environment's lifecycle signals:
//!
//! - `install`: pre-cache the core resource list into the current bucket
//! - `activate`: delete stale-version buckets, then claim open clients
//! - `handle_fetch`: route each intercepted request through the three-tier
//!   policy (pass-through, network-first, cache-first)

pub mod error;
pub mod host;
pub mod interceptor;

pub use error::RouteError;
pub use host::{HostRuntime, NoopHost};
pub use interceptor::{CacheInterceptor, FetchDecision};
