//! Offline-first request interception and app-shell caching.
//!
//! shellcache keeps a single-page application usable without network
//! connectivity. A `CacheInterceptor` sits between the application and the
//! network: it pre-caches the application shell into a versioned cache
//! bucket at install time, garbage-collects prior-version buckets at
//! activation, and routes every intercepted GET through a three-tier
//! policy:
//!
//! 1. non-GET methods and non-web schemes pass through untouched
//! 2. always-fresh URLs (third-party SDKs) are served network-first
//! 3. everything else is served cache-first, with an opportunistic
//!    write-back for core assets and a cached shell fallback for offline
//!    navigations
//!
//! The interceptor takes its collaborators explicitly: a `CacheStore` (the
//! bucket key-value store), a `Network` (the fetch primitive), and a
//! `HostRuntime` (the skip-waiting and claim-clients primitives of the
//! hosting environment).

pub mod config;
pub mod models;
pub mod net;
pub mod store;
pub mod worker;

pub use config::WorkerConfig;
pub use models::{FetchRequest, Method, NetworkResponse, RequestMode, StoredResponse};
pub use net::{FetchError, HttpClient, Network};
pub use store::{CacheStore, DiskStore, MemoryStore, StoreError};
pub use worker::{CacheInterceptor, FetchDecision, HostRuntime, NoopHost, RouteError};
