//! Request interception and routing.

use std::sync::Arc;

use futures::future::{join_all, try_join_all};
use tracing::{debug, error, info, warn};

use crate::config::WorkerConfig;
use crate::models::request::cache_key;
use crate::models::{FetchRequest, Method, NetworkResponse, StoredResponse};
use crate::net::{FetchError, Network};
use crate::store::CacheStore;

use super::{HostRuntime, RouteError};

/// Outcome of routing one intercepted request.
#[derive(Debug)]
pub enum FetchDecision {
    /// The interceptor declines; the request proceeds as if no interceptor
    /// existed.
    Declined,
    /// A substitute response, from cache or network.
    Served(NetworkResponse),
    /// The intercepted request fails.
    Failed(RouteError),
}

impl FetchDecision {
    pub fn is_declined(&self) -> bool {
        matches!(self, FetchDecision::Declined)
    }

    pub fn served(self) -> Option<NetworkResponse> {
        match self {
            FetchDecision::Served(response) => Some(response),
            _ => None,
        }
    }
}

/// The offline-caching interceptor.
///
/// Owns the current cache bucket and routes every intercepted request
/// through a fixed three-tier policy. Stateless across requests: the only
/// state that evolves is the bucket's contents.
pub struct CacheInterceptor {
    config: WorkerConfig,
    store: Arc<dyn CacheStore>,
    network: Arc<dyn Network>,
    host: Arc<dyn HostRuntime>,
}

impl CacheInterceptor {
    pub fn new(
        config: WorkerConfig,
        store: Arc<dyn CacheStore>,
        network: Arc<dyn Network>,
        host: Arc<dyn HostRuntime>,
    ) -> Self {
        Self {
            config,
            store,
            network,
            host,
        }
    }

    pub fn config(&self) -> &WorkerConfig {
        &self.config
    }

    /// Install handler: signal immediate activation, then pre-cache the
    /// core resource list into the current bucket.
    ///
    /// The batch is all-or-nothing: one failed fetch abandons every entry.
    /// A failed batch is logged, not retried; the version still installs
    /// with whatever the bucket already held.
    pub async fn install(&self) {
        info!(bucket = %self.config.bucket_name, "install");
        self.host.skip_waiting();

        match self.precache().await {
            Ok(count) => info!(entries = count, "pre-cached core resources"),
            Err(e) => error!(error = %e, "pre-cache failed, installing without fresh shell"),
        }
    }

    async fn precache(&self) -> Result<usize, RouteError> {
        self.store.open(&self.config.bucket_name).await?;

        // Bypass intermediate HTTP caches so a stale browser-level copy
        // cannot poison the offline cache.
        let fetches = self.config.core_resources.iter().map(|entry| async move {
            let url = self.config.resolve(entry).map_err(FetchError::from)?;
            let request = FetchRequest::get(url);
            let response = self.network.fetch_fresh(&request).await?;
            if !response.ok() {
                return Err(RouteError::Fetch(FetchError::Status {
                    status: response.status,
                    url: request.url.to_string(),
                }));
            }
            Ok((request.cache_key(), response.into_stored()))
        });

        let entries: Vec<(String, StoredResponse)> = try_join_all(fetches).await?;
        let count = entries.len();
        self.store.put_all(&self.config.bucket_name, entries).await?;
        Ok(count)
    }

    /// Activate handler: delete every bucket from a prior version, then
    /// claim open clients. Deletions are concurrent and best-effort; one
    /// failure does not block the others or activation itself.
    pub async fn activate(&self) {
        info!(bucket = %self.config.bucket_name, "activate");

        match self.collect_garbage().await {
            Ok(0) => {}
            Ok(deleted) => info!(deleted, "removed stale cache buckets"),
            Err(e) => warn!(error = %e, "could not enumerate cache buckets"),
        }

        self.host.claim_clients().await;
    }

    async fn collect_garbage(&self) -> Result<usize, RouteError> {
        let names = self.store.bucket_names().await.map_err(RouteError::from)?;
        let stale: Vec<String> = names
            .into_iter()
            .filter(|name| *name != self.config.bucket_name)
            .collect();

        let deletions = stale
            .iter()
            .map(|name| async move { (name, self.store.delete_bucket(name).await) });

        let mut deleted = 0;
        for (name, result) in join_all(deletions).await {
            match result {
                Ok(_) => deleted += 1,
                Err(e) => warn!(bucket = %name, error = %e, "failed to delete stale bucket"),
            }
        }
        Ok(deleted)
    }

    /// Fetch handler: the routing policy, evaluated in order, first match
    /// wins.
    ///
    /// 1. Non-GET methods and non-web schemes are declined outright.
    /// 2. Always-fresh URLs go network-first, falling back to the bucket.
    /// 3. Everything else goes cache-first, with an opportunistic
    ///    write-back for core assets and a shell fallback for offline
    ///    navigations.
    pub async fn handle_fetch(&self, request: FetchRequest) -> FetchDecision {
        if !request.is_get() || !request.is_web_scheme() {
            return FetchDecision::Declined;
        }

        if self.config.is_always_fresh(&request.url) {
            return self.network_first(&request).await;
        }

        self.cache_first(&request).await
    }

    /// Serve live, never caching the result; a cached copy from an earlier
    /// cache-first pass is only consulted when the network is down.
    async fn network_first(&self, request: &FetchRequest) -> FetchDecision {
        match self.network.fetch(request).await {
            Ok(response) => FetchDecision::Served(response),
            Err(e) => {
                debug!(url = %request.url, error = %e, "network-first fetch failed, trying cache");
                match self
                    .store
                    .get(&self.config.bucket_name, &request.cache_key())
                    .await
                {
                    Ok(Some(stored)) => FetchDecision::Served(stored.into_response()),
                    Ok(None) => FetchDecision::Failed(RouteError::Offline {
                        url: request.url.to_string(),
                    }),
                    Err(e) => FetchDecision::Failed(e.into()),
                }
            }
        }
    }

    async fn cache_first(&self, request: &FetchRequest) -> FetchDecision {
        let key = request.cache_key();

        match self.store.get(&self.config.bucket_name, &key).await {
            Ok(Some(stored)) => {
                debug!(url = %request.url, "cache hit");
                return FetchDecision::Served(stored.into_response());
            }
            Ok(None) => {}
            Err(e) => return FetchDecision::Failed(e.into()),
        }

        match self.network.fetch(request).await {
            Ok(response) => {
                if self.config.is_core_asset(&request.url) {
                    // The payload is needed twice, so duplicate before
                    // either copy is consumed.
                    let (to_caller, to_cache) = response.duplicate();
                    self.spawn_write_back(key, to_cache);
                    FetchDecision::Served(to_caller)
                } else {
                    // Non-core assets are never persisted, bounding cache
                    // growth.
                    FetchDecision::Served(response)
                }
            }
            Err(e) => {
                if request.is_navigation() {
                    debug!(url = %request.url, error = %e, "offline navigation, serving shell fallback");
                    self.shell_fallback(request).await
                } else {
                    FetchDecision::Failed(e.into())
                }
            }
        }
    }

    /// Fire-and-forget write-back. The task's result is discarded; a failed
    /// write never affects the response already returned to the caller.
    fn spawn_write_back(&self, key: String, response: NetworkResponse) {
        let store = Arc::clone(&self.store);
        let bucket = self.config.bucket_name.clone();
        tokio::spawn(async move {
            let stored = response.into_stored();
            if let Err(e) = store.open(&bucket).await {
                debug!(bucket = %bucket, error = %e, "write-back open failed");
                return;
            }
            if let Err(e) = store.put(&bucket, &key, stored).await {
                debug!(bucket = %bucket, key = %key, error = %e, "write-back failed");
            }
        });
    }

    /// Offline navigations get the cached shell page so the user sees the
    /// application instead of a browser error page.
    async fn shell_fallback(&self, request: &FetchRequest) -> FetchDecision {
        let shell = match self.config.shell_url() {
            Ok(url) => url,
            Err(e) => return FetchDecision::Failed(RouteError::Fetch(e.into())),
        };

        let key = cache_key(Method::Get, &shell);
        match self.store.get(&self.config.bucket_name, &key).await {
            Ok(Some(stored)) => FetchDecision::Served(stored.into_response()),
            Ok(None) => FetchDecision::Failed(RouteError::Offline {
                url: request.url.to_string(),
            }),
            Err(e) => FetchDecision::Failed(e.into()),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
