//! Lifecycle primitives supplied by the hosting runtime.

use async_trait::async_trait;

/// The two host-provided lifecycle primitives the interceptor calls.
#[async_trait]
pub trait HostRuntime: Send + Sync {
    /// Ask the host to activate this version immediately instead of
    /// waiting for clients of the previous version to close.
    fn skip_waiting(&self);

    /// Take control of already-open clients so their future requests are
    /// intercepted by this version without a reload.
    async fn claim_clients(&self);
}

/// Host for embeddings without lifecycle management; both primitives are
/// no-ops.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHost;

#[async_trait]
impl HostRuntime for NoopHost {
    fn skip_waiting(&self) {}

    async fn claim_clients(&self) {}
}
