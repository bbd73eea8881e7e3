//! Fetch primitive and its reqwest implementation.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::models::{FetchRequest, Method, NetworkResponse};

use super::FetchError;

/// The network fetch primitive consumed by the interceptor.
///
/// Implementations resolve a request descriptor into a response descriptor
/// or fail. No timeout or retry policy belongs here: a failed fetch is
/// terminal for the one request that issued it.
#[async_trait]
pub trait Network: Send + Sync {
    /// Fetch a request over the network.
    async fn fetch(&self, request: &FetchRequest) -> Result<NetworkResponse, FetchError>;

    /// Fetch bypassing any intermediate HTTP cache, forcing a true network
    /// round trip.
    async fn fetch_fresh(&self, request: &FetchRequest) -> Result<NetworkResponse, FetchError>;
}

/// HTTP network client.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Create a new HTTP client.
    ///
    /// No request timeout is configured: a hung fetch stalls only the
    /// handler that issued it.
    pub fn new() -> Result<Self, FetchError> {
        let client = Client::builder().build()?;
        Ok(Self { client })
    }

    async fn execute(
        &self,
        request: &FetchRequest,
        bypass_http_cache: bool,
    ) -> Result<NetworkResponse, FetchError> {
        let mut builder = self
            .client
            .request(to_reqwest_method(request.method), request.url.clone());

        if bypass_http_cache {
            builder = builder
                .header(header::CACHE_CONTROL, "no-cache")
                .header(header::PRAGMA, "no-cache");
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();

        let mut headers = HashMap::new();
        for (name, value) in response.headers() {
            if let Ok(value) = value.to_str() {
                headers.insert(name.to_string(), value.to_string());
            }
        }

        let body = response.bytes().await?.to_vec();
        debug!(url = %request.url, status, bytes = body.len(), "fetched");

        Ok(NetworkResponse::with_parts(status, headers, body))
    }
}

#[async_trait]
impl Network for HttpClient {
    async fn fetch(&self, request: &FetchRequest) -> Result<NetworkResponse, FetchError> {
        self.execute(request, false).await
    }

    async fn fetch_fresh(&self, request: &FetchRequest) -> Result<NetworkResponse, FetchError> {
        self.execute(request, true).await
    }
}

fn to_reqwest_method(method: Method) -> reqwest::Method {
    match method {
        Method::Get => reqwest::Method::GET,
        Method::Post => reqwest::Method::POST,
        Method::Put => reqwest::Method::PUT,
        Method::Delete => reqwest::Method::DELETE,
        Method::Head => reqwest::Method::HEAD,
        Method::Options => reqwest::Method::OPTIONS,
        Method::Patch => reqwest::Method::PATCH,
    }
}
