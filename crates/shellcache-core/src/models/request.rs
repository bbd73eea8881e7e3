//! Intercepted request values.

use std::fmt;

use url::Url;

/// HTTP method of an intercepted request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
    Head,
    Options,
    Patch,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => write!(f, "GET"),
            Method::Post => write!(f, "POST"),
            Method::Put => write!(f, "PUT"),
            Method::Delete => write!(f, "DELETE"),
            Method::Head => write!(f, "HEAD"),
            Method::Options => write!(f, "OPTIONS"),
            Method::Patch => write!(f, "PATCH"),
        }
    }
}

/// How the request reached the interceptor.
///
/// `Navigate` marks a full-page load; everything else is a sub-resource
/// fetch (script, stylesheet, image, XHR).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    Navigate,
    SameOrigin,
    NoCors,
    Cors,
}

/// One outgoing request, as observed by the fetch handler.
///
/// Ephemeral: exists only for the duration of handling one fetch event and
/// is never persisted.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    pub method: Method,
    pub url: Url,
    pub mode: RequestMode,
}

impl FetchRequest {
    pub fn new(method: Method, url: Url, mode: RequestMode) -> Self {
        Self { method, url, mode }
    }

    /// A plain GET sub-resource request.
    pub fn get(url: Url) -> Self {
        Self::new(Method::Get, url, RequestMode::Cors)
    }

    /// A full-page navigation request.
    pub fn navigate(url: Url) -> Self {
        Self::new(Method::Get, url, RequestMode::Navigate)
    }

    pub fn is_get(&self) -> bool {
        self.method == Method::Get
    }

    pub fn is_navigation(&self) -> bool {
        self.mode == RequestMode::Navigate
    }

    /// Whether the URL uses a standard web scheme. Requests with other
    /// schemes (browser-extension internals and the like) are left alone.
    pub fn is_web_scheme(&self) -> bool {
        matches!(self.url.scheme(), "http" | "https")
    }

    /// The bucket key identifying this request: method plus the URL with
    /// its fragment stripped. A re-fetch overwrites the same key.
    pub fn cache_key(&self) -> String {
        cache_key(self.method, &self.url)
    }
}

/// Build the bucket key for a method/URL pair.
pub fn cache_key(method: Method, url: &Url) -> String {
    let mut url = url.clone();
    url.set_fragment(None);
    format!("{} {}", method, url)
}
