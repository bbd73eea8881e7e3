//! Captured response payloads.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A response captured from the network.
///
/// The body is consumable exactly once: `into_stored` and `into_bytes` take
/// the response by value. Any path that needs the payload twice (returning
/// it to the caller while also writing it to a cache bucket) must call
/// `duplicate` before the first read; ownership makes reading twice a
/// compile error rather than a runtime bug.
#[derive(Debug)]
pub struct NetworkResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    /// Whether this response was rehydrated from a cache bucket rather than
    /// fetched live.
    pub from_cache: bool,
    body: Vec<u8>,
}

impl NetworkResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self {
            status,
            status_text: status_text(status).to_string(),
            headers: HashMap::new(),
            from_cache: false,
            body,
        }
    }

    pub fn with_parts(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            status_text: status_text(status).to_string(),
            headers,
            from_cache: false,
            body,
        }
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Whether the status is in the success range.
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn body_len(&self) -> usize {
        self.body.len()
    }

    /// Split into two independent responses carrying the same payload.
    /// Must happen before either copy is consumed.
    pub fn duplicate(self) -> (Self, Self) {
        let copy = Self {
            status: self.status,
            status_text: self.status_text.clone(),
            headers: self.headers.clone(),
            from_cache: self.from_cache,
            body: self.body.clone(),
        };
        (self, copy)
    }

    /// Consume the response, yielding the body.
    pub fn into_bytes(self) -> Vec<u8> {
        self.body
    }

    /// Consume the response into a snapshot suitable for a cache bucket,
    /// stamped with the capture time.
    pub fn into_stored(self) -> StoredResponse {
        StoredResponse {
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            body: self.body,
            stored_at: Utc::now(),
        }
    }
}

/// A response snapshot held in a cache bucket: status, headers, body, and
/// the time it was captured.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StoredResponse {
    pub status: u16,
    pub status_text: String,
    pub headers: HashMap<String, String>,
    pub body: Vec<u8>,
    pub stored_at: DateTime<Utc>,
}

impl StoredResponse {
    /// Rehydrate into a servable response. The copy is marked as
    /// cache-originated.
    pub fn into_response(self) -> NetworkResponse {
        NetworkResponse {
            status: self.status,
            status_text: self.status_text,
            headers: self.headers,
            from_cache: true,
            body: self.body,
        }
    }
}

/// Reason phrase for common status codes.
fn status_text(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        301 => "Moved Permanently",
        302 => "Found",
        304 => "Not Modified",
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ok_range() {
        assert!(NetworkResponse::new(200, vec![]).ok());
        assert!(NetworkResponse::new(204, vec![]).ok());
        assert!(!NetworkResponse::new(304, vec![]).ok());
        assert!(!NetworkResponse::new(404, vec![]).ok());
    }

    #[test]
    fn test_duplicate_preserves_both_copies() {
        let response = NetworkResponse::new(200, b"<html></html>".to_vec())
            .with_header("content-type", "text/html");

        let (a, b) = response.duplicate();
        assert_eq!(a.status, b.status);
        assert_eq!(a.headers, b.headers);
        assert_eq!(a.into_bytes(), b.into_bytes());
    }

    #[test]
    fn test_stored_round_trip() {
        let response = NetworkResponse::new(200, b"body".to_vec())
            .with_header("content-type", "application/javascript");

        let stored = response.into_stored();
        let json = serde_json::to_string(&stored).unwrap();
        let parsed: StoredResponse = serde_json::from_str(&json).unwrap();
        assert_eq!(stored, parsed);

        let served = parsed.into_response();
        assert!(served.from_cache);
        assert_eq!(served.status, 200);
        assert_eq!(served.into_bytes(), b"body".to_vec());
    }

    #[test]
    fn test_status_text_lookup() {
        assert_eq!(NetworkResponse::new(404, vec![]).status_text, "Not Found");
        assert_eq!(NetworkResponse::new(299, vec![]).status_text, "");
    }
}
