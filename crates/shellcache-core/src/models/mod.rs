//! Data models for intercepted requests and captured responses.
//!
//! This module contains the value types that flow through the interceptor:
//!
//! - `FetchRequest`, `Method`, `RequestMode`: one outgoing request as seen
//!   by the fetch handler
//! - `NetworkResponse`: a response payload whose body can be consumed
//!   exactly once
//! - `StoredResponse`: the serializable snapshot kept in a cache bucket

pub mod request;
pub mod response;

pub use request::{FetchRequest, Method, RequestMode};
pub use response::{NetworkResponse, StoredResponse};
