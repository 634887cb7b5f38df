//! HTTP transport types shared by the request builders and the executor.
//!
//! # Design
//! These types describe HTTP requests and responses as plain data. The
//! builders in [`crate::client`] produce `HttpRequest` values and the parsers
//! consume `HttpResponse` values without ever touching the network; the
//! executor in [`crate::api`] (or any caller-supplied transport) performs the
//! actual I/O. The separation keeps request construction and response
//! interpretation deterministic and testable offline.
//!
//! All fields use owned types (`String`, `Vec`) so values can be captured in
//! test vectors and moved across threads without lifetime concerns.

/// HTTP method for a request. The downloader API surface uses nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `VideoClient::build_*` methods. Whoever executes this request
/// against the network returns the corresponding `HttpResponse`.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

/// An HTTP response described as plain data.
///
/// Constructed by the transport after executing an `HttpRequest`, then passed
/// to `VideoClient::parse_*` methods for status checking and deserialization.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
