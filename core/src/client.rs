//! Stateless HTTP request builder and response parser for the downloader API.
//!
//! # Design
//! `VideoClient` holds only a normalized `base_url` and carries no mutable
//! state between calls. Each operation is split into a `build_*` method that
//! produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`, so the I/O boundary stays explicit. [`crate::api`] wires
//! the two halves together over a real transport.
//!
//! Status interpretation is shared: anything below 400 is a success whose
//! body must decode into the endpoint's response type; anything at or above
//! 400 becomes an [`ApiError::Http`] carrying the message from the server's
//! error envelope when one is present.

use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::error::{ApiError, GENERIC_HTTP_ERROR};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    DirectUrlRequest, DirectUrlResponse, DownloadRequest, DownloadResponse,
    DownloadStatusResponse, ErrorBody, HealthResponse, InfoRequest, InfoResponse,
    PlatformsResponse, Quality, RateLimitStatusResponse, ValidateRequest, ValidateResponse,
};

/// Stateless client for the downloader API.
///
/// Builds `HttpRequest` values and parses `HttpResponse` values without
/// touching the network. Construct once with the API's base URL and share
/// freely; there is no ambient configuration.
#[derive(Debug, Clone)]
pub struct VideoClient {
    base_url: String,
}

impl VideoClient {
    /// Create a client for the API at `base_url`. Trailing slashes are
    /// stripped so endpoint paths can always be appended verbatim.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn get(&self, endpoint: &str) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}{endpoint}", self.base_url),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    fn post_json<T: Serialize>(&self, endpoint: &str, payload: &T) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(payload).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}{endpoint}", self.base_url),
            headers: vec![
                ("content-type".to_string(), "application/json".to_string()),
                ("accept".to_string(), "application/json".to_string()),
            ],
            body: Some(body),
        })
    }

    pub fn build_health(&self) -> HttpRequest {
        self.get("/api/health")
    }

    pub fn parse_health(&self, response: HttpResponse) -> Result<HealthResponse, ApiError> {
        parse_body(response)
    }

    pub fn build_supported_platforms(&self) -> HttpRequest {
        self.get("/api/supported-platforms")
    }

    pub fn parse_supported_platforms(
        &self,
        response: HttpResponse,
    ) -> Result<PlatformsResponse, ApiError> {
        parse_body(response)
    }

    pub fn build_validate_url(&self, url: &str) -> Result<HttpRequest, ApiError> {
        self.post_json("/api/video/validate", &ValidateRequest { url: url.to_string() })
    }

    pub fn parse_validate_url(&self, response: HttpResponse) -> Result<ValidateResponse, ApiError> {
        parse_body(response)
    }

    pub fn build_video_info(&self, url: &str) -> Result<HttpRequest, ApiError> {
        self.post_json("/api/video/info", &InfoRequest { url: url.to_string() })
    }

    pub fn parse_video_info(&self, response: HttpResponse) -> Result<InfoResponse, ApiError> {
        parse_body(response)
    }

    pub fn build_download_link(&self, url: &str, quality: Quality) -> Result<HttpRequest, ApiError> {
        self.post_json(
            "/api/video/download",
            &DownloadRequest { url: url.to_string(), quality },
        )
    }

    pub fn parse_download_link(&self, response: HttpResponse) -> Result<DownloadResponse, ApiError> {
        parse_body(response)
    }

    pub fn build_direct_url(&self, url: &str, quality: Quality) -> Result<HttpRequest, ApiError> {
        self.post_json(
            "/api/video/direct-url",
            &DirectUrlRequest { url: url.to_string(), quality },
        )
    }

    pub fn parse_direct_url(&self, response: HttpResponse) -> Result<DirectUrlResponse, ApiError> {
        parse_body(response)
    }

    pub fn build_download_status(&self, download_id: Uuid) -> HttpRequest {
        self.get(&format!("/api/download/status/{download_id}"))
    }

    pub fn parse_download_status(
        &self,
        response: HttpResponse,
    ) -> Result<DownloadStatusResponse, ApiError> {
        parse_body(response)
    }

    pub fn build_rate_limit_status(&self) -> HttpRequest {
        self.get("/api/rate-limit/status")
    }

    pub fn parse_rate_limit_status(
        &self,
        response: HttpResponse,
    ) -> Result<RateLimitStatusResponse, ApiError> {
        parse_body(response)
    }
}

/// Reject status >= 400, extracting the error-envelope message when present.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if response.status < 400 {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|envelope| envelope.message)
        .unwrap_or_else(|| GENERIC_HTTP_ERROR.to_string());
    Err(ApiError::Http {
        status: response.status,
        message,
    })
}

fn parse_body<T: DeserializeOwned>(response: HttpResponse) -> Result<T, ApiError> {
    check_status(&response)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
