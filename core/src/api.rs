//! Executing facade over the sans-IO client.
//!
//! # Design
//! `VideoApi` owns a [`VideoClient`] plus a `ureq` agent and performs one
//! blocking round trip per operation: build the request, execute it, parse
//! the response. There is no retry, no backoff and no connection state beyond
//! what the agent keeps implicitly. ureq's status-as-error behavior is
//! disabled so 4xx/5xx responses come back as data and status interpretation
//! stays with the parsers.

use std::time::Duration;

use uuid::Uuid;

use crate::client::VideoClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{
    DirectUrlResponse, DownloadResponse, DownloadStatusResponse, HealthResponse, InfoResponse,
    PlatformsResponse, Quality, RateLimitStatusResponse, ValidateResponse,
};

/// Timeout applied to every round trip, connection included.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Blocking facade for the downloader API.
///
/// Construct once with the API's base URL and pass to call sites; all
/// configuration lives in the value, none in globals.
#[derive(Debug)]
pub struct VideoApi {
    client: VideoClient,
    agent: ureq::Agent,
}

impl VideoApi {
    pub fn new(base_url: &str) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();
        Self {
            client: VideoClient::new(base_url),
            agent,
        }
    }

    /// The sans-IO client this facade drives, for callers that want to
    /// execute requests through their own transport.
    pub fn client(&self) -> &VideoClient {
        &self.client
    }

    fn execute(&self, request: HttpRequest) -> Result<HttpResponse, ApiError> {
        let HttpRequest {
            method,
            path,
            headers,
            body,
        } = request;
        tracing::debug!(?method, %path, "sending API request");

        let result = match (method, body) {
            (HttpMethod::Get, _) => {
                let mut call = self.agent.get(&path);
                for (name, value) in &headers {
                    call = call.header(name, value);
                }
                call.call()
            }
            (HttpMethod::Post, Some(body)) => {
                let mut call = self.agent.post(&path);
                for (name, value) in &headers {
                    call = call.header(name, value);
                }
                call.send(body.as_bytes())
            }
            (HttpMethod::Post, None) => {
                let mut call = self.agent.post(&path);
                for (name, value) in &headers {
                    call = call.header(name, value);
                }
                call.send_empty()
            }
        };

        let mut response = result.map_err(|e| ApiError::Transport(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| ApiError::Transport(e.to_string()))?;
        tracing::debug!(status, bytes = body.len(), "API response received");

        Ok(HttpResponse {
            status,
            headers: Vec::new(),
            body,
        })
    }

    pub fn check_health(&self) -> Result<HealthResponse, ApiError> {
        let request = self.client.build_health();
        self.client.parse_health(self.execute(request)?)
    }

    pub fn supported_platforms(&self) -> Result<PlatformsResponse, ApiError> {
        let request = self.client.build_supported_platforms();
        self.client.parse_supported_platforms(self.execute(request)?)
    }

    pub fn validate_url(&self, url: &str) -> Result<ValidateResponse, ApiError> {
        let request = self.client.build_validate_url(url)?;
        self.client.parse_validate_url(self.execute(request)?)
    }

    pub fn video_info(&self, url: &str) -> Result<InfoResponse, ApiError> {
        let request = self.client.build_video_info(url)?;
        self.client.parse_video_info(self.execute(request)?)
    }

    pub fn download_link(&self, url: &str, quality: Quality) -> Result<DownloadResponse, ApiError> {
        let request = self.client.build_download_link(url, quality)?;
        self.client.parse_download_link(self.execute(request)?)
    }

    pub fn direct_url(&self, url: &str, quality: Quality) -> Result<DirectUrlResponse, ApiError> {
        let request = self.client.build_direct_url(url, quality)?;
        self.client.parse_direct_url(self.execute(request)?)
    }

    pub fn download_status(&self, download_id: Uuid) -> Result<DownloadStatusResponse, ApiError> {
        let request = self.client.build_download_status(download_id);
        self.client.parse_download_status(self.execute(request)?)
    }

    pub fn rate_limit_status(&self) -> Result<RateLimitStatusResponse, ApiError> {
        let request = self.client.build_rate_limit_status();
        self.client.parse_rate_limit_status(self.execute(request)?)
    }
}
