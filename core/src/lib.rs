//! Typed client for the Video Downloader HTTP API.
//!
//! # Overview
//! The downloader itself (media extraction, rate limiting) lives behind a
//! REST surface this crate only calls. Two layers are exposed:
//!
//! - [`VideoClient`] builds `HttpRequest` values and parses `HttpResponse`
//!   values without touching the network, so request construction and
//!   response interpretation can be tested offline and driven by any
//!   transport.
//! - [`VideoApi`] is the blocking facade: one ureq round trip per operation
//!   with a fixed timeout, no retry, and every failure normalized into
//!   [`ApiError`].
//!
//! [`validate::precheck_url`] offers the advisory client-side URL check
//! interactive consumers run before going to the network.
//!
//! DTOs are defined independently from the mock-server crate; integration
//! tests catch schema drift.

pub mod api;
pub mod client;
pub mod error;
pub mod http;
pub mod types;
pub mod validate;

pub use api::VideoApi;
pub use client::VideoClient;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use types::{
    DirectUrlInfo, DirectUrlResponse, DownloadInfo, DownloadResponse, DownloadStatus,
    DownloadStatusResponse, ErrorBody, HealthResponse, InfoResponse, Platform, PlatformEntry,
    PlatformsResponse, Quality, RateLimitStatusResponse, RateLimitWindow, ValidateResponse,
    VideoFormat, VideoInfo,
};
pub use validate::{detect_platform, precheck_url, PrecheckError};
