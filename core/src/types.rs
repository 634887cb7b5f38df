//! Request and response schemas for the downloader API.
//!
//! # Design
//! Every endpoint gets an explicit shape validated at the boundary instead of
//! a dynamic JSON value, so unexpected responses fail the parse rather than
//! surfacing as missing fields later. The shapes mirror what the API actually
//! emits; DTOs are defined independently from the mock-server crate, and the
//! integration tests catch any schema drift between the two.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Error envelope the API attaches to responses with status >= 400.
///
/// Both fields are optional: some failure paths emit only `error`, and
/// proxies in front of the API may emit neither.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Platform a video URL belongs to, as reported on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Youtube,
    Tiktok,
    Instagram,
    /// Anything the server reports that this client does not know about.
    #[serde(other)]
    Unknown,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Platform::Youtube => "youtube",
            Platform::Tiktok => "tiktok",
            Platform::Instagram => "instagram",
            Platform::Unknown => "unknown",
        };
        f.write_str(s)
    }
}

/// Download quality preference. `Best` is what the API assumes when the
/// field is omitted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Quality {
    #[default]
    #[serde(rename = "best")]
    Best,
    #[serde(rename = "worst")]
    Worst,
    #[serde(rename = "720p")]
    P720,
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "360p")]
    P360,
    #[serde(rename = "240p")]
    P240,
    #[serde(rename = "audio")]
    Audio,
}

impl Quality {
    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::Best => "best",
            Quality::Worst => "worst",
            Quality::P720 => "720p",
            Quality::P480 => "480p",
            Quality::P360 => "360p",
            Quality::P240 => "240p",
            Quality::Audio => "audio",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best" => Ok(Quality::Best),
            "worst" => Ok(Quality::Worst),
            "720p" => Ok(Quality::P720),
            "480p" => Ok(Quality::P480),
            "360p" => Ok(Quality::P360),
            "240p" => Ok(Quality::P240),
            "audio" => Ok(Quality::Audio),
            other => Err(format!(
                "unknown quality '{other}' (expected best, worst, 720p, 480p, 360p, 240p or audio)"
            )),
        }
    }
}

/// Response of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: i64,
    pub service: String,
    #[serde(default)]
    pub database: Option<String>,
}

/// Response of `GET /api/supported-platforms`.
///
/// Keyed by platform id; unknown keys still deserialize, so a server that
/// grows a new platform does not break older clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformsResponse {
    pub success: bool,
    pub platforms: BTreeMap<String, PlatformEntry>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlatformEntry {
    pub name: String,
    pub domains: Vec<String>,
    pub icon: String,
    pub color: String,
}

/// Body of `POST /api/video/validate`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateRequest {
    pub url: String,
}

/// Response of `POST /api/video/validate`.
///
/// The failure shapes differ: an empty URL answers `{valid, error}` while a
/// parseable one answers `{valid, platform, url}` with `platform` null when
/// the host is unsupported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidateResponse {
    pub valid: bool,
    #[serde(default)]
    pub platform: Option<Platform>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Body of `POST /api/video/info`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoRequest {
    pub url: String,
}

/// Response of `POST /api/video/info`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InfoResponse {
    pub success: bool,
    pub platform: Platform,
    pub data: VideoInfo,
}

/// Metadata the API extracts for a video, without downloading it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoInfo {
    pub title: String,
    pub description: String,
    /// Duration in seconds.
    pub duration: u64,
    /// Duration preformatted as `MM:SS` or `HH:MM:SS`.
    pub duration_string: String,
    pub thumbnail: String,
    pub uploader: String,
    pub upload_date: String,
    pub view_count: u64,
    pub like_count: u64,
    pub webpage_url: String,
    pub formats: Vec<VideoFormat>,
    pub video_id: String,
    pub platform: Platform,
}

/// One renderable format of a video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoFormat {
    pub format_id: String,
    /// Extractor-assigned quality rank; not comparable across platforms.
    pub quality: f64,
    pub resolution: String,
    pub fps: f64,
    pub file_extension: String,
    pub file_size: u64,
    pub format_note: String,
    pub vcodec: String,
    pub acodec: String,
}

/// Body of `POST /api/video/download`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadRequest {
    pub url: String,
    pub quality: Quality,
}

/// Response of `POST /api/video/download`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadResponse {
    pub success: bool,
    pub platform: Platform,
    pub data: DownloadInfo,
}

/// A server-side download the API has completed and will serve for a while.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadInfo {
    pub download_id: Uuid,
    pub title: String,
    pub filename: String,
    pub file_extension: String,
    pub file_size: u64,
    pub quality: Quality,
    pub format_id: String,
    pub resolution: String,
    pub fps: f64,
    pub duration: u64,
    pub thumbnail: String,
    pub platform: Platform,
    /// Server-relative path the finished file is served from.
    pub download_url: String,
}

/// Body of `POST /api/video/direct-url`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectUrlRequest {
    pub url: String,
    pub quality: Quality,
}

/// Response of `POST /api/video/direct-url`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectUrlResponse {
    pub success: bool,
    pub platform: Platform,
    pub data: DirectUrlInfo,
}

/// A direct media URL resolved without a server-side download.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DirectUrlInfo {
    pub title: String,
    pub download_url: String,
    pub file_extension: String,
    pub file_size: u64,
    pub quality: Quality,
    pub format_id: String,
    pub resolution: String,
    pub fps: f64,
    pub duration: u64,
    pub thumbnail: String,
    pub platform: Platform,
}

/// Response of `GET /api/download/status/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadStatusResponse {
    pub success: bool,
    pub data: DownloadStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DownloadStatus {
    pub download_id: Uuid,
    pub title: String,
    pub file_extension: String,
    pub file_size: u64,
    pub quality: Quality,
    pub platform: Platform,
    pub download_count: u64,
    /// RFC 3339 expiry stamp; carried opaquely, nothing client-side parses it.
    pub expires_at: String,
    pub download_url: String,
}

/// Response of `GET /api/rate-limit/status`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitStatusResponse {
    pub client_ip: String,
    pub rate_limit: RateLimitWindow,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateLimitWindow {
    pub max_requests: u32,
    /// Window length in seconds.
    pub time_window: u64,
    pub requests_made: u32,
    pub requests_remaining: u32,
    /// Seconds until the window resets; fractional on the wire.
    pub time_until_reset: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn platform_serializes_lowercase() {
        assert_eq!(serde_json::to_value(Platform::Youtube).unwrap(), "youtube");
        assert_eq!(serde_json::to_value(Platform::Tiktok).unwrap(), "tiktok");
    }

    #[test]
    fn unknown_platform_deserializes_to_catch_all() {
        let p: Platform = serde_json::from_str(r#""dailymotion""#).unwrap();
        assert_eq!(p, Platform::Unknown);
    }

    #[test]
    fn quality_round_trips_through_from_str() {
        for q in [
            Quality::Best,
            Quality::Worst,
            Quality::P720,
            Quality::P480,
            Quality::P360,
            Quality::P240,
            Quality::Audio,
        ] {
            assert_eq!(q.as_str().parse::<Quality>().unwrap(), q);
        }
    }

    #[test]
    fn quality_rejects_unknown_value() {
        let err = "1080p".parse::<Quality>().unwrap_err();
        assert!(err.contains("1080p"));
    }

    #[test]
    fn quality_serializes_as_wire_string() {
        assert_eq!(serde_json::to_value(Quality::P720).unwrap(), "720p");
        assert_eq!(serde_json::to_value(Quality::Best).unwrap(), "best");
    }

    #[test]
    fn validate_response_tolerates_error_shape() {
        let resp: ValidateResponse =
            serde_json::from_str(r#"{"valid":false,"error":"URL cannot be empty"}"#).unwrap();
        assert!(!resp.valid);
        assert!(resp.platform.is_none());
        assert_eq!(resp.error.as_deref(), Some("URL cannot be empty"));
    }
}
