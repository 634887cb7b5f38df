//! Mock of the Video Downloader API for tests and local development.
//!
//! Reproduces the real service's observable contract: endpoint paths,
//! request validation order, success and error envelopes. Extraction is
//! canned; no media is touched. URLs whose path contains `private` simulate
//! an unavailable video so error paths can be exercised deterministically.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use url::Url;
use uuid::Uuid;

const SERVICE_NAME: &str = "Video Downloader API";

/// Domain allow-list of the modeled service.
const SUPPORTED_DOMAINS: &[&str] = &[
    "youtube.com",
    "www.youtube.com",
    "youtu.be",
    "m.youtube.com",
    "tiktok.com",
    "www.tiktok.com",
    "vm.tiktok.com",
    "instagram.com",
    "www.instagram.com",
];

/// A completed server-side download, kept until its expiry stamp passes.
#[derive(Debug, Clone, Serialize)]
pub struct StoredDownload {
    pub download_id: Uuid,
    pub title: String,
    pub file_extension: String,
    pub file_size: u64,
    pub quality: String,
    pub platform: String,
    pub download_count: u64,
    pub expires_at: DateTime<Utc>,
}

pub type Downloads = Arc<RwLock<HashMap<Uuid, StoredDownload>>>;

/// Request body shared by the POST endpoints. `url` stays optional so the
/// handlers can answer the service's "URL is required" envelope instead of a
/// deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct VideoRequestBody {
    pub url: Option<String>,
    #[serde(default)]
    pub quality: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthReply {
    pub status: &'static str,
    pub timestamp: i64,
    pub service: &'static str,
    pub database: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PlatformEntryReply {
    pub name: &'static str,
    pub domains: Vec<&'static str>,
    pub icon: &'static str,
    pub color: &'static str,
}

#[derive(Debug, Serialize)]
pub struct PlatformsReply {
    pub success: bool,
    pub platforms: BTreeMap<&'static str, PlatformEntryReply>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VideoInfoReply {
    pub title: String,
    pub description: String,
    pub duration: u64,
    pub duration_string: String,
    pub thumbnail: String,
    pub uploader: String,
    pub upload_date: String,
    pub view_count: u64,
    pub like_count: u64,
    pub webpage_url: String,
    pub formats: Vec<FormatReply>,
    pub video_id: String,
    pub platform: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct FormatReply {
    pub format_id: &'static str,
    pub quality: f64,
    pub resolution: &'static str,
    pub fps: f64,
    pub file_extension: &'static str,
    pub file_size: u64,
    pub format_note: &'static str,
    pub vcodec: &'static str,
    pub acodec: &'static str,
}

#[derive(Debug, Serialize)]
pub struct InfoReply {
    pub success: bool,
    pub platform: String,
    pub data: VideoInfoReply,
}

#[derive(Debug, Serialize)]
pub struct DownloadInfoReply {
    pub download_id: Uuid,
    pub title: String,
    pub filename: String,
    pub file_extension: String,
    pub file_size: u64,
    pub quality: String,
    pub format_id: String,
    pub resolution: String,
    pub fps: f64,
    pub duration: u64,
    pub thumbnail: String,
    pub platform: String,
    pub download_url: String,
}

#[derive(Debug, Serialize)]
pub struct DownloadReply {
    pub success: bool,
    pub platform: String,
    pub data: DownloadInfoReply,
}

/// Error envelope mirroring the service's `{error, message}` failures.
#[derive(Debug)]
pub struct ErrorReply {
    status: StatusCode,
    error: &'static str,
    message: &'static str,
}

impl ErrorReply {
    fn bad_request(error: &'static str, message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            error,
            message,
        }
    }

    fn not_found(error: &'static str, message: &'static str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            error,
            message,
        }
    }
}

impl IntoResponse for ErrorReply {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(json!({ "error": self.error, "message": self.message })),
        )
            .into_response()
    }
}

pub fn app() -> Router {
    let downloads: Downloads = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/health", get(health))
        .route("/api/supported-platforms", get(supported_platforms))
        .route("/api/video/validate", post(validate_video_url))
        .route("/api/video/info", post(video_info))
        .route("/api/video/download", post(download_video))
        .route("/api/video/direct-url", post(direct_url))
        .route("/api/download/status/{id}", get(download_status))
        .route("/api/rate-limit/status", get(rate_limit_status))
        .fallback(endpoint_not_found)
        .with_state(downloads)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

fn host_is_supported(host: &str) -> bool {
    SUPPORTED_DOMAINS
        .iter()
        .any(|domain| domain_matches(host, domain))
}

fn platform_for_host(host: &str) -> &'static str {
    if host.contains("youtube") || host.contains("youtu.be") {
        "youtube"
    } else if host.contains("tiktok") {
        "tiktok"
    } else if host.contains("instagram") {
        "instagram"
    } else {
        "unknown"
    }
}

/// Apply the service's validation order: url present, non-empty, supported.
/// Returns the parsed URL and the detected platform.
fn require_supported_url(body: &VideoRequestBody) -> Result<(Url, &'static str), ErrorReply> {
    let Some(raw) = body.url.as_deref() else {
        return Err(ErrorReply::bad_request(
            "Invalid request",
            "URL is required in request body",
        ));
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ErrorReply::bad_request("Invalid URL", "URL cannot be empty"));
    }
    let unsupported = || {
        ErrorReply::bad_request(
            "Unsupported platform",
            "URL must be from YouTube, TikTok, or Instagram",
        )
    };
    let parsed = Url::parse(raw).map_err(|_| unsupported())?;
    let host = parsed
        .host_str()
        .map(|host| host.to_ascii_lowercase())
        .unwrap_or_default();
    if !host_is_supported(&host) {
        return Err(unsupported());
    }
    let platform = platform_for_host(&host);
    Ok((parsed, platform))
}

/// The mock treats any URL whose path mentions `private` as unavailable.
fn video_is_unavailable(url: &Url) -> bool {
    url.path().contains("private")
}

fn format_duration(duration: u64) -> String {
    let hours = duration / 3600;
    let minutes = (duration % 3600) / 60;
    let seconds = duration % 60;
    if hours > 0 {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes:02}:{seconds:02}")
    }
}

/// Stable id for a URL so repeated calls return identical metadata.
fn video_id_for(url: &Url) -> String {
    if let Some((_, v)) = url.query_pairs().find(|(key, _)| key == "v") {
        return v.into_owned();
    }
    url.path_segments()
        .and_then(|segments| {
            segments
                .rev()
                .find(|segment| !segment.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "video".to_string())
}

fn sample_info(url: &Url, platform: &str) -> VideoInfoReply {
    let video_id = video_id_for(url);
    let duration = 212;
    VideoInfoReply {
        title: format!("Sample {platform} video {video_id}"),
        description: "Canned metadata served by the mock downloader.".to_string(),
        duration,
        duration_string: format_duration(duration),
        thumbnail: format!("https://img.videodl.example/{video_id}/cover.jpg"),
        uploader: "Mock Uploader".to_string(),
        upload_date: "20240101".to_string(),
        view_count: 1_234_567,
        like_count: 98_765,
        webpage_url: url.to_string(),
        formats: vec![
            FormatReply {
                format_id: "18",
                quality: 1.0,
                resolution: "640x360",
                fps: 30.0,
                file_extension: "mp4",
                file_size: 12_582_912,
                format_note: "360p",
                vcodec: "avc1.42001E",
                acodec: "mp4a.40.2",
            },
            FormatReply {
                format_id: "22",
                quality: 2.0,
                resolution: "1280x720",
                fps: 30.0,
                file_extension: "mp4",
                file_size: 24_117_248,
                format_note: "720p",
                vcodec: "avc1.64001F",
                acodec: "mp4a.40.2",
            },
        ],
        video_id,
        platform: platform.to_string(),
    }
}

async fn health() -> Json<HealthReply> {
    Json(HealthReply {
        status: "healthy",
        timestamp: Utc::now().timestamp(),
        service: SERVICE_NAME,
        database: "not_configured",
    })
}

async fn supported_platforms() -> Json<PlatformsReply> {
    let mut platforms = BTreeMap::new();
    platforms.insert(
        "youtube",
        PlatformEntryReply {
            name: "YouTube",
            domains: vec!["youtube.com", "www.youtube.com", "youtu.be", "m.youtube.com"],
            icon: "fab fa-youtube",
            color: "#FF0000",
        },
    );
    platforms.insert(
        "tiktok",
        PlatformEntryReply {
            name: "TikTok",
            domains: vec!["tiktok.com", "www.tiktok.com", "vm.tiktok.com"],
            icon: "fab fa-tiktok",
            color: "#000000",
        },
    );
    platforms.insert(
        "instagram",
        PlatformEntryReply {
            name: "Instagram",
            domains: vec!["instagram.com", "www.instagram.com"],
            icon: "fab fa-instagram",
            color: "#E4405F",
        },
    );
    Json(PlatformsReply {
        success: true,
        platforms,
    })
}

async fn validate_video_url(
    Json(body): Json<VideoRequestBody>,
) -> Result<Json<Value>, ErrorReply> {
    let Some(raw) = body.url.as_deref() else {
        return Err(ErrorReply::bad_request(
            "Invalid request",
            "URL is required in request body",
        ));
    };
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Json(json!({ "valid": false, "error": "URL cannot be empty" })));
    }
    let host = Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_ascii_lowercase()));
    let valid = host.as_deref().map(host_is_supported).unwrap_or(false);
    let platform = valid.then(|| platform_for_host(host.as_deref().unwrap_or("")));
    Ok(Json(json!({ "valid": valid, "platform": platform, "url": raw })))
}

async fn video_info(Json(body): Json<VideoRequestBody>) -> Result<Json<InfoReply>, ErrorReply> {
    let (url, platform) = require_supported_url(&body)?;
    tracing::info!(%url, platform, "video info requested");
    if video_is_unavailable(&url) {
        return Err(ErrorReply::not_found(
            "Video not found",
            "Could not retrieve video information. The video may be private or unavailable.",
        ));
    }
    Ok(Json(InfoReply {
        success: true,
        platform: platform.to_string(),
        data: sample_info(&url, platform),
    }))
}

async fn download_video(
    State(downloads): State<Downloads>,
    Json(body): Json<VideoRequestBody>,
) -> Result<Json<DownloadReply>, ErrorReply> {
    let (url, platform) = require_supported_url(&body)?;
    tracing::info!(%url, platform, "download requested");
    if video_is_unavailable(&url) {
        return Err(ErrorReply::not_found(
            "Video not available",
            "Could not download video. The video may be private or unavailable.",
        ));
    }
    let quality = body.quality.unwrap_or_else(|| "best".to_string());
    let info = sample_info(&url, platform);
    let download_id = Uuid::new_v4();
    let file_size = 24_117_248;

    downloads.write().await.insert(
        download_id,
        StoredDownload {
            download_id,
            title: info.title.clone(),
            file_extension: "mp4".to_string(),
            file_size,
            quality: quality.clone(),
            platform: platform.to_string(),
            download_count: 0,
            expires_at: Utc::now() + chrono::Duration::hours(24),
        },
    );

    Ok(Json(DownloadReply {
        success: true,
        platform: platform.to_string(),
        data: DownloadInfoReply {
            download_id,
            title: info.title,
            filename: format!("{download_id}.mp4"),
            file_extension: "mp4".to_string(),
            file_size,
            quality,
            format_id: "22".to_string(),
            resolution: "1280x720".to_string(),
            fps: 30.0,
            duration: info.duration,
            thumbnail: info.thumbnail,
            platform: platform.to_string(),
            download_url: format!("/api/serve/{download_id}"),
        },
    }))
}

async fn direct_url(Json(body): Json<VideoRequestBody>) -> Result<Json<Value>, ErrorReply> {
    let (url, platform) = require_supported_url(&body)?;
    if video_is_unavailable(&url) {
        return Err(ErrorReply::not_found(
            "Video not available",
            "Could not get direct download URL. The video may be private or unavailable.",
        ));
    }
    let quality = body.quality.unwrap_or_else(|| "best".to_string());
    let info = sample_info(&url, platform);
    Ok(Json(json!({
        "success": true,
        "platform": platform,
        "data": {
            "title": info.title,
            "download_url": format!("https://cdn.videodl.example/{}/{quality}.mp4", info.video_id),
            "file_extension": "mp4",
            "file_size": 24_117_248u64,
            "quality": quality,
            "format_id": "22",
            "resolution": "1280x720",
            "fps": 30.0,
            "duration": info.duration,
            "thumbnail": info.thumbnail,
            "platform": platform,
        }
    })))
}

async fn download_status(
    State(downloads): State<Downloads>,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, ErrorReply> {
    let mut store = downloads.write().await;
    let Some(record) = store.get(&id) else {
        return Err(ErrorReply::not_found(
            "Download not found",
            "Download ID not found or expired",
        ));
    };
    if record.expires_at < Utc::now() {
        store.remove(&id);
        return Err(ErrorReply::not_found("Download expired", "Download has expired"));
    }
    let record = record.clone();
    Ok(Json(json!({
        "success": true,
        "data": {
            "download_id": record.download_id,
            "title": record.title,
            "file_extension": record.file_extension,
            "file_size": record.file_size,
            "quality": record.quality,
            "platform": record.platform,
            "download_count": record.download_count,
            "expires_at": record.expires_at.to_rfc3339(),
            "download_url": format!("/api/serve/{}", record.download_id),
        }
    })))
}

async fn rate_limit_status() -> Json<Value> {
    Json(json!({
        "client_ip": "127.0.0.1",
        "rate_limit": {
            "max_requests": 10,
            "time_window": 60,
            "requests_made": 0,
            "requests_remaining": 10,
            "time_until_reset": 0.0,
        }
    }))
}

async fn endpoint_not_found() -> ErrorReply {
    ErrorReply::not_found("Not found", "The requested endpoint does not exist")
}
