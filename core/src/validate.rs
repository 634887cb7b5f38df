//! Client-side URL pre-validation.
//!
//! Advisory filtering that interactive consumers run before touching the
//! network; the authoritative check is the server's `/api/video/validate`
//! endpoint. A host matches when it equals a supported domain or is a
//! subdomain of one, which is stricter than plain substring matching and
//! rejects lookalike hosts.

use thiserror::Error;
use url::Url;

use crate::types::Platform;

/// Domains the downloader accepts, with the platform each resolves to.
/// Subdomains (`www.`, `m.`, `vm.`) match via the suffix rule.
const SUPPORTED_DOMAINS: &[(&str, Platform)] = &[
    ("youtube.com", Platform::Youtube),
    ("youtu.be", Platform::Youtube),
    ("tiktok.com", Platform::Tiktok),
    ("instagram.com", Platform::Instagram),
];

/// Why an input failed the pre-check. These short-circuit before any network
/// call and are shown to the user inline.
#[derive(Debug, Error)]
pub enum PrecheckError {
    #[error("please enter a video URL")]
    Empty,

    #[error("invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("unsupported platform: expected a YouTube, TikTok or Instagram URL")]
    UnsupportedPlatform,
}

fn domain_matches(host: &str, domain: &str) -> bool {
    host == domain
        || host
            .strip_suffix(domain)
            .is_some_and(|prefix| prefix.ends_with('.'))
}

/// Platform a hostname belongs to, if any.
pub fn detect_platform(host: &str) -> Option<Platform> {
    let host = host.to_ascii_lowercase();
    SUPPORTED_DOMAINS
        .iter()
        .find(|(domain, _)| domain_matches(&host, domain))
        .map(|(_, platform)| *platform)
}

/// Check that `input` is non-empty, parses as a URL, and points at a
/// supported platform. Returns the detected platform on success.
pub fn precheck_url(input: &str) -> Result<Platform, PrecheckError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(PrecheckError::Empty);
    }
    let parsed = Url::parse(input)?;
    parsed
        .host_str()
        .and_then(detect_platform)
        .ok_or(PrecheckError::UnsupportedPlatform)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn youtube_watch_url_passes() {
        let platform = precheck_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ").unwrap();
        assert_eq!(platform, Platform::Youtube);
    }

    #[test]
    fn short_and_mobile_hosts_pass() {
        assert_eq!(
            precheck_url("https://youtu.be/dQw4w9WgXcQ").unwrap(),
            Platform::Youtube
        );
        assert_eq!(
            precheck_url("https://m.youtube.com/watch?v=dQw4w9WgXcQ").unwrap(),
            Platform::Youtube
        );
        assert_eq!(
            precheck_url("https://vm.tiktok.com/ZMabcdef/").unwrap(),
            Platform::Tiktok
        );
        assert_eq!(
            precheck_url("https://www.instagram.com/reel/xyz/").unwrap(),
            Platform::Instagram
        );
    }

    #[test]
    fn unsupported_host_is_rejected() {
        let err = precheck_url("https://example.com/video").unwrap_err();
        assert!(matches!(err, PrecheckError::UnsupportedPlatform));
    }

    #[test]
    fn lookalike_host_is_rejected() {
        let err = precheck_url("https://notyoutube.com/watch?v=x").unwrap_err();
        assert!(matches!(err, PrecheckError::UnsupportedPlatform));
    }

    #[test]
    fn non_url_input_is_invalid() {
        let err = precheck_url("not-a-url").unwrap_err();
        assert!(matches!(err, PrecheckError::InvalidUrl(_)));
    }

    #[test]
    fn empty_and_whitespace_inputs_are_rejected() {
        assert!(matches!(precheck_url("").unwrap_err(), PrecheckError::Empty));
        assert!(matches!(precheck_url("   ").unwrap_err(), PrecheckError::Empty));
    }

    #[test]
    fn hostname_match_is_case_insensitive() {
        assert_eq!(
            precheck_url("https://WWW.YOUTUBE.COM/watch?v=dQw4w9WgXcQ").unwrap(),
            Platform::Youtube
        );
    }
}
