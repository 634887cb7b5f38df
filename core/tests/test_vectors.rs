//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Request and result bodies are compared as
//! parsed JSON to avoid false negatives from field ordering. A simulated
//! response body given as a JSON value is serialized before parsing; a plain
//! string is passed through raw (for non-JSON error pages).

use videodl_core::{
    ApiError, DownloadResponse, HttpMethod, HttpRequest, HttpResponse, InfoResponse, Quality,
    ValidateResponse, VideoClient,
};

const BASE_URL: &str = "http://localhost:5000";

fn client() -> VideoClient {
    VideoClient::new(BASE_URL)
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        other => panic!("unknown method: {other}"),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(
        req.method,
        parse_method(expected["method"].as_str().unwrap()),
        "{name}: method"
    );
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (
                pair[0].as_str().unwrap().to_string(),
                pair[1].as_str().unwrap().to_string(),
            )
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

fn simulated(case: &serde_json::Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    let body = match &sim["body"] {
        serde_json::Value::String(raw) => raw.clone(),
        value => value.to_string(),
    };
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers: Vec::new(),
        body,
    }
}

fn assert_http_error(name: &str, err: ApiError, expected: &serde_json::Value) {
    match err {
        ApiError::Http { status, message } => {
            assert_eq!(u64::from(status), expected["status"].as_u64().unwrap(), "{name}: status");
            assert_eq!(message, expected["message"].as_str().unwrap(), "{name}: message");
        }
        other => panic!("{name}: expected Http error, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// Validate
// ---------------------------------------------------------------------------

#[test]
fn validate_test_vectors() {
    let raw = include_str!("../../test-vectors/validate.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["input"]["url"].as_str().unwrap();

        let req = c.build_validate_url(url).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_validate_url(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_http_error(name, result.unwrap_err(), expected_error);
        } else {
            let parsed = result.unwrap();
            let expected: ValidateResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Info
// ---------------------------------------------------------------------------

#[test]
fn info_test_vectors() {
    let raw = include_str!("../../test-vectors/info.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["input"]["url"].as_str().unwrap();

        let req = c.build_video_info(url).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_video_info(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_http_error(name, result.unwrap_err(), expected_error);
        } else {
            let parsed = result.unwrap();
            let expected: InfoResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: parsed result");
        }
    }
}

// ---------------------------------------------------------------------------
// Download
// ---------------------------------------------------------------------------

#[test]
fn download_test_vectors() {
    let raw = include_str!("../../test-vectors/download.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let url = case["input"]["url"].as_str().unwrap();
        let quality: Quality = case["input"]["quality"].as_str().unwrap().parse().unwrap();

        let req = c.build_download_link(url, quality).unwrap();
        assert_request(name, &req, &case["expected_request"]);

        let result = c.parse_download_link(simulated(case));
        if let Some(expected_error) = case.get("expected_error") {
            assert_http_error(name, result.unwrap_err(), expected_error);
        } else {
            let parsed = result.unwrap();
            let expected: DownloadResponse =
                serde_json::from_value(case["expected_result"].clone()).unwrap();
            assert_eq!(parsed, expected, "{name}: parsed result");
        }
    }
}
