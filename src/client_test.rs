use super::*;
use crate::error::TransportError;
use crate::request::{CACHE_BUSTER_PARAM, Method, NONCE_HEADER};
use std::collections::VecDeque;
use std::sync::Mutex;

const ROOT: &str = "https://example.test/wp-json/";
const NONCE: &str = "nonce-1";

// =========================================================================
// RecordingTransport
// =========================================================================

#[derive(Default)]
struct RecordingTransport {
    requests: Mutex<Vec<ApiRequest>>,
    responses: Mutex<VecDeque<Result<RawResponse, TransportError>>>,
}

impl RecordingTransport {
    fn with_responses(responses: Vec<Result<RawResponse, TransportError>>) -> Self {
        Self { requests: Mutex::new(Vec::new()), responses: Mutex::new(responses.into()) }
    }

    fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn last(&self) -> ApiRequest {
        self.requests.lock().unwrap().last().cloned().expect("no request recorded")
    }
}

#[async_trait::async_trait]
impl Transport for RecordingTransport {
    async fn send(&self, request: ApiRequest) -> Result<RawResponse, TransportError> {
        self.requests.lock().unwrap().push(request);
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(RawResponse::new(200, "{}")))
    }
}

fn client() -> RestApiClient<RecordingTransport> {
    RestApiClient::new(RecordingTransport::default(), ClientConfig::new(ROOT, NONCE))
}

fn client_with(responses: Vec<Result<RawResponse, TransportError>>) -> RestApiClient<RecordingTransport> {
    RestApiClient::new(RecordingTransport::with_responses(responses), ClientConfig::new(ROOT, NONCE))
}

fn url_without_cache_buster(url: &str) -> String {
    let (path, query) = url.split_once('?').expect("GET url has a query");
    let kept: Vec<&str> = query
        .split('&')
        .filter(|pair| !pair.starts_with(&format!("{CACHE_BUSTER_PARAM}=")))
        .collect();
    if kept.is_empty() { path.to_owned() } else { format!("{path}?{}", kept.join("&")) }
}

fn body_json(request: &ApiRequest) -> Value {
    serde_json::from_str(request.body.as_deref().expect("request has a body")).unwrap()
}

// =========================================================================
// Request construction
// =========================================================================

#[tokio::test]
async fn get_operations_hit_expected_paths() {
    let api = client();
    api.fetch_site_connection_status().await.unwrap();
    api.fetch_user_connection_data().await.unwrap();
    api.fetch_connect_url().await.unwrap();
    api.fetch_modules().await.unwrap();
    api.fetch_module("stats").await.unwrap();
    api.get_protect_count().await.unwrap();
    api.get_vault_press_data().await.unwrap();
    api.get_akismet_data().await.unwrap();
    api.check_akismet_key().await.unwrap();
    api.get_plugin_updates().await.unwrap();
    api.fetch_settings().await.unwrap();
    api.fetch_plugins_data().await.unwrap();

    let paths: Vec<String> = api
        .transport()
        .requests()
        .iter()
        .map(|r| {
            assert_eq!(r.method, Method::Get);
            assert!(r.body.is_none());
            url_without_cache_buster(&r.url).trim_start_matches(ROOT).to_owned()
        })
        .collect();
    assert_eq!(
        paths,
        vec![
            "jetpack/v4/connection",
            "jetpack/v4/connection/data",
            "jetpack/v4/connection/url",
            "jetpack/v4/module/all",
            "jetpack/v4/module/stats",
            "jetpack/v4/module/protect/data",
            "jetpack/v4/module/vaultpress/data",
            "jetpack/v4/module/akismet/data",
            "jetpack/v4/module/akismet/key/check",
            "jetpack/v4/updates/plugins",
            "jetpack/v4/settings",
            "jetpack/v4/plugins",
        ]
    );
}

#[tokio::test]
async fn get_requests_carry_cache_buster_and_nonce() {
    let api = client();
    api.fetch_settings().await.unwrap();
    let req = api.transport().last();
    let (_, query) = req.url.split_once('?').unwrap();
    let stamp = query
        .strip_prefix("_cacheBuster=")
        .expect("cache buster is the only param");
    assert!(stamp.parse::<u64>().is_ok());
    assert_eq!(req.header(NONCE_HEADER), Some(NONCE));
    assert_eq!(req.header("content-type"), None);
}

#[tokio::test]
async fn fetch_stats_data_appends_range_before_cache_buster() {
    let api = client();
    api.fetch_stats_data("day").await.unwrap();
    let req = api.transport().last();
    assert!(req.url.starts_with("https://example.test/wp-json/jetpack/v4/module/stats/data?range=day&_cacheBuster="));
    assert_eq!(url_without_cache_buster(&req.url), format!("{ROOT}jetpack/v4/module/stats/data?range=day"));
}

#[tokio::test]
async fn post_operations_send_expected_bodies() {
    let api = client();
    api.disconnect_site().await.unwrap();
    api.unlink_user().await.unwrap();
    api.activate_module("protect").await.unwrap();
    api.deactivate_module("protect").await.unwrap();
    api.update_module_options("sharedaddy", &json!({ "show": ["post"] })).await.unwrap();
    api.update_settings(&json!({ "carousel": true, "lazy-images": false })).await.unwrap();
    api.reset_options("options").await.unwrap();
    api.check_akismet_key_typed("abc123").await.unwrap();
    api.update_setting(&json!({ "infinite-scroll": true })).await.unwrap();
    api.dismiss_jetpack_notice("feedback_dash_request").await.unwrap();

    let seen: Vec<(String, Value)> = api
        .transport()
        .requests()
        .iter()
        .map(|r| {
            assert_eq!(r.method, Method::Post);
            assert_eq!(r.header("Content-type"), Some("application/json"));
            assert_eq!(r.header(NONCE_HEADER), Some(NONCE));
            assert!(!r.url.contains(CACHE_BUSTER_PARAM));
            (r.url.trim_start_matches(ROOT).to_owned(), body_json(r))
        })
        .collect();

    let expected = vec![
        ("jetpack/v4/connection", json!({ "isActive": false })),
        ("jetpack/v4/connection/user", json!({ "linked": false })),
        ("jetpack/v4/module/protect/active", json!({ "active": true })),
        ("jetpack/v4/module/protect/active", json!({ "active": false })),
        ("jetpack/v4/module/sharedaddy", json!({ "show": ["post"] })),
        ("jetpack/v4/settings", json!({ "carousel": true, "lazy-images": false })),
        ("jetpack/v4/options/options", json!({ "reset": true })),
        ("jetpack/v4/module/akismet/key/check", json!({ "api_key": "abc123" })),
        ("jetpack/v4/settings", json!({ "infinite-scroll": true })),
        ("jetpack/v4/notice/feedback_dash_request", json!({ "dismissed": true })),
    ];
    let expected: Vec<(String, Value)> = expected.into_iter().map(|(p, b)| (p.to_owned(), b)).collect();
    assert_eq!(seen, expected);
}

#[tokio::test]
async fn jump_start_maps_tokens_to_active_flag() {
    let api = client();
    api.jump_start("activate").await.unwrap();
    api.jump_start("deactivate").await.unwrap();
    api.jump_start("nope").await.unwrap();

    let bodies: Vec<String> = api
        .transport()
        .requests()
        .into_iter()
        .map(|r| {
            assert_eq!(r.url, format!("{ROOT}jetpack/v4/jumpstart"));
            r.body.unwrap()
        })
        .collect();
    assert_eq!(bodies, vec![r#"{"active":true}"#, r#"{"active":false}"#, "{}"]);
}

// =========================================================================
// Configuration
// =========================================================================

#[tokio::test]
async fn configure_replaces_root_and_nonce_for_later_calls() {
    let mut api = client();
    api.fetch_modules().await.unwrap();
    api.configure("https://other.test/api/", "nonce-2");
    api.fetch_modules().await.unwrap();
    api.activate_module("stats").await.unwrap();

    let requests = api.transport().requests();
    assert!(requests[0].url.starts_with(ROOT));
    for req in &requests[1..] {
        assert!(req.url.starts_with("https://other.test/api/jetpack/v4/"));
        assert_eq!(req.header(NONCE_HEADER), Some("nonce-2"));
        assert!(!req.url.contains("example.test"));
    }
    assert_eq!(api.config(), &ClientConfig::new("https://other.test/api/", "nonce-2"));
}

#[tokio::test]
async fn set_api_root_and_nonce_change_one_field_each() {
    let mut api = client();
    api.set_api_root("/wp-json/");
    assert_eq!(api.config().nonce, NONCE);
    api.set_api_nonce("fresh");
    assert_eq!(api.config().api_root, "/wp-json/");

    api.fetch_plugins_data().await.unwrap();
    let req = api.transport().last();
    assert!(req.url.starts_with("/wp-json/jetpack/v4/plugins?"));
    assert_eq!(req.header(NONCE_HEADER), Some("fresh"));
}

// =========================================================================
// Response handling
// =========================================================================

#[tokio::test]
async fn success_resolves_to_body_unchanged() {
    let body = r#"[{"module":"stats","active":true},{"module":"protect","active":false}]"#;
    let api = client_with(vec![Ok(RawResponse::new(200, body))]);
    let value = api.fetch_modules().await.unwrap();
    assert_eq!(value, serde_json::from_str::<Value>(body).unwrap());
}

#[tokio::test]
async fn site_endpoints_decode_data_field() {
    let api = client_with(vec![
        Ok(RawResponse::new(200, r#"{"code":"success","data":"{\"plan\":{\"product_slug\":\"jetpack_free\"}}"}"#)),
        Ok(RawResponse::new(200, r#"{"code":"success","data":"{\"active\":[\"akismet\"]}"}"#)),
    ]);
    let site = api.fetch_site_data().await.unwrap();
    assert_eq!(site, json!({ "plan": { "product_slug": "jetpack_free" } }));
    let features = api.fetch_site_features().await.unwrap();
    assert_eq!(features, json!({ "active": ["akismet"] }));

    let urls: Vec<String> = api.transport().requests().iter().map(|r| url_without_cache_buster(&r.url)).collect();
    assert_eq!(urls, vec![format!("{ROOT}jetpack/v4/site"), format!("{ROOT}jetpack/v4/site/features")]);
}

#[tokio::test]
async fn site_data_with_undecodable_data_is_encoded_data_error() {
    let api = client_with(vec![Ok(RawResponse::new(200, r#"{"data":"not json"}"#))]);
    let err = api.fetch_site_data().await.unwrap_err();
    assert!(matches!(err, ApiError::EncodedData(_)));
}

#[tokio::test]
async fn not_found_is_api_error_with_server_message() {
    let api = client_with(vec![Ok(RawResponse::new(404, r#"{"message":"not found"}"#))]);
    let err = api.fetch_module("nope").await.unwrap_err();
    assert_eq!(err.to_string(), "not found");
    assert_eq!(err.status(), Some(404));
    assert_eq!(err.body(), Some(&json!({ "message": "not found" })));
}

#[tokio::test]
async fn invalid_json_success_body_is_parse_error() {
    let api = client_with(vec![Ok(RawResponse::new(200, "not-json"))]);
    let err = api.fetch_settings().await.unwrap_err();
    assert!(matches!(err, ApiError::ResponseParse { .. }));
    assert!(err.to_string().starts_with("Couldn't understand Jetpack's REST API response"));
}

#[tokio::test]
async fn invalid_json_error_body_is_parse_error_not_api_error() {
    let api = client_with(vec![Ok(RawResponse::new(500, "Internal Server Error"))]);
    let err = api.deactivate_module("stats").await.unwrap_err();
    assert!(matches!(err, ApiError::ResponseParse { .. }));
}

#[tokio::test]
async fn transport_failure_is_network_error() {
    let api = client_with(vec![Err(TransportError::Request("dns failure".to_owned()))]);
    let err = api.fetch_site_connection_status().await.unwrap_err();
    assert!(err.is_network());
    assert!(matches!(err, ApiError::Network(TransportError::Request(ref m)) if m == "dns failure"));
}

#[tokio::test]
async fn concurrent_calls_each_issue_one_request() {
    let api = client();
    let (modules, settings) = tokio::join!(api.fetch_modules(), api.fetch_settings());
    assert!(modules.is_ok());
    assert!(settings.is_ok());
    assert_eq!(api.transport().requests().len(), 2);
}
