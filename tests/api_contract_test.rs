use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use site_forge::config::toml_config::ServerConfig;
use site_forge::{
    build_router, GatewayError, GatewaySettings, GenerationBackend, GenerationRequest, Result,
    SiteGateway,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tower::ServiceExt;

#[derive(Clone)]
enum Reply {
    Text(&'static str),
    Unavailable,
    Hang,
}

#[derive(Clone)]
struct StubModel {
    reply: Reply,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl GenerationBackend for StubModel {
    async fn generate(&self, _request: &GenerationRequest) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Unavailable => Err(GatewayError::UpstreamStatus {
                status: 503,
                body: "overloaded".to_string(),
            }),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(30)).await;
                Ok(String::new())
            }
        }
    }
}

fn router_with(reply: Reply) -> (Router, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let stub = StubModel {
        reply,
        calls: Arc::clone(&calls),
    };
    let settings = GatewaySettings {
        timeout: Duration::from_millis(100),
        ..Default::default()
    };
    let gateway = Arc::new(SiteGateway::new(stub, settings));
    (build_router(gateway, &ServerConfig::default()), calls)
}

async fn post_generate(router: Router, body: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/generate")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_success_returns_four_string_fields() {
    let (router, calls) = router_with(Reply::Text(
        r#"{"html":"<h1>Bakery</h1>","css":"h1{color:red}","js":"","notes":"simple"}"#,
    ));

    let (status, body) = post_generate(router, r#"{"prompt":"a bakery landing page"}"#).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"html":"<h1>Bakery</h1>","css":"h1{color:red}","js":"","notes":"simple"})
    );
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_missing_fields_are_empty_strings_not_null() {
    let (router, _) = router_with(Reply::Text(r#"{"html":"<p>x</p>"}"#));

    let (status, body) = post_generate(router, r#"{"prompt":"x"}"#).await;

    assert_eq!(status, StatusCode::OK);
    for field in ["html", "css", "js", "notes"] {
        assert!(body[field].is_string(), "{} should be a string", field);
    }
    assert_eq!(body["notes"], "");
}

#[tokio::test]
async fn test_blank_prompts_are_rejected_without_model_call() {
    for payload in [r#"{"prompt":""}"#, r#"{"prompt":"   "}"#, r#"{}"#, r#"{"prompt":null}"#] {
        let (router, calls) = router_with(Reply::Text("{}"));
        let (status, body) = post_generate(router, payload).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "payload {}", payload);
        assert_eq!(body, json!({"error": "Missing 'prompt' in request body."}));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }
}

#[tokio::test]
async fn test_unparseable_body_is_bad_request() {
    let (router, calls) = router_with(Reply::Text("{}"));
    let (status, body) = post_generate(router, r#"{"prompt": 42}"#).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_non_json_model_output_is_server_error_without_fields() {
    let (router, _) = router_with(Reply::Text("not json"));

    let (status, body) = post_generate(router, r#"{"prompt":"a bakery"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Website generation failed. Check server logs.");
    assert!(body["details"]
        .as_str()
        .unwrap()
        .starts_with("Model did not return valid JSON"));
    for field in ["html", "css", "js", "notes"] {
        assert!(body.get(field).is_none());
    }
}

#[tokio::test]
async fn test_upstream_failure_is_server_error_with_details() {
    let (router, _) = router_with(Reply::Unavailable);

    let (status, body) = post_generate(router, r#"{"prompt":"a bakery"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Model API returned 503: overloaded");
}

#[tokio::test]
async fn test_hanging_model_times_out() {
    let (router, _) = router_with(Reply::Hang);

    let (status, body) = post_generate(router, r#"{"prompt":"a bakery"}"#).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["details"], "Model request timed out after 100ms");
}

#[tokio::test]
async fn test_repeated_calls_normalize_identically() {
    let (router, calls) = router_with(Reply::Text(r#"{"html":"a","css":"b","js":"c"}"#));

    let (_, first) = post_generate(router.clone(), r#"{"prompt":"same"}"#).await;
    let (_, second) = post_generate(router, r#"{"prompt":"same"}"#).await;

    assert_eq!(first, second);
    assert_eq!(first["notes"], "");
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_static_files_are_served() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("index.html"), "<h1>preview shell</h1>").unwrap();

    let gateway = Arc::new(SiteGateway::new(
        StubModel {
            reply: Reply::Text("{}"),
            calls: Arc::new(AtomicUsize::new(0)),
        },
        GatewaySettings::default(),
    ));
    let server = ServerConfig {
        static_dir: dir.path().to_str().unwrap().to_string(),
        ..Default::default()
    };
    let router = build_router(gateway, &server);

    let response = router
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>preview shell</h1>");
}

#[tokio::test]
async fn test_oversized_body_names_the_limit() {
    let (router, calls) = router_with(Reply::Text("{}"));
    let limit = ServerConfig::default().body_limit_bytes;
    let payload = format!(r#"{{"prompt":"{}"}}"#, "a".repeat(limit + 1024));

    let (status, body) = post_generate(router, &payload).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(
        body,
        json!({"error": format!("Request body exceeds {} bytes.", limit)})
    );
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_cors_preflight_allows_any_origin() {
    let (router, calls) = router_with(Reply::Text("{}"));

    let response = router
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/generate")
                .header("origin", "http://example.com")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}
