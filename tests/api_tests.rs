use axum::{
    Json, Router,
    body::Body,
    extract::{Query, State},
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{TimeZone, Utc};
use http_body_util::BodyExt;
use pixrelay::config::Config;
use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tower::ServiceExt;

#[derive(Clone, Default)]
struct StubProvider {
    calls: Arc<AtomicUsize>,
}

async fn stub_search(
    State(stub): State<StubProvider>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    stub.calls.fetch_add(1, Ordering::SeqCst);

    if params.get("key").map(String::as_str) != Some("test-key") {
        return (StatusCode::BAD_REQUEST, "[ERROR 400] Invalid or missing API key").into_response();
    }
    assert_eq!(params.get("per_page").map(String::as_str), Some("10"));

    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(0);

    match params.get("q").map(String::as_str) {
        Some("bad") => {
            (StatusCode::BAD_REQUEST, "[ERROR 400] Invalid query").into_response()
        }
        Some("mixed") => Json(serde_json::json!({
            "totalHits": 2,
            "hits": [
                {"webformatURL": "https://cdn.test/a.jpg", "tags": 7, "pageURL": "p"},
                {"webformatURL": "https://cdn.test/b.jpg", "tags": "b"}
            ]
        }))
        .into_response(),
        Some("empty") => Json(serde_json::json!({"total": 0, "totalHits": 0, "hits": []}))
            .into_response(),
        Some(q) => {
            let count = if page == 2 { 3 } else { 1 };
            let hits: Vec<serde_json::Value> = (0..count)
                .map(|i| {
                    serde_json::json!({
                        "id": i,
                        "webformatURL": format!("https://cdn.test/{q}/{page}/{i}.jpg"),
                        "tags": format!("{q}, tag{i}"),
                        "pageURL": format!("https://pixabay.test/photos/{q}-{i}/"),
                        "likes": 42,
                        "user": "someone",
                    })
                })
                .collect();
            Json(serde_json::json!({"total": count, "totalHits": count, "hits": hits}))
                .into_response()
        }
        None => (StatusCode::BAD_REQUEST, "[ERROR 400] Missing query").into_response(),
    }
}

async fn spawn_stub_provider() -> (String, StubProvider) {
    let stub = StubProvider::default();
    let router = Router::new()
        .route("/api/", get(stub_search))
        .with_state(stub.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    (format!("http://{addr}/api/"), stub)
}

fn test_config(base_url: &str, api_key: Option<&str>) -> Config {
    let mut config = Config::default();
    config.general.database_path = "sqlite::memory:".to_string();
    config.general.max_db_connections = 1;
    config.general.min_db_connections = 1;
    config.provider.base_url = base_url.to_string();
    config.provider.api_key = api_key.map(str::to_string);
    config.observability.metrics_enabled = false;
    config
}

async fn spawn_app(config: Config) -> (Arc<pixrelay::api::AppState>, Router) {
    let state = pixrelay::api::create_app_state_from_config(config, None)
        .await
        .expect("Failed to create app state");
    let router = pixrelay::api::router(state.clone());
    (state, router)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

async fn wait_for_recent(app: &Router, expected: usize) -> serde_json::Value {
    for _ in 0..50 {
        let (_, body) = get_json(app, "/recent/").await;
        if body.as_array().is_some_and(|a| a.len() >= expected) {
            return body;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    get_json(app, "/recent/").await.1
}

#[tokio::test]
async fn test_search_returns_projected_hits_for_page() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (status, body) = get_json(&app, "/query/cats?page=2").await;

    assert_eq!(status, StatusCode::OK);
    let results = body.as_array().unwrap();
    assert_eq!(results.len(), 3);

    for (i, result) in results.iter().enumerate() {
        let obj = result.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert_eq!(obj["url"], format!("https://cdn.test/cats/2/{i}.jpg"));
        assert_eq!(obj["description"], format!("cats, tag{i}"));
        assert_eq!(obj["pageURL"], format!("https://pixabay.test/photos/cats-{i}/"));
    }
}

#[tokio::test]
async fn test_search_term_is_url_escaped() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (status, body) = get_json(&app, "/query/cats%20funny%26more").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["description"], "cats funny&more, tag0");
}

#[tokio::test]
async fn test_non_numeric_page_behaves_like_first_page() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (_, first) = get_json(&app, "/query/dogs?page=1").await;
    let (_, missing) = get_json(&app, "/query/dogs").await;
    let (_, garbage) = get_json(&app, "/query/dogs?page=abc").await;
    let (_, zero) = get_json(&app, "/query/dogs?page=0").await;

    assert_eq!(first.as_array().unwrap().len(), 1);
    assert_eq!(first, missing);
    assert_eq!(first, garbage);
    assert_eq!(first, zero);
}

#[tokio::test]
async fn test_trailing_slash_after_search_string_is_a_search() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (_, plain) = get_json(&app, "/query/cats?page=2").await;
    let (status, slashed) = get_json(&app, "/query/cats/?page=2").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(slashed.as_array().unwrap().len(), 3);
    assert_eq!(plain, slashed);
}

#[tokio::test]
async fn test_non_utf8_search_string_is_json_client_error() {
    let (base_url, stub) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (status, body) = get_json(&app, "/query/%FF").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Search string is not valid UTF-8.");
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_hit_values_pass_through_whatever_their_type() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (status, body) = get_json(&app, "/query/mixed").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {"url": "https://cdn.test/a.jpg", "description": 7, "pageURL": "p"},
            {"url": "https://cdn.test/b.jpg", "description": "b"}
        ])
    );
}

#[tokio::test]
async fn test_empty_result_set_is_empty_array() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (status, body) = get_json(&app, "/query/empty").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, serde_json::json!([]));
}

#[tokio::test]
async fn test_provider_error_status_and_details_are_propagated() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (status, body) = get_json(&app, "/query/bad").await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Error from Pixabay API");
    assert_eq!(body["details"], "[ERROR 400] Invalid query");
}

#[tokio::test]
async fn test_missing_api_key_is_server_error_without_provider_call() {
    let (base_url, stub) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, None)).await;

    let (status, body) = get_json(&app, "/query/cats").await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Pixabay API key not configured on the server.");
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_missing_search_string_is_client_error() {
    let (base_url, stub) = spawn_stub_provider().await;

    for api_key in [Some("test-key"), None] {
        let (_, app) = spawn_app(test_config(&base_url, api_key)).await;

        for uri in ["/query/", "/query"] {
            let (status, body) = get_json(&app, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(body["error"], "Search string is required.");
        }
    }

    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_unreachable_provider_is_service_unavailable() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let (_, app) = spawn_app(test_config(&format!("http://{addr}/api/"), Some("test-key"))).await;

    let (status, body) = get_json(&app, "/query/cats").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "No response from Pixabay API");
}

#[tokio::test]
async fn test_recent_lists_newest_first_without_ids() {
    let (base_url, _) = spawn_stub_provider().await;
    let (state, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let t1 = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
    let t2 = Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap();
    state.search_log().record_at("a", t1).await.unwrap();
    state.search_log().record_at("b", t2).await.unwrap();

    let (status, body) = get_json(&app, "/recent/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        serde_json::json!([
            {"term": "b", "when": "2024-05-01T11:00:00Z"},
            {"term": "a", "when": "2024-05-01T10:00:00Z"},
        ])
    );
}

#[tokio::test]
async fn test_recent_is_capped_at_ten() {
    let (base_url, _) = spawn_stub_provider().await;
    let (state, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    for i in 0..12 {
        state
            .search_log()
            .record_at(&format!("term {i}"), start + chrono::Duration::minutes(i))
            .await
            .unwrap();
    }

    let (_, body) = get_json(&app, "/recent").await;
    let terms: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["term"].as_str().unwrap())
        .collect();

    assert_eq!(terms.len(), 10);
    assert_eq!(terms.first(), Some(&"term 11"));
    assert_eq!(terms.last(), Some(&"term 2"));
}

#[tokio::test]
async fn test_searches_are_logged_even_when_provider_fails() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (status, _) = get_json(&app, "/query/bad").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let body = wait_for_recent(&app, 1).await;
    assert_eq!(body[0]["term"], "bad");
}

#[tokio::test]
async fn test_store_outage_fails_recent_but_not_search() {
    let (base_url, _) = spawn_stub_provider().await;
    let (state, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let (_, before) = get_json(&app, "/query/cats?page=2").await;

    state.store().conn.clone().close().await.unwrap();

    let (status, after) = get_json(&app, "/query/cats?page=2").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(before, after);

    let (status, body) = get_json(&app, "/recent/").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to retrieve recent searches");
}

#[tokio::test]
async fn test_usage_page() {
    let (base_url, _) = spawn_stub_provider().await;
    let (_, app) = spawn_app(test_config(&base_url, Some("test-key"))).await;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(body.to_vec()).unwrap();
    assert!(text.contains("/query/"));
    assert!(text.contains("/recent/"));
}
