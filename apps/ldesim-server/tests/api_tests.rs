//! Integration tests for the simulator's HTTP API
//!
//! Drives the router with `tower::ServiceExt::oneshot`, without binding a port.

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use ldesim_codec::RdfCodec;
use ldesim_domain::controller::FragmentController;
use ldesim_domain::fragment::FragmentService;
use ldesim_memory::InMemoryFragmentRepository;
use ldesim_server::{config::DEFAULT_MAX_BODY_SIZE, create_router, AppState, HttpContextFetcher};
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;

const BASE_URL: &str = "http://localhost:3000";

const FRAGMENT: &str = r#"
@prefix tree: <https://w3id.org/tree#> .

<http://example.org/id/fragment/1> a tree:Node ;
    tree:relation [ tree:node <http://example.org/id/fragment/2> ] ,
                  [ tree:node <http://example.org/id/fragment/3> ] .
"#;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

fn app_with_limit(body_limit: usize) -> Router {
    let fetcher = HttpContextFetcher::new(Duration::from_secs(1)).unwrap();
    let service = FragmentService::with_context_fetcher(
        Url::parse(BASE_URL).unwrap(),
        InMemoryFragmentRepository::new(),
        fetcher,
    );
    let state = AppState::new(FragmentController::new(service), RdfCodec::new(), body_limit);
    create_router(state)
}

fn app() -> Router {
    app_with_limit(DEFAULT_MAX_BODY_SIZE)
}

async fn send(app: &Router, request: Request<Body>) -> Response {
    app.clone().oneshot(request).await.unwrap()
}

async fn post_fragment(app: &Router, uri: &str, content_type: &str, body: &str) -> Response {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

async fn post_alias(app: &Router, original: &str, alias: &str) -> Response {
    let request = Request::post("/alias")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({ "original": original, "alias": alias }).to_string(),
        ))
        .unwrap();
    send(app, request).await
}

async fn get(app: &Router, uri: &str, accept: Option<&str>) -> Response {
    let mut request = Request::get(uri);
    if let Some(accept) = accept {
        request = request.header(header::ACCEPT, accept);
    }
    send(app, request.body(Body::empty()).unwrap()).await
}

async fn body_text(response: Response) -> String {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn body_json(response: Response) -> Value {
    serde_json::from_str(&body_text(response).await).unwrap()
}

fn header_value<'a>(response: &'a Response, name: header::HeaderName) -> Option<&'a str> {
    response.headers().get(name).and_then(|value| value.to_str().ok())
}

// =============================================================================
// FRAGMENT CREATION
// =============================================================================

#[tokio::test]
async fn test_post_fragment() {
    let app = app();

    let response = post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({
            "id": "/id/fragment/1",
            "cache-control": "public, max-age=604800, immutable",
            "content-type": "text/turtle"
        })
    );
}

#[tokio::test]
async fn test_post_fragment_with_max_age() {
    let app = app();

    let response = post_fragment(&app, "/ldes?max-age=5", "text/turtle", FRAGMENT).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["cache-control"], "public, max-age=5");

    let response = get(&app, "/id/fragment/1", None).await;
    assert_eq!(
        header_value(&response, header::CACHE_CONTROL),
        Some("public, max-age=5")
    );
}

#[tokio::test]
async fn test_post_fragment_with_negative_max_age_is_immutable() {
    let app = app();

    let response = post_fragment(&app, "/ldes?max-age=-5", "text/turtle", FRAGMENT).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await["cache-control"],
        "public, max-age=604800, immutable"
    );
    assert_eq!(get(&app, "/id/fragment/1", None).await.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_post_fragment_with_fractional_max_age() {
    let response = post_fragment(&app(), "/ldes?max-age=1.5", "text/turtle", FRAGMENT).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["cache-control"], "public, max-age=1.5");
}

#[tokio::test]
async fn test_post_unsupported_content_type() {
    let response = post_fragment(&app(), "/ldes", "text/plain", FRAGMENT).await;

    assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
}

#[tokio::test]
async fn test_post_unparsable_fragment() {
    let response = post_fragment(&app(), "/ldes", "text/turtle", "<http://example.org/a> .").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert!(body_json(response).await["error"].is_string());
}

#[tokio::test]
async fn test_post_fragment_without_node_is_rejected() {
    let app = app();
    let body = "<http://example.org/member/1> <http://example.org/p> \"v\" .\n";

    let response = post_fragment(&app, "/ldes", "application/n-triples", body).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let statistics = body_json(get(&app, "/", None).await).await;
    assert_eq!(statistics["fragments"], json!([]));
}

#[tokio::test]
async fn test_post_over_body_limit() {
    let response = post_fragment(&app_with_limit(16), "/ldes", "text/turtle", FRAGMENT).await;

    assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
}

// =============================================================================
// FRAGMENT READS
// =============================================================================

#[tokio::test]
async fn test_get_fragment_defaults_to_turtle() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;

    let response = get(&app, "/id/fragment/1", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), Some("text/turtle"));
    assert_eq!(
        header_value(&response, header::CACHE_CONTROL),
        Some("public, max-age=604800, immutable")
    );
    let body = body_text(response).await;
    assert!(body.contains("<http://localhost:3000/id/fragment/1>"));
    assert!(body.contains("<http://localhost:3000/id/fragment/2>"));
    assert!(body.contains("<http://localhost:3000/id/fragment/3>"));
    assert!(!body.contains("example.org"));
}

#[tokio::test]
async fn test_get_fragment_as_json_ld() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;

    let response = get(&app, "/id/fragment/1", Some("application/ld+json")).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        Some("application/ld+json")
    );
    let body = body_json(response).await;
    let nodes = body.as_array().unwrap();
    assert_eq!(nodes[0]["@id"], "http://localhost:3000/id/fragment/1");
    assert_eq!(nodes[0]["@type"], json!(["https://w3id.org/tree#Node"]));
}

#[tokio::test]
async fn test_served_json_ld_can_be_posted_back() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;
    let served = body_text(get(&app, "/id/fragment/1", Some("application/ld+json")).await).await;

    let response = post_fragment(&app, "/ldes?max-age=10", "application/ld+json", &served).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], "/id/fragment/1");

    let response = get(&app, "/id/fragment/1", Some("text/turtle")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CACHE_CONTROL),
        Some("public, max-age=10")
    );
    let body = body_text(response).await;
    assert!(body.contains("<http://localhost:3000/id/fragment/2>"));
}

#[tokio::test]
async fn test_post_json_ld_graph_container() {
    let app = app();
    let body = json!({
        "@context": { "tree": "https://w3id.org/tree#" },
        "@graph": [{
            "@id": "http://example.org/id/fragment/7",
            "@type": "tree:Node",
            "tree:relation": { "tree:node": { "@id": "http://example.org/id/fragment/8" } }
        }]
    });

    let response = post_fragment(&app, "/ldes", "application/ld+json", &body.to_string()).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["id"], "/id/fragment/7");
    let response = get(&app, "/id/fragment/7", Some("application/n-triples")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert!(body_text(response)
        .await
        .contains("<http://localhost:3000/id/fragment/8>"));
}

#[tokio::test]
async fn test_get_json_ld_fragment_with_query() {
    let app = app();
    let body = json!({
        "@id": "http://example.org/fragment?page=2",
        "tree:relation": [{ "tree:node": "http://example.org/fragment?page=3" }]
    });
    let response =
        post_fragment(&app, "/ldes", "application/ld+json", &body.to_string()).await;
    assert_eq!(body_json(response).await["id"], "/fragment?page=2");

    let response = get(&app, "/fragment?page=2", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        header_value(&response, header::CONTENT_TYPE),
        Some("application/ld+json")
    );
    let body = body_json(response).await;
    assert_eq!(body["@id"], "http://localhost:3000/fragment?page=2");
    assert_eq!(
        body["tree:relation"][0]["tree:node"],
        "http://localhost:3000/fragment?page=3"
    );

    let response = get(&app, "/fragment?page=2", Some("text/turtle")).await;
    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_get_with_unacceptable_type() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;

    let response = get(&app, "/id/fragment/1", Some("text/html")).await;

    assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
}

#[tokio::test]
async fn test_head_fragment() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;

    let request = Request::builder()
        .method(Method::HEAD)
        .uri("/id/fragment/1")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(header_value(&response, header::CONTENT_TYPE), Some("text/turtle"));
    assert!(body_text(response).await.is_empty());
}

#[tokio::test]
async fn test_unknown_fragment_is_not_found_and_counted() {
    let app = app();

    let response = get(&app, "/dummy/id", None).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(body_text(response).await.is_empty());
    let statistics = body_json(get(&app, "/", None).await).await;
    assert_eq!(statistics["responses"]["/dummy/id"]["count"], 1);
    assert_eq!(
        statistics["responses"]["/dummy/id"]["at"]
            .as_array()
            .map(Vec::len),
        Some(1)
    );
}

// =============================================================================
// ALIASES
// =============================================================================

#[tokio::test]
async fn test_post_alias() {
    let response = post_alias(
        &app(),
        "http://example.org/id/fragment/1",
        "http://example.org/fragment?id=1",
    )
    .await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(
        body_json(response).await,
        json!({ "from": "/fragment?id=1", "to": "/id/fragment/1" })
    );
}

#[tokio::test]
async fn test_alias_redirects_to_request_host() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;
    post_alias(
        &app,
        "http://example.org/id/fragment/1",
        "http://example.org/fragment?id=1",
    )
    .await;

    let request = Request::get("/fragment?id=1")
        .header(header::HOST, "www.ldes-server-simulator.org")
        .body(Body::empty())
        .unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        header_value(&response, header::LOCATION),
        Some("http://www.ldes-server-simulator.org/id/fragment/1")
    );
}

#[tokio::test]
async fn test_alias_redirect_falls_back_to_base_url() {
    let app = app();
    post_alias(&app, "http://example.org/id/fragment/1", "http://example.org/ldes").await;

    let response = get(&app, "/ldes", None).await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(
        header_value(&response, header::LOCATION),
        Some("http://localhost:3000/id/fragment/1")
    );
    let statistics = body_json(get(&app, "/", None).await).await;
    assert_eq!(statistics["responses"], json!({}));
}

#[tokio::test]
async fn test_alias_cycle_is_a_conflict() {
    let app = app();
    post_alias(&app, "http://example.org/a", "http://example.org/b").await;

    let response = post_alias(&app, "http://example.org/b", "http://example.org/a").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_alias_with_relative_url_is_rejected() {
    let response = post_alias(&app(), "/id/fragment/1", "http://example.org/alias").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// STATISTICS & HOUSEKEEPING
// =============================================================================

#[tokio::test]
async fn test_statistics() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;
    post_alias(
        &app,
        "http://example.org/id/fragment/1",
        "http://example.org/fragment?id=1",
    )
    .await;
    get(&app, "/id/fragment/1", None).await;
    get(&app, "/fragment?id=1", None).await;

    let response = get(&app, "/", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let statistics = body_json(response).await;
    assert_eq!(statistics["aliases"], json!(["/fragment?id=1"]));
    assert_eq!(statistics["fragments"], json!(["/id/fragment/1"]));
    assert_eq!(statistics["responses"]["/id/fragment/1"]["count"], 1);
    assert!(statistics["responses"].get("/fragment?id=1").is_none());
}

#[tokio::test]
async fn test_delete_all() {
    let app = app();
    post_fragment(&app, "/ldes", "text/turtle", FRAGMENT).await;
    post_alias(
        &app,
        "http://example.org/id/fragment/1",
        "http://example.org/fragment?id=1",
    )
    .await;

    let request = Request::delete("/ldes").body(Body::empty()).unwrap();
    let response = send(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "aliasCount": 1, "fragmentCount": 1 })
    );
    assert_eq!(
        get(&app, "/id/fragment/1", None).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn test_health() {
    let response = get(&app(), "/health", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_text(response).await, "OK");
}

#[tokio::test]
async fn test_openapi_document() {
    let response = get(&app(), "/api-docs/openapi.json", None).await;

    assert_eq!(response.status(), StatusCode::OK);
    let document = body_json(response).await;
    assert!(document["paths"]["/ldes"].is_object());
    assert!(document["paths"]["/alias"].is_object());
}
