use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;
use vhub::domain::config::ApiConfig;
use vhub::domain::constants::{ENVIRONMENT_PATH, HEALTH_PATH, VOLUNTEERS_PATH};
use vhub::domain::environment::Environment;
use vhub_server::Server;

async fn app_with_store(url: &str) -> Router {
    let mut cfg = ApiConfig::default();
    cfg.database.url = url.to_owned();

    Server::builder()
        .config(cfg)
        .environment(Environment::Production)
        .build()
        .await
        .expect("server should build even without a store")
        .router()
}

async fn app() -> Router {
    app_with_store("mem://").await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() { Value::Null } else { serde_json::from_slice(&bytes).unwrap() };
    (status, body)
}

fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

fn post_json(path: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(Method::POST)
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn names(list: &Value) -> Vec<&str> {
    list.as_array().unwrap().iter().map(|v| v["name"].as_str().unwrap()).collect()
}

#[tokio::test]
async fn registered_volunteers_are_listed_newest_first() {
    let app = app().await;

    let (status, alex) = send(&app, post_json(VOLUNTEERS_PATH, &json!({ "name": "Alex" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(alex["name"], "Alex");
    assert!(alex["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert!(alex["createdAt"].is_string());

    let (_, list) = send(&app, get(VOLUNTEERS_PATH)).await;
    assert_eq!(names(&list), ["Alex"]);

    send(&app, post_json(VOLUNTEERS_PATH, &json!({ "name": "Bea" }))).await;

    let (status, list) = send(&app, get(VOLUNTEERS_PATH)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(names(&list), ["Bea", "Alex"]);
}

#[tokio::test]
async fn empty_and_missing_names_are_stored() {
    let app = app().await;

    let (status, empty) = send(&app, post_json(VOLUNTEERS_PATH, &json!({ "name": "" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["name"], "");

    let (status, missing) = send(&app, post_json(VOLUNTEERS_PATH, &json!({}))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(missing["name"], "");

    let (_, list) = send(&app, get(VOLUNTEERS_PATH)).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn null_and_numeric_names_are_stored_as_text() {
    let app = app().await;

    let (status, null) = send(&app, post_json(VOLUNTEERS_PATH, &json!({ "name": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(null["name"], "");

    let (status, number) = send(&app, post_json(VOLUNTEERS_PATH, &json!({ "name": 7 }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(number["name"], "7");
}

#[tokio::test]
async fn unreadable_bodies_get_a_generic_json_error() {
    let app = app().await;
    let rejected = json!({ "error": "Invalid request body" });

    let malformed = Request::post(VOLUNTEERS_PATH)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{\"name\":"))
        .unwrap();
    let (status, body) = send(&app, malformed).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, rejected);

    let (status, body) =
        send(&app, post_json(VOLUNTEERS_PATH, &json!({ "name": ["Alex"] }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, rejected);

    let untyped = Request::post(VOLUNTEERS_PATH).body(Body::from("name=Alex")).unwrap();
    let (status, body) = send(&app, untyped).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, rejected);

    let (_, list) = send(&app, get(VOLUNTEERS_PATH)).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn unreachable_store_answers_500_without_crashing() {
    let app = app_with_store("ws://127.0.0.1:9").await;

    let (status, body) = send(&app, post_json(VOLUNTEERS_PATH, &json!({ "name": "Alex" }))).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to save" }));

    let (status, body) = send(&app, get(VOLUNTEERS_PATH)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({ "error": "Failed to fetch" }));

    let (status, _) = send(&app, get(HEALTH_PATH)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn environment_reports_the_startup_value_and_a_fresh_host_check() {
    let app = app().await;

    let (status, body) = send(&app, get(ENVIRONMENT_PATH)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["environment"], "production");
    assert!(body["hostname"].is_string());
    assert!(body["isLocal"].is_boolean());
    assert!(body["networkInterfaces"].is_object());

    let has_loopback = body["networkInterfaces"]
        .as_object()
        .unwrap()
        .values()
        .flat_map(|addresses| addresses.as_array().unwrap())
        .any(|a| a["internal"] == true);
    if has_loopback {
        assert_eq!(body["isLocal"], true);
    }
}

#[tokio::test]
async fn health_reports_up() {
    let app = app().await;

    let (status, body) = send(&app, get(HEALTH_PATH)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "up");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    let app = app().await;

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri(VOLUNTEERS_PATH)
        .header(header::ORIGIN, "http://example.test")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn openapi_docs_are_served() {
    let app = app().await;

    let response = app.oneshot(get("/docs")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}
