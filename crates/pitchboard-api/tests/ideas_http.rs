use std::sync::Arc;
use std::time::Duration;

use axum::{
    Router,
    body::Body,
    http::{Method, Request, StatusCode, header},
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use pitchboard_api::router;
use pitchboard_api::state::{AppState, AppStateInner};
use pitchboard_db::Database;

fn app() -> (Router, AppState) {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let state = AppStateInner::new(db);
    (router(state.clone()), state)
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    dispatch(app, builder.body(body).unwrap()).await
}

async fn dispatch(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create(app: &Router, title: &str) -> Value {
    let (status, idea) = send(
        app,
        Method::POST,
        "/api/ideas",
        Some(json!({ "title": title, "description": "pitch", "tag": "AI" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    idea
}

#[tokio::test]
async fn create_then_fetch() {
    let (app, _) = app();

    let idea = create(&app, "Uber for pencils").await;
    assert_eq!(idea["votes"], 0);
    assert_eq!(idea["comments"], 0);
    let id = idea["id"].as_str().unwrap();
    assert!(!id.is_empty());

    let (status, fetched) = send(&app, Method::GET, &format!("/api/ideas/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, idea);
}

#[tokio::test]
async fn create_validation_is_bad_request() {
    let (app, state) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({ "title": "t", "description": "d".repeat(141), "tag": "AI" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Description must be 140 characters or less");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({ "title": "t", "tag": "AI" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(state.ledger.is_empty().unwrap());
}

#[tokio::test]
async fn unknown_idea_is_not_found() {
    let (app, _) = app();

    let (status, body) = send(&app, Method::GET, "/api/ideas/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Idea not found");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/ideas/nope/vote",
        Some(json!({ "vote_type": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn votes_reorder_listing() {
    let (app, _) = app();

    let a = create(&app, "A").await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    let b = create(&app, "B").await;
    let a_id = a["id"].as_str().unwrap();

    // Tie at zero: newest first.
    let (_, listed) = send(&app, Method::GET, "/api/ideas", None).await;
    assert_eq!(listed[0]["id"], b["id"]);

    let (status, ack) = send(
        &app,
        Method::POST,
        &format!("/api/ideas/{}/vote", a_id),
        Some(json!({ "voteType": "up" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ack, json!({ "success": true, "message": "Vote recorded successfully" }));

    let (_, first) = send(&app, Method::GET, "/api/ideas", None).await;
    let (_, second) = send(&app, Method::GET, "/api/ideas", None).await;
    assert_eq!(first, second);
    assert_eq!(first[0]["id"], a["id"]);
    assert_eq!(first[0]["votes"], 1);
}

#[tokio::test]
async fn sideways_vote_is_rejected_without_side_effects() {
    let (app, state) = app();
    let idea = create(&app, "A").await;
    let id = idea["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/ideas/{}/vote", id),
        Some(json!({ "vote_type": "sideways" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(state.votes.journal().entries_for(id).unwrap().is_empty());
    assert_eq!(state.ledger.get_by_id(id).unwrap().votes, 0);
}

#[tokio::test]
async fn concurrent_http_votes_all_count() {
    let (app, state) = app();
    let idea = create(&app, "A").await;
    let id = idea["id"].as_str().unwrap().to_string();

    let mut handles = Vec::new();
    for _ in 0..100 {
        let app = app.clone();
        let uri = format!("/api/ideas/{}/vote", id);
        handles.push(tokio::spawn(async move {
            send(&app, Method::POST, &uri, Some(json!({ "vote_type": "up" }))).await.0
        }));
    }
    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(state.ledger.get_by_id(&id).unwrap().votes, 100);
}

#[tokio::test]
async fn empty_listing_is_empty_array() {
    let (app, _) = app();
    let (status, body) = send(&app, Method::GET, "/api/ideas", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn create_ignores_unknown_fields() {
    let (app, _) = app();

    let (status, idea) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({ "title": "t", "description": "d", "tag": "AI", "votes": 9000 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(idea["votes"], 0);
}

#[tokio::test]
async fn null_fields_fail_validation() {
    let (app, state) = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({ "title": null, "description": "d", "tag": "AI" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Title, description, and tag are required");
    assert!(state.ledger.is_empty().unwrap());

    let idea = create(&app, "A").await;
    let id = idea["id"].as_str().unwrap();
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/ideas/{}/vote", id),
        Some(json!({ "vote_type": null })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
    assert!(state.votes.journal().entries_for(id).unwrap().is_empty());
}

#[tokio::test]
async fn malformed_bodies_are_json_bad_requests() {
    let (app, state) = app();

    // Wrong field type
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/ideas",
        Some(json!({ "title": 7, "description": "d", "tag": "AI" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // No content type
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ideas")
        .body(Body::from(r#"{"title":"t","description":"d","tag":"AI"}"#))
        .unwrap();
    let (status, body) = dispatch(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Not JSON at all
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/ideas")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = dispatch(&app, request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    assert!(state.ledger.is_empty().unwrap());
}
