//! Integration tests for event ownership over HTTP

mod common;

use axum::http::StatusCode;
use common::{event_body, unique_email, TestApp};
use serde_json::{json, Value};

fn names(list: &Value) -> Vec<String> {
    list.as_array()
        .unwrap()
        .iter()
        .map(|e| e["name"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_create_sets_owner_from_session() {
    let app = TestApp::new();
    let cookie = app.login_as(&unique_email("owner"), "secret1").await;
    let me = app.get("/me", Some(&cookie)).await.json();

    let mut body = event_body("Rock am Ring");
    body["createdBy"] = json!("00000000-0000-0000-0000-000000000000");
    let response = app.post("/api/events", body, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::CREATED);
    let event = response.json();
    assert_eq!(event["createdBy"], me["id"]);
    assert_eq!(event["dateFrom"], "2025-07-01");
    assert_eq!(event["location"]["name"], "Berlin");
}

#[tokio::test]
async fn test_anonymous_create_is_rejected() {
    let app = TestApp::new();

    let response = app.post("/api/events", event_body("Nope"), None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_create_with_missing_fields_is_validation_error() {
    let app = TestApp::new();
    let cookie = app.login_as(&unique_email("partial"), "secret1").await;

    let response = app
        .post("/api/events", json!({ "name": "No dates" }), Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.json()["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_rejects_inverted_dates() {
    let app = TestApp::new();
    let cookie = app.login_as(&unique_email("dates"), "secret1").await;

    let mut body = event_body("Backwards");
    body["dateFrom"] = json!("2025-07-05");
    let response = app.post("/api/events", body, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_anonymous_reads_are_empty_not_errors() {
    let app = TestApp::new();
    let cookie = app.login_as(&unique_email("seed"), "secret1").await;
    app.create_event(&cookie, "Hidden").await;

    let mine = app.get("/api/events", None).await;
    let public = app.get("/api/events/public", None).await;

    assert_eq!(mine.status, StatusCode::OK);
    assert_eq!(mine.json(), json!([]));
    assert_eq!(public.status, StatusCode::OK);
    assert_eq!(public.json(), json!([]));
}

#[tokio::test]
async fn test_mine_and_public_scopes() {
    let app = TestApp::new();
    let alice = app.login_as(&unique_email("alice"), "secret1").await;
    let bob = app.login_as(&unique_email("bob"), "secret1").await;

    app.create_event(&alice, "Alice Fest").await;
    app.create_event(&bob, "Bob Fest").await;

    let alice_mine = app.get("/api/events", Some(&alice)).await.json();
    let alice_public = app.get("/api/events/public", Some(&alice)).await.json();

    assert_eq!(names(&alice_mine), vec!["Alice Fest"]);
    assert_eq!(names(&alice_public), vec!["Alice Fest", "Bob Fest"]);
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    let app = TestApp::new();
    let alice = app.login_as(&unique_email("alice"), "secret1").await;
    let bob = app.login_as(&unique_email("bob"), "secret1").await;
    let event = app.create_event(&alice, "Alice Fest").await;
    let path = format!("/api/events/{}", event["id"].as_str().unwrap());

    let response = app.delete(&path, Some(&bob)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    assert_eq!(response.json()["error"]["code"], "UNAUTHORIZED");
    let still_there = app.get("/api/events", Some(&alice)).await.json();
    assert_eq!(names(&still_there), vec!["Alice Fest"]);
}

#[tokio::test]
async fn test_non_owner_cannot_update() {
    let app = TestApp::new();
    let alice = app.login_as(&unique_email("alice"), "secret1").await;
    let bob = app.login_as(&unique_email("bob"), "secret1").await;
    let event = app.create_event(&alice, "Alice Fest").await;
    let path = format!("/api/events/{}", event["id"].as_str().unwrap());

    let response = app.patch(&path, json!({ "name": "Bob's now" }), Some(&bob)).await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
    let unchanged = app.get("/api/events", Some(&alice)).await.json();
    assert_eq!(names(&unchanged), vec!["Alice Fest"]);
}

#[tokio::test]
async fn test_owner_updates_and_deletes() {
    let app = TestApp::new();
    let alice = app.login_as(&unique_email("alice"), "secret1").await;
    let event = app.create_event(&alice, "Alice Fest").await;
    let path = format!("/api/events/{}", event["id"].as_str().unwrap());

    let updated = app
        .patch(&path, json!({ "name": "Alice Fest 2", "dateTo": "2025-07-04" }), Some(&alice))
        .await;
    assert_eq!(updated.status, StatusCode::OK);
    let updated = updated.json();
    assert_eq!(updated["name"], "Alice Fest 2");
    assert_eq!(updated["dateTo"], "2025-07-04");
    assert_eq!(updated["createdBy"], event["createdBy"]);

    let deleted = app.delete(&path, Some(&alice)).await;
    assert_eq!(deleted.status, StatusCode::NO_CONTENT);
    assert_eq!(app.get("/api/events", Some(&alice)).await.json(), json!([]));

    let again = app.delete(&path, Some(&alice)).await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_patch_cannot_reassign_owner() {
    let app = TestApp::new();
    let alice = app.login_as(&unique_email("alice"), "secret1").await;
    let event = app.create_event(&alice, "Alice Fest").await;
    let path = format!("/api/events/{}", event["id"].as_str().unwrap());

    let response = app
        .patch(
            &path,
            json!({ "createdBy": "00000000-0000-0000-0000-000000000000" }),
            Some(&alice),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNPROCESSABLE_ENTITY);
    let list = app.get("/api/events", Some(&alice)).await.json();
    assert_eq!(list[0]["createdBy"], event["createdBy"]);
}

#[tokio::test]
async fn test_write_checks_run_in_order() {
    let app = TestApp::new();
    let alice = app.login_as(&unique_email("alice"), "secret1").await;
    let missing = format!("/api/events/{}", uuid::Uuid::new_v4());

    let anonymous = app.delete(&missing, None).await;
    let not_found = app.delete(&missing, Some(&alice)).await;

    assert_eq!(anonymous.status, StatusCode::UNAUTHORIZED);
    assert_eq!(not_found.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_search_with_session() {
    let app = TestApp::new();
    let cookie = app.login_as(&unique_email("search"), "secret1").await;

    let empty = app.get("/api/search/artists?name=", Some(&cookie)).await;
    let unconfigured = app.get("/api/search/locations?name=Berlin", Some(&cookie)).await;

    assert_eq!(empty.status, StatusCode::OK);
    assert_eq!(empty.json(), json!([]));
    assert_eq!(unconfigured.status, StatusCode::OK);
    assert_eq!(unconfigured.json(), json!([]));
}
