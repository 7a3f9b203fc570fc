//! Integration tests for document upload, download, listing, and removal.

mod helpers;

use axum::http::StatusCode;
use serde_json::json;

use helpers::TestApp;

const PDF: &[u8] = b"%PDF-1.7\n1 0 obj\n<<>>\nendobj\n%%EOF";

#[tokio::test]
async fn test_grant_scenario_over_http() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;
    let bob = app.user("bob00001").await;
    let carl = app.user("carl0001").await;

    let created = app
        .upload_file(
            json!({ "name": "contract.pdf", "file": true, "mime": "application/pdf", "grant": ["bob00001"] }),
            PDF,
            "application/pdf",
            Some(&alice),
        )
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["granted_to"], json!(["bob00001"]));
    let id = created.body["data"]["id"].as_str().unwrap().to_string();
    let path = format!("/api/docs/{id}");

    let anonymous = app.request("GET", &path, None, None).await;
    assert_eq!(anonymous.status, StatusCode::FORBIDDEN);

    let read = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.raw, PDF);
    assert_eq!(read.header("content-type"), Some("application/pdf"));
    assert_eq!(
        read.header("content-disposition"),
        Some("attachment; filename=\"contract.pdf\"")
    );
    assert!(read.header("last-modified").is_some_and(|v| v.ends_with("GMT")));

    let denied = app.request("DELETE", &path, None, Some(&carl)).await;
    assert_eq!(denied.status, StatusCode::FORBIDDEN);

    let deleted = app.request("DELETE", &path, None, Some(&bob)).await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body["response"][id.as_str()], true);

    let gone = app.request("GET", &path, None, Some(&bob)).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"]["code"], 404);
}

#[tokio::test]
async fn test_structured_document_round_trip() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;
    let payload = json!({ "title": "Quarterly", "figures": [1, 2, 3], "nested": { "ok": true } });

    let created = app
        .upload_json(json!({ "name": "report", "public": true }), payload.clone(), Some(&alice))
        .await;
    assert_eq!(created.status, StatusCode::CREATED, "{:?}", created.body);
    assert_eq!(created.body["data"]["is_file"], false);
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let read = app
        .request("GET", &format!("/api/docs/{id}"), None, None)
        .await;
    assert_eq!(read.status, StatusCode::OK);
    assert_eq!(read.body["data"], payload);
}

#[tokio::test]
async fn test_head_returns_headers_only() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;
    let created = app
        .upload_file(
            json!({ "name": "scan.pdf", "file": true, "public": true }),
            PDF,
            "application/pdf",
            Some(&alice),
        )
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let head = app
        .request("HEAD", &format!("/api/docs/{id}"), None, None)
        .await;
    assert_eq!(head.status, StatusCode::OK);
    assert!(head.raw.is_empty());
    assert_eq!(head.header("content-length"), Some(PDF.len().to_string().as_str()));
}

#[tokio::test]
async fn test_upload_rejects_disallowed_mime() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;

    let response = app
        .upload_file(
            json!({ "name": "page.html", "file": true, "mime": "text/html" }),
            b"<html></html>",
            "text/html",
            Some(&alice),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_text(), "Mime type not allowed.");
    assert_eq!(app.db.document_count().await, 0);
}

#[tokio::test]
async fn test_upload_requires_token() {
    let app = TestApp::new();

    let response = app
        .upload_json(json!({ "name": "note" }), json!({ "a": 1 }), None)
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_upload_with_unknown_grantee_stores_nothing() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;
    app.register("bob00001").await;

    let response = app
        .upload_json(
            json!({ "name": "shared", "grant": ["bob00001", "ghost0001"] }),
            json!({ "a": 1 }),
            Some(&alice),
        )
        .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.error_text(), "Internal server error.");
    assert_eq!(app.db.document_count().await, 0);
}

#[tokio::test]
async fn test_private_document_with_invalid_token() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;
    let created = app
        .upload_json(json!({ "name": "diary" }), json!({ "entry": "x" }), Some(&alice))
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("GET", &format!("/api/docs/{id}"), None, Some("not-a-token"))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_id_is_not_found() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;

    let response = app
        .request("GET", "/api/docs/not-a-uuid", None, Some(&alice))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_defaults_and_filters() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;

    for i in (0..12).rev() {
        let response = app
            .upload_json(json!({ "name": format!("note-{i:02}") }), json!({ "i": i }), Some(&alice))
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }
    app.upload_file(
        json!({ "name": "a-scan.png", "file": true, "mime": "image/png" }),
        b"\x89PNG\r\n\x1a\n",
        "image/png",
        Some(&alice),
    )
    .await;

    let all = app.request("GET", "/api/docs", None, Some(&alice)).await;
    assert_eq!(all.status, StatusCode::OK);
    let docs = all.body["data"]["docs"].as_array().unwrap();
    assert_eq!(docs.len(), 10);
    assert_eq!(docs[0]["filename"], "a-scan.png");
    assert_eq!(docs[1]["filename"], "note-00");

    let files = app
        .request("GET", "/api/docs?key=is-file&value=true", None, Some(&alice))
        .await;
    let docs = files.body["data"]["docs"].as_array().unwrap();
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["mimetype"], "image/png");

    let limited = app
        .request("GET", "/api/docs?limit=3", None, Some(&alice))
        .await;
    assert_eq!(limited.body["data"]["docs"].as_array().unwrap().len(), 3);

    let bad_key = app
        .request("GET", "/api/docs?key=owner_login&value=x", None, Some(&alice))
        .await;
    assert_eq!(bad_key.status, StatusCode::BAD_REQUEST);

    let no_value = app
        .request("GET", "/api/docs?key=name", None, Some(&alice))
        .await;
    assert_eq!(no_value.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_requires_token() {
    let app = TestApp::new();

    let response = app.request("GET", "/api/docs", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_list_other_login_shows_public_unless_admin() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;
    let bob = app.user("bob00001").await;
    app.register_admin("root0001").await;
    let root = app.login("root0001").await;

    app.upload_json(json!({ "name": "open", "public": true }), json!({ "a": 1 }), Some(&alice))
        .await;
    app.upload_json(json!({ "name": "closed" }), json!({ "a": 2 }), Some(&alice))
        .await;

    let as_bob = app
        .request("GET", "/api/docs?login=alice0001", None, Some(&bob))
        .await;
    let names: Vec<&str> = as_bob.body["data"]["docs"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|d| d["filename"].as_str())
        .collect();
    assert_eq!(names, vec!["open"]);

    let as_root = app
        .request("GET", "/api/docs?login=alice0001", None, Some(&root))
        .await;
    assert_eq!(as_root.body["data"]["docs"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_admin_can_delete_any_document() {
    let app = TestApp::new();
    let alice = app.user("alice0001").await;
    app.register_admin("root0001").await;
    let root = app.login("root0001").await;

    let created = app
        .upload_json(json!({ "name": "private" }), json!({ "a": 1 }), Some(&alice))
        .await;
    let id = created.body["data"]["id"].as_str().unwrap().to_string();

    let response = app
        .request("DELETE", &format!("/api/docs/{id}"), None, Some(&root))
        .await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(app.db.document_count().await, 0);
}
