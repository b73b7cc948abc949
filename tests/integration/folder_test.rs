//! Integration tests for browsing and folder management.

mod helpers;

use axum::http::StatusCode;
use uuid::Uuid;

use helpers::TestApp;

async fn create_folder(app: &TestApp, cookie: &str, name: &str, path: &str) -> helpers::TestResponse {
    app.request(
        "POST",
        "/api/folder",
        Some(serde_json::json!({ "name": name, "path": path })),
        Some(cookie),
    )
    .await
}

fn names(body: &serde_json::Value, key: &str) -> Vec<String> {
    body[key]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|i| i["name"].as_str().map(String::from))
                .collect()
        })
        .unwrap_or_default()
}

#[tokio::test]
async fn test_folder_routes_require_session() {
    let app = TestApp::new();
    let id = Uuid::new_v4();

    let attempts = [
        ("GET", "/api/browse".to_string()),
        ("POST", "/api/folder".to_string()),
        ("PUT", format!("/api/folder/{id}")),
        ("DELETE", format!("/api/folder/{id}")),
    ];
    for (method, path) in attempts {
        let body = (method == "POST" || method == "PUT").then(|| serde_json::json!({ "name": "x" }));
        let response = app.request(method, &path, body, None).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED, "{method} {path}");
        assert_eq!(response.str_at("/error"), Some("Authentication required"));
    }
}

#[tokio::test]
async fn test_create_and_browse() {
    let app = TestApp::new();
    let cookie = app.register("alice", "pw").await;

    let docs = create_folder(&app, &cookie, "docs", "").await;
    assert_eq!(docs.status, StatusCode::OK);
    assert_eq!(docs.str_at("/folder/name"), Some("docs"));
    assert_eq!(docs.str_at("/folder/path"), Some("docs"));
    assert!(docs.body["folder"]["parent_id"].is_null());

    create_folder(&app, &cookie, "archive", "").await;
    let reports = create_folder(&app, &cookie, "reports", "docs").await;
    assert_eq!(reports.str_at("/folder/path"), Some("docs/reports"));
    assert_eq!(
        reports.body["folder"]["parent_id"],
        docs.body["folder"]["id"]
    );

    let root = app.request("GET", "/api/browse", None, Some(&cookie)).await;
    assert_eq!(root.status, StatusCode::OK);
    assert_eq!(root.str_at("/currentPath"), Some(""));
    assert_eq!(names(&root.body, "folders"), vec!["archive", "docs"]);
    assert_eq!(names(&root.body, "files"), Vec::<String>::new());

    let nested = app
        .request("GET", "/api/browse?path=docs", None, Some(&cookie))
        .await;
    assert_eq!(nested.str_at("/currentPath"), Some("docs"));
    assert_eq!(names(&nested.body, "folders"), vec!["reports"]);
}

#[tokio::test]
async fn test_browse_unknown_path_is_empty() {
    let app = TestApp::new();
    let cookie = app.register("alice", "pw").await;

    let response = app
        .request("GET", "/api/browse?path=missing/deeper", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.str_at("/currentPath"), Some("missing/deeper"));
    assert_eq!(response.body["folders"], serde_json::json!([]));
    assert_eq!(response.body["files"], serde_json::json!([]));
}

#[tokio::test]
async fn test_duplicate_folder_conflicts_per_user() {
    let app = TestApp::new();
    let alice = app.register("alice", "pw").await;
    let bob = app.register("bob", "pw").await;

    assert_eq!(create_folder(&app, &alice, "docs", "").await.status, StatusCode::OK);

    let again = create_folder(&app, &alice, "docs", "").await;
    assert_eq!(again.status, StatusCode::CONFLICT);
    assert_eq!(again.str_at("/error"), Some("Folder already exists"));

    // Paths are case-sensitive.
    assert_eq!(create_folder(&app, &alice, "Docs", "").await.status, StatusCode::OK);
    assert_eq!(create_folder(&app, &bob, "docs", "").await.status, StatusCode::OK);
}

#[tokio::test]
async fn test_create_folder_validation() {
    let app = TestApp::new();
    let cookie = app.register("alice", "pw").await;

    let blank = create_folder(&app, &cookie, "  ", "").await;
    assert_eq!(blank.status, StatusCode::BAD_REQUEST);
    assert_eq!(blank.str_at("/error"), Some("Folder name is required"));

    let slash = create_folder(&app, &cookie, "a/b", "").await;
    assert_eq!(slash.status, StatusCode::BAD_REQUEST);

    let missing_parent = create_folder(&app, &cookie, "x", "nowhere").await;
    assert_eq!(missing_parent.status, StatusCode::NOT_FOUND);
    assert_eq!(missing_parent.str_at("/error"), Some("Parent folder not found"));
}

#[tokio::test]
async fn test_users_see_only_their_own_tree() {
    let app = TestApp::new();
    let alice = app.register("alice", "pw").await;
    let bob = app.register("bob", "pw").await;
    create_folder(&app, &alice, "private", "").await;

    let bob_root = app.request("GET", "/api/browse", None, Some(&bob)).await;
    assert!(names(&bob_root.body, "folders").is_empty());

    let bob_nested = app
        .request("GET", "/api/browse?path=private", None, Some(&bob))
        .await;
    assert_eq!(bob_nested.status, StatusCode::OK);
    assert!(names(&bob_nested.body, "folders").is_empty());

    // Creating beneath another user's folder path does not resolve.
    let sneaky = create_folder(&app, &bob, "x", "private").await;
    assert_eq!(sneaky.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_rename_folder() {
    let app = TestApp::new();
    let cookie = app.register("alice", "pw").await;
    let docs = create_folder(&app, &cookie, "docs", "").await;
    create_folder(&app, &cookie, "taken", "").await;
    let id = docs.str_at("/folder/id").unwrap().to_string();

    let renamed = app
        .request(
            "PUT",
            &format!("/api/folder/{id}"),
            Some(serde_json::json!({ "name": "papers" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(renamed.status, StatusCode::OK);
    assert_eq!(renamed.str_at("/folder/name"), Some("papers"));
    assert_eq!(renamed.str_at("/folder/path"), Some("papers"));

    let clash = app
        .request(
            "PUT",
            &format!("/api/folder/{id}"),
            Some(serde_json::json!({ "name": "taken" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(clash.status, StatusCode::CONFLICT);
    assert_eq!(clash.str_at("/error"), Some("Folder name already exists"));

    let empty = app
        .request(
            "PUT",
            &format!("/api/folder/{id}"),
            Some(serde_json::json!({})),
            Some(&cookie),
        )
        .await;
    assert_eq!(empty.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rename_leaves_descendant_paths_stale() {
    let app = TestApp::new();
    let cookie = app.register("alice", "pw").await;
    let docs = create_folder(&app, &cookie, "docs", "").await;
    create_folder(&app, &cookie, "inner", "docs").await;
    let id = docs.str_at("/folder/id").unwrap().to_string();

    app.request(
        "PUT",
        &format!("/api/folder/{id}"),
        Some(serde_json::json!({ "name": "papers" })),
        Some(&cookie),
    )
    .await;

    let listing = app
        .request("GET", "/api/browse?path=papers", None, Some(&cookie))
        .await;
    assert_eq!(listing.str_at("/folders/0/path"), Some("docs/inner"));

    // The stale path no longer resolves, so nothing can be created under it.
    let orphan = create_folder(&app, &cookie, "x", "papers/inner").await;
    assert_eq!(orphan.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_folder() {
    let app = TestApp::new();
    let cookie = app.register("alice", "pw").await;
    let docs = create_folder(&app, &cookie, "docs", "").await;
    create_folder(&app, &cookie, "inner", "docs").await;
    let id = docs.str_at("/folder/id").unwrap().to_string();

    let deleted = app
        .request("DELETE", &format!("/api/folder/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(deleted.status, StatusCode::OK);
    assert_eq!(deleted.body, serde_json::json!({ "success": true }));

    let root = app.request("GET", "/api/browse", None, Some(&cookie)).await;
    assert!(names(&root.body, "folders").is_empty());

    // The name is free again and the cascade removed the child.
    assert_eq!(create_folder(&app, &cookie, "docs", "").await.status, StatusCode::OK);
    let nested = app
        .request("GET", "/api/browse?path=docs", None, Some(&cookie))
        .await;
    assert!(names(&nested.body, "folders").is_empty());

    let again = app
        .request("DELETE", &format!("/api/folder/{id}"), None, Some(&cookie))
        .await;
    assert_eq!(again.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_other_users_folder_ids_are_not_found() {
    let app = TestApp::new();
    let alice = app.register("alice", "pw").await;
    let bob = app.register("bob", "pw").await;
    let docs = create_folder(&app, &alice, "docs", "").await;
    let id = docs.str_at("/folder/id").unwrap().to_string();

    let rename = app
        .request(
            "PUT",
            &format!("/api/folder/{id}"),
            Some(serde_json::json!({ "name": "mine" })),
            Some(&bob),
        )
        .await;
    assert_eq!(rename.status, StatusCode::NOT_FOUND);

    let delete = app
        .request("DELETE", &format!("/api/folder/{id}"), None, Some(&bob))
        .await;
    assert_eq!(delete.status, StatusCode::NOT_FOUND);

    let still_there = app.request("GET", "/api/browse", None, Some(&alice)).await;
    assert_eq!(names(&still_there.body, "folders"), vec!["docs"]);
}

#[tokio::test]
async fn test_malformed_folder_id_is_not_found() {
    let app = TestApp::new();
    let cookie = app.register("alice", "pw").await;

    let response = app
        .request("DELETE", "/api/folder/not-a-uuid", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.str_at("/code"), Some("NOT_FOUND"));
}
