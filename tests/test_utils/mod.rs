//! Test utilities for integration tests
#![allow(dead_code)]
use std::env;
use std::fs;
use std::sync::{Arc, RwLock};

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use tower::util::ServiceExt;
use uuid::Uuid;

use wedsite::api::AppState;
use wedsite::api::app;
use wedsite::api::routes::users::db as users_db;
use wedsite::core::AppConfig;
use wedsite::core::db::{async_db, initialize_db};

/// Creates a test application router backed by a fresh database in a
/// uniquely named temporary directory.
pub async fn test_app() -> Router {
    test_app_with_db().await.0
}

/// Like [`test_app`] but also hands back the db so tests can seed rows
/// the API won't create, such as admins.
pub async fn test_app_with_db() -> (Router, tokio_rusqlite::Connection) {
    let dir = env::temp_dir().join(format!("wedsite-test-{}", Uuid::new_v4()));
    fs::create_dir_all(&dir).expect("Failed to create base directory");
    let db_path = dir.join("wedding.db");
    let db_path_str = db_path.to_str().unwrap();

    let db = async_db(db_path_str)
        .await
        .expect("Failed to connect to async db");
    db.call(|conn| {
        initialize_db(conn).expect("Failed to migrate db");
        Ok(())
    })
    .await
    .unwrap();

    let app_config = AppConfig {
        storage_path: dir.display().to_string(),
        db_path: db_path_str.to_string(),
        default_timezone: String::from("Asia/Tashkent"),
        default_wedding_time: String::from("4:00 PM"),
        countdown_refresh_ms: 1000,
    };
    let app_state = AppState::new(db.clone(), app_config);
    (app(Arc::new(RwLock::new(app_state))), db)
}

pub async fn body_to_string(body: Body) -> String {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

/// Send a request with an optional JSON body as the given user and
/// return the status with the body parsed as JSON (or `Null`).
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    user_id: Option<i64>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(uri).method(method);
    if let Some(id) = user_id {
        builder = builder.header("x-user-id", id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let body = body_to_string(response.into_body()).await;
    let json = serde_json::from_str(&body).unwrap_or(Value::Null);
    (status, json)
}

pub async fn create_user(app: &Router, email: &str) -> i64 {
    let (status, body) = send(
        app,
        "POST",
        "/api/users",
        None,
        Some(serde_json::json!({
            "email": email,
            "name": email.split('@').next().unwrap(),
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_i64().unwrap()
}

/// Admins can't sign up through the API so they go straight into the db
pub async fn create_admin(db: &tokio_rusqlite::Connection, email: &str) -> i64 {
    users_db::insert_user(db, email.to_string(), String::from("admin"), true)
        .await
        .expect("Failed to insert admin")
        .id
}

/// Share `wedding_id` with `user_id` as `role` with the given flags
pub async fn share(
    app: &Router,
    owner_id: i64,
    wedding_id: i64,
    user_id: i64,
    role: &str,
    permissions: Value,
) {
    let (status, _) = send(
        app,
        "POST",
        &format!("/api/weddings/{}/access", wedding_id),
        Some(owner_id),
        Some(serde_json::json!({
            "user_id": user_id,
            "role": role,
            "permissions": permissions,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

/// Create a wedding on 2025-06-15 at 16:00 in Tashkent owned by `owner_id`
pub async fn create_wedding(app: &Router, owner_id: i64) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/api/weddings",
        Some(owner_id),
        Some(serde_json::json!({
            "bride": "Madina",
            "groom": "Timur",
            "wedding_date": "2025-06-15",
            "wedding_time": "16:00",
            "timezone": "Asia/Tashkent",
            "venue": "Garden Hall",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}
