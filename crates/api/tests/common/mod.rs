#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use lingua_api::auth::jwt::{generate_access_token, JwtConfig};
use lingua_api::config::ServerConfig;
use lingua_api::router::build_app_router;
use lingua_api::state::AppState;
use lingua_core::locales::LocaleCatalog;
use lingua_core::page_hooks::PageInitHooks;
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults and a fixed JWT secret.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
        },
        locales: LocaleCatalog::builtin(),
    }
}

/// Build the full application router, with all middleware layers, on the
/// given database pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        page_hooks: Arc::new(PageInitHooks::standard()),
    };
    build_app_router(state, &config)
}

/// A valid bearer token for the given role.
pub fn token_for(role: &str) -> String {
    generate_access_token(1, role, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&json).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::GET, uri, Some(token), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), Some(body)).await
}

pub async fn post_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::POST, uri, Some(token), None).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(token), Some(body)).await
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(token), None).await
}

/// GET with an explicit `Host` header, for the public site.
pub async fn get_with_host(app: Router, uri: &str, host: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("host", host)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Id of the seeded site root ("Home", a translation index at `/home/`).
pub async fn home_id(pool: &PgPool) -> i64 {
    lingua_db::repositories::SiteRepo::find_for_hostname(pool, "localhost")
        .await
        .unwrap()
        .expect("seeded default site")
        .root_page_id
}

/// Create a language through the API as admin and return its id.
pub async fn create_language(
    app: Router,
    code: &str,
    sort_order: i32,
    is_default: bool,
) -> i64 {
    let body = serde_json::json!({
        "code": code,
        "sort_order": sort_order,
        "is_default": is_default,
    });
    let response = post_json_auth(app, "/api/v1/languages", body, &token_for("admin")).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Create a live page through the API as admin and return its JSON.
pub async fn create_page(
    app: Router,
    parent_id: i64,
    title: &str,
    slug: &str,
    language_id: Option<i64>,
    translation_key: Option<&str>,
) -> serde_json::Value {
    let body = serde_json::json!({
        "parent_id": parent_id,
        "title": title,
        "slug": slug,
        "live": true,
        "language_id": language_id,
        "translation_key": translation_key,
    });
    let response = post_json_auth(app, "/api/v1/pages", body, &token_for("admin")).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await["data"].clone()
}
