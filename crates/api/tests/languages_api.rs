//! HTTP-level integration tests for the language registry endpoints.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, create_language, create_page, delete_auth, get, get_auth,
    home_id, post_json_auth, put_json_auth, token_for,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Access control
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_requires_token(pool: PgPool) {
    let response = get(build_test_app(pool), "/api/v1/languages").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(response).await["code"], "UNAUTHORIZED");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_requires_admin(pool: PgPool) {
    let response = get_auth(build_test_app(pool), "/api/v1/languages", &token_for("editor")).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// CRUD
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_is_ordered_with_names(pool: PgPool) {
    let app = build_test_app(pool);
    create_language(app.clone(), "fr", 2, false).await;
    create_language(app.clone(), "en", 1, true).await;

    let response = get_auth(app, "/api/v1/languages", &token_for("admin")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["code"], "en");
    assert_eq!(data[0]["name"], "English");
    assert_eq!(data[0]["is_default"], true);
    assert_eq!(data[1]["code"], "fr");
    assert_eq!(data[1]["name"], "French");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_list_live_only(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = token_for("admin");
    create_language(app.clone(), "en", 0, true).await;
    let body = serde_json::json!({ "code": "de", "live": false });
    post_json_auth(app.clone(), "/api/v1/languages", body, &admin).await;

    let json = body_json(get_auth(app, "/api/v1/languages?live_only=true", &admin).await).await;
    let data = json["data"].as_array().unwrap();
    assert_eq!(data.len(), 1);
    assert_eq!(data[0]["code"], "en");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_choices_sorted_by_name(pool: PgPool) {
    let response =
        get_auth(build_test_app(pool), "/api/v1/languages/choices", &token_for("admin")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let names: Vec<&str> = json["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["name"].as_str().unwrap())
        .collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
    assert!(names.contains(&"English"));
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_create_rejects_unknown_code(pool: PgPool) {
    let body = serde_json::json!({ "code": "klingon" });
    let response =
        post_json_auth(build_test_app(pool), "/api/v1/languages", body, &token_for("admin")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_update_and_get(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = token_for("admin");
    let id = create_language(app.clone(), "nl", 5, false).await;

    let body = serde_json::json!({ "sort_order": 1, "live": false });
    let response = put_json_auth(app.clone(), &format!("/api/v1/languages/{id}"), body, &admin).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(get_auth(app, &format!("/api/v1/languages/{id}"), &admin).await).await;
    assert_eq!(json["data"]["sort_order"], 1);
    assert_eq!(json["data"]["live"], false);
    assert_eq!(json["data"]["name"], "Dutch");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_get_missing_language_returns_404(pool: PgPool) {
    let response =
        get_auth(build_test_app(pool), "/api/v1/languages/999999", &token_for("admin")).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_unused_language(pool: PgPool) {
    let app = build_test_app(pool);
    let admin = token_for("admin");
    let id = create_language(app.clone(), "it", 0, false).await;

    let response = delete_auth(app.clone(), &format!("/api/v1/languages/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = delete_auth(app, &format!("/api/v1/languages/{id}"), &admin).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_delete_referenced_language_conflicts(pool: PgPool) {
    let home = home_id(&pool).await;
    let app = build_test_app(pool);
    let admin = token_for("admin");
    let en = create_language(app.clone(), "en", 0, true).await;
    create_page(app.clone(), home, "English", "en", Some(en), None).await;

    let response = delete_auth(app.clone(), &format!("/api/v1/languages/{en}"), &admin).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["code"], "REFERENTIAL_INTEGRITY");

    let json = body_json(get_auth(app, "/api/v1/languages", &admin).await).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
