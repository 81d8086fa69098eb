//! Handlers for the language registry (admin only).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lingua_core::error::CoreError;
use lingua_core::locales::LocaleCatalog;
use lingua_core::types::DbId;
use lingua_db::models::language::{CreateLanguage, Language, UpdateLanguage};
use lingua_db::repositories::LanguageRepo;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::LanguageListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A language together with its display name from the locale catalog.
#[derive(Debug, Serialize)]
pub struct LanguageView {
    #[serde(flatten)]
    pub language: Language,
    pub name: String,
}

impl LanguageView {
    pub fn new(language: Language, catalog: &LocaleCatalog) -> Self {
        let name = catalog.name_or_code(&language.code).to_string();
        Self { language, name }
    }
}

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Language",
        id,
    })
}

/// GET /api/v1/languages
///
/// List languages in registry order. `?live_only=true` hides languages not
/// offered to visitors.
pub async fn list_languages(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Query(params): Query<LanguageListParams>,
) -> AppResult<impl IntoResponse> {
    let catalog = &state.config.locales;
    let languages: Vec<LanguageView> =
        LanguageRepo::list(&state.pool, params.live_only.unwrap_or(false))
            .await?
            .into_iter()
            .map(|l| LanguageView::new(l, catalog))
            .collect();

    Ok(Json(DataResponse { data: languages }))
}

/// GET /api/v1/languages/choices
///
/// Locale codes a language may use, sorted by display name.
pub async fn list_language_choices(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: state.config.locales.choices(),
    }))
}

/// POST /api/v1/languages
pub async fn create_language(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateLanguage>,
) -> AppResult<impl IntoResponse> {
    let catalog = &state.config.locales;
    let language = LanguageRepo::create(&state.pool, catalog, &input).await?;

    tracing::info!(
        language_id = language.id,
        code = %language.code,
        user_id = admin.user_id,
        "Language added to registry",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: LanguageView::new(language, catalog),
        }),
    ))
}

/// GET /api/v1/languages/{id}
pub async fn get_language(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let language = LanguageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(Json(DataResponse {
        data: LanguageView::new(language, &state.config.locales),
    }))
}

/// PUT /api/v1/languages/{id}
///
/// Partially update a language.
pub async fn update_language(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateLanguage>,
) -> AppResult<impl IntoResponse> {
    let catalog = &state.config.locales;
    let language = LanguageRepo::update(&state.pool, catalog, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;

    tracing::info!(language_id = id, user_id = admin.user_id, "Language updated");

    Ok(Json(DataResponse {
        data: LanguageView::new(language, catalog),
    }))
}

/// DELETE /api/v1/languages/{id}
///
/// Rejected with 409 while any page still uses the language.
pub async fn delete_language(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !LanguageRepo::delete(&state.pool, id).await? {
        return Err(not_found(id));
    }

    tracing::info!(language_id = id, user_id = admin.user_id, "Language removed from registry");

    Ok(StatusCode::NO_CONTENT)
}
