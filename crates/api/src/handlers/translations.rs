//! Handlers for the translation admin views: the per-page translations
//! index and the add-translation form.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lingua_core::error::CoreError;
use lingua_core::page_hooks::LanguageNode;
use lingua_core::translation::{pick_translation, AddTranslationDefaults, AddTranslationForm};
use lingua_core::types::DbId;
use lingua_db::models::language::Language;
use lingua_db::models::page::{NewTranslation, Page};
use lingua_db::repositories::{LanguageRepo, PageRepo, TranslationRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::languages::LanguageView;
use crate::handlers::pages::{load_page, PageView};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// One row of the translations index.
#[derive(Debug, Serialize)]
pub struct TranslationEntry {
    pub language: LanguageView,
    pub translation: Option<PageView>,
    /// The row for the page the index was opened from.
    pub is_current: bool,
}

/// Initial state of the add-translation form.
#[derive(Debug, Serialize)]
pub struct AddTranslationView {
    pub source: PageView,
    pub language: LanguageView,
    pub defaults: AddTranslationDefaults,
}

async fn load_translatable(state: &AppState, page_id: DbId) -> AppResult<Page> {
    let page = load_page(state, page_id).await?;
    if !page.is_translatable() {
        return Err(AppError::Core(CoreError::Validation(format!(
            "Page {page_id} is not translatable"
        ))));
    }
    Ok(page)
}

async fn language_for_code(state: &AppState, code: &str) -> AppResult<Language> {
    LanguageRepo::find_by_code(&state.pool, code)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Language",
                key: code.to_string(),
            })
        })
}

/// Parent suggested for a new translation: the translation parent, or the
/// source's own parent when the tree has no better candidate.
async fn suggested_parent(
    state: &AppState,
    page: &Page,
    language_id: DbId,
) -> AppResult<Option<DbId>> {
    if let Some(parent) =
        TranslationRepo::get_translation_parent(&state.pool, page, language_id).await?
    {
        return Ok(Some(parent.id));
    }
    Ok(PageRepo::parent_of(&state.pool, page).await?.map(|p| p.id))
}

/// GET /api/v1/translate/{page_id}
///
/// Every registered language with the page's translation in it, if any.
pub async fn translations_index(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(page_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = load_translatable(&state, page_id).await?;
    let languages = LanguageRepo::list(&state.pool, false).await?;
    let members = match page.translation_key {
        Some(key) => TranslationRepo::group_members(&state.pool, key).await?,
        None => Vec::new(),
    };

    let catalog = &state.config.locales;
    let entries: Vec<TranslationEntry> = languages
        .iter()
        .map(|language| {
            let translation = pick_translation(&members, language.id)
                .cloned()
                .map(|p| PageView::new(p, &languages, catalog));
            TranslationEntry {
                is_current: page.language_id == Some(language.id),
                language: LanguageView::new(language.clone(), catalog),
                translation,
            }
        })
        .collect();

    Ok(Json(DataResponse { data: entries }))
}

/// GET /api/v1/translate/{page_id}/add-translation/{code}
///
/// Defaults for the add-translation form: the source title and slug, the
/// suggested parent and whether the user may publish the copy.
pub async fn add_translation_form(
    user: AuthUser,
    State(state): State<AppState>,
    Path((page_id, code)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let page = load_translatable(&state, page_id).await?;
    let language = language_for_code(&state, &code).await?;
    let parent = suggested_parent(&state, &page, language.id).await?;

    let defaults = AddTranslationDefaults::new(
        &page.title,
        &page.slug,
        parent,
        user.page_permissions().can_publish_subpage,
    );

    let languages = LanguageRepo::list(&state.pool, false).await?;
    let catalog = &state.config.locales;
    Ok(Json(DataResponse {
        data: AddTranslationView {
            source: PageView::new(page, &languages, catalog),
            language: LanguageView::new(language, catalog),
            defaults,
        },
    }))
}

/// POST /api/v1/translate/{page_id}/add-translation/{code}
///
/// Copy the page into the language below `new_parent_page` (the suggested
/// parent when omitted). The copy joins the page's translation group.
pub async fn add_translation(
    user: AuthUser,
    State(state): State<AppState>,
    Path((page_id, code)): Path<(DbId, String)>,
    Json(form): Json<AddTranslationForm>,
) -> AppResult<impl IntoResponse> {
    let page = load_translatable(&state, page_id).await?;
    let language = language_for_code(&state, &code).await?;
    form.check()?;

    let parent_id = match form.new_parent_page {
        Some(id) => id,
        None => suggested_parent(&state, &page, language.id)
            .await?
            .ok_or_else(|| {
                AppError::Core(CoreError::Validation(
                    "No parent page given and none could be suggested".into(),
                ))
            })?,
    };

    let request = NewTranslation {
        language_id: language.id,
        title: form.new_title,
        slug: form.new_slug,
        parent_id,
        publish: form.publish_copies,
        copy_subpages: form.copy_subpages,
    };
    let copy =
        TranslationRepo::add_translation(&state.pool, &page, &request, user.page_permissions())
            .await?;

    tracing::info!(
        source_id = page.id,
        translation_id = copy.id,
        code = %language.code,
        user_id = user.user_id,
        "Translation added via API",
    );

    let languages = LanguageRepo::list(&state.pool, false).await?;
    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PageView::new(copy, &languages, &state.config.locales),
        }),
    ))
}
