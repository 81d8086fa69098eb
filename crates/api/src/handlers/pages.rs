//! Handlers for the page tree.
//!
//! Page creation runs the registered page-init hooks, so a translatable page
//! created below another translatable page starts out in its language.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use lingua_core::error::CoreError;
use lingua_core::locales::LocaleCatalog;
use lingua_core::page_hooks::LanguageNode;
use lingua_core::translation::admin_display_title;
use lingua_core::types::DbId;
use lingua_db::models::language::Language;
use lingua_db::models::page::{CreatePage, Page};
use lingua_db::repositories::{LanguageRepo, PageRepo, TranslationRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::TranslationListParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A page as shown in the admin surface.
#[derive(Debug, Serialize)]
pub struct PageView {
    #[serde(flatten)]
    pub page: Page,
    /// `"{title} ({language})"` for translatable pages, the title otherwise.
    pub display_title: String,
    pub language_code: Option<String>,
}

impl PageView {
    pub fn new(page: Page, languages: &[Language], catalog: &LocaleCatalog) -> Self {
        let language = page
            .language_id
            .and_then(|id| languages.iter().find(|l| l.id == id));

        let display_title = match language {
            Some(language) if page.is_translatable() => {
                admin_display_title(&page.title, catalog.name_or_code(&language.code))
            }
            _ => page.title.clone(),
        };

        Self {
            language_code: language.map(|l| l.code.clone()),
            display_title,
            page,
        }
    }
}

/// Load a page or fail with 404.
pub(crate) async fn load_page(state: &AppState, id: DbId) -> AppResult<Page> {
    PageRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))
}

/// Wrap pages for display, loading the registry once.
pub(crate) async fn page_views(state: &AppState, pages: Vec<Page>) -> AppResult<Vec<PageView>> {
    let languages = LanguageRepo::list(&state.pool, false).await?;
    Ok(pages
        .into_iter()
        .map(|p| PageView::new(p, &languages, &state.config.locales))
        .collect())
}

async fn page_view(state: &AppState, page: Page) -> AppResult<PageView> {
    let mut views = page_views(state, vec![page]).await?;
    views
        .pop()
        .ok_or_else(|| AppError::InternalError("Page view was not built".into()))
}

/// POST /api/v1/pages
///
/// Create a page as the last child of `parent_id`. Creating a live page
/// additionally needs the publish permission.
pub async fn create_page(
    user: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePage>,
) -> AppResult<impl IntoResponse> {
    let permissions = user.page_permissions();
    permissions.ensure_can_add_subpage()?;
    if input.live == Some(true) {
        permissions.ensure_can_publish_subpage()?;
    }

    let page = PageRepo::create_child(&state.pool, &state.page_hooks, input).await?;

    tracing::info!(
        page_id = page.id,
        language_id = ?page.language_id,
        user_id = user.user_id,
        "Page created via API",
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: page_view(&state, page).await?,
        }),
    ))
}

/// GET /api/v1/pages/{id}
pub async fn get_page(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = load_page(&state, id).await?;
    Ok(Json(DataResponse {
        data: page_view(&state, page).await?,
    }))
}

/// GET /api/v1/pages/{id}/children
pub async fn list_children(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let page = load_page(&state, id).await?;
    let children = PageRepo::children(&state.pool, page.id).await?;
    Ok(Json(DataResponse {
        data: page_views(&state, children).await?,
    }))
}

/// POST /api/v1/pages/{id}/publish
pub async fn publish_page(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_live(user, state, id, true).await
}

/// POST /api/v1/pages/{id}/unpublish
pub async fn unpublish_page(
    user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    set_live(user, state, id, false).await
}

async fn set_live(
    user: AuthUser,
    state: AppState,
    id: DbId,
    live: bool,
) -> AppResult<Json<DataResponse<PageView>>> {
    user.page_permissions().ensure_can_publish_subpage()?;

    let page = PageRepo::set_live(&state.pool, id, live)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Page", id }))?;

    tracing::info!(page_id = id, live, user_id = user.user_id, "Page live state changed");

    Ok(Json(DataResponse {
        data: page_view(&state, page).await?,
    }))
}

/// GET /api/v1/pages/{id}/translations
///
/// Other pages of the page's translation group in language order.
/// `?only_live=false` includes drafts and hidden languages.
pub async fn list_translations(
    _user: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Query(params): Query<TranslationListParams>,
) -> AppResult<impl IntoResponse> {
    let page = load_page(&state, id).await?;
    let translations =
        TranslationRepo::get_translations(&state.pool, &page, params.only_live()).await?;
    Ok(Json(DataResponse {
        data: page_views(&state, translations).await?,
    }))
}
