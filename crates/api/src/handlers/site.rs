//! Public page serving.
//!
//! Requests are resolved against the site bound to the `Host` header. A
//! translation index redirects visitors to the default language's live
//! translation; every other live page is returned with its language switcher.

use axum::extract::{Path, State};
use axum::http::header::{CONTENT_LANGUAGE, HOST, LOCATION};
use axum::http::uri::Authority;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use lingua_core::error::CoreError;
use lingua_core::language::user_languages;
use lingua_core::navigation::LanguageSwitcher;
use lingua_core::page_hooks::LanguageNode;
use lingua_core::translation::{route_request, RouteOutcome};
use lingua_db::models::page::Page;
use lingua_db::models::site::SiteRoot;
use lingua_db::repositories::{LanguageRepo, PageRepo, SiteRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::handlers::languages::LanguageView;
use crate::handlers::navigation::page_switcher;
use crate::response::DataResponse;
use crate::state::AppState;

/// A served page.
#[derive(Debug, Serialize)]
pub struct ServedPage {
    pub page: Page,
    /// URL of the page within its site.
    pub url: String,
    pub language: Option<LanguageView>,
    pub switcher: LanguageSwitcher,
}

/// Hostname from the `Host` header, without the port. IPv6 literals keep
/// their brackets.
fn request_host(headers: &HeaderMap) -> String {
    headers
        .get(HOST)
        .and_then(|v| v.to_str().ok())
        .and_then(|h| h.parse::<Authority>().ok())
        .map(|authority| authority.host().to_string())
        .unwrap_or_default()
}

/// `url_path` for a request path below the site root: `en/about` becomes
/// `/home/en/about/` for a site rooted at `/home/`.
fn url_path_for(site: &SiteRoot, path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        site.root_url_path.clone()
    } else {
        format!("{}{trimmed}/", site.root_url_path)
    }
}

fn page_not_found(path: &str) -> AppError {
    AppError::Core(CoreError::NotFoundByKey {
        entity: "Page",
        key: format!("/{}", path.trim_matches('/')),
    })
}

/// GET /
pub async fn serve_root(State(state): State<AppState>, headers: HeaderMap) -> AppResult<Response> {
    serve(&state, &request_host(&headers), "").await
}

/// GET /{*path}
pub async fn serve_page(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(path): Path<String>,
) -> AppResult<Response> {
    serve(&state, &request_host(&headers), &path).await
}

async fn serve(state: &AppState, host: &str, path: &str) -> AppResult<Response> {
    let site = SiteRepo::find_for_hostname(&state.pool, host)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFoundByKey {
                entity: "Site",
                key: host.to_string(),
            })
        })?;

    let page = PageRepo::find_by_url_path(&state.pool, &url_path_for(&site, path))
        .await?
        .filter(|p| p.live && site.contains_path(&p.path))
        .ok_or_else(|| page_not_found(path))?;

    if page.is_translation_index() {
        return redirect_to_translation(state, &site, &page, path).await;
    }

    let url = site.url_for(&page.url_path).ok_or_else(|| page_not_found(path))?;
    let language = match page.language_id {
        Some(id) => LanguageRepo::find_by_id(&state.pool, id).await?,
        None => None,
    };
    let switcher = page_switcher(state, &page, None).await?;

    let content_language = language
        .as_ref()
        .filter(|_| page.is_translatable())
        .map(|l| l.code.clone());

    let body = ServedPage {
        url,
        language: language.map(|l| LanguageView::new(l, &state.config.locales)),
        switcher,
        page,
    };

    let mut response = Json(DataResponse { data: body }).into_response();
    if let Some(code) = content_language {
        if let Ok(value) = code.parse() {
            response.headers_mut().insert(CONTENT_LANGUAGE, value);
        }
    }
    Ok(response)
}

/// Redirect from a translation index to the default language's live child.
async fn redirect_to_translation(
    state: &AppState,
    site: &SiteRoot,
    index: &Page,
    path: &str,
) -> AppResult<Response> {
    let default = LanguageRepo::default(&state.pool).await?;
    let candidates = user_languages(default.as_ref());
    let children = PageRepo::live_translatable_children(&state.pool, index.id).await?;

    match route_request(&candidates, &children) {
        RouteOutcome::Redirect(target) => {
            let url = site
                .url_for(&target.url_path)
                .ok_or_else(|| page_not_found(path))?;
            tracing::debug!(index_id = index.id, target_id = target.id, %url, "Routing to translation");
            Ok((StatusCode::FOUND, [(LOCATION, url)]).into_response())
        }
        RouteOutcome::NotFound => {
            tracing::debug!(index_id = index.id, "No live translation for the default language");
            Err(page_not_found(path))
        }
    }
}
