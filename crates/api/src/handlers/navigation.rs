//! Handler for the language switcher shown in site navigation.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use lingua_core::error::CoreError;
use lingua_core::navigation::{LanguageSwitcher, SwitcherLanguage};
use lingua_core::page_hooks::LanguageNode;
use lingua_db::models::page::Page;
use lingua_db::repositories::{LanguageRepo, SiteRepo, TranslationRepo};

use crate::error::{AppError, AppResult};
use crate::handlers::pages::load_page;
use crate::query::SwitcherParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// Live languages in registry order, named from the locale catalog.
async fn switcher_languages(state: &AppState) -> AppResult<Vec<SwitcherLanguage>> {
    let catalog = &state.config.locales;
    Ok(LanguageRepo::list(&state.pool, true)
        .await?
        .into_iter()
        .map(|l| SwitcherLanguage {
            id: l.id,
            name: catalog.name_or_code(&l.code).to_string(),
            code: l.code,
        })
        .collect())
}

/// Switcher for a page: its live translations (itself included) resolved to
/// URLs within the page's site.
pub(crate) async fn page_switcher(
    state: &AppState,
    page: &Page,
    view_slug: Option<&str>,
) -> AppResult<LanguageSwitcher> {
    let languages = switcher_languages(state).await?;

    let mut translations = Vec::new();
    if let (true, Some(key)) = (page.is_translatable(), page.translation_key) {
        if let Some(site) = SiteRepo::find_for_page_path(&state.pool, &page.path).await? {
            for member in TranslationRepo::live_group_members(&state.pool, key).await? {
                if let (Some(language_id), Some(url)) =
                    (member.language_id, site.url_for(&member.url_path))
                {
                    translations.push((language_id, url));
                }
            }
        }
    }

    Ok(LanguageSwitcher::for_page(
        &languages,
        page.language_id,
        &translations,
        view_slug,
    ))
}

/// GET /api/v1/navigation/languages
///
/// `?page_id=&view_slug=` builds the switcher for a live page.
/// `?path=&current=` builds it for any other request path; `current`
/// defaults to the default language.
pub async fn language_switcher(
    State(state): State<AppState>,
    Query(params): Query<SwitcherParams>,
) -> AppResult<impl IntoResponse> {
    let switcher = match (params.page_id, params.path.as_deref()) {
        (Some(page_id), _) => {
            let page = load_page(&state, page_id).await?;
            if !page.live {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Page",
                    id: page_id,
                }));
            }
            page_switcher(&state, &page, params.view_slug.as_deref()).await?
        }
        (None, Some(path)) => {
            let current = match params.current {
                Some(code) => code,
                None => LanguageRepo::default(&state.pool)
                    .await?
                    .map(|l| l.code)
                    .unwrap_or_default(),
            };
            let languages = switcher_languages(&state).await?;
            LanguageSwitcher::for_request(&languages, path, &current)
        }
        (None, None) => {
            return Err(AppError::BadRequest(
                "Either page_id or path is required".into(),
            ));
        }
    };

    Ok(Json(DataResponse { data: switcher }))
}
