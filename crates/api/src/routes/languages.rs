//! Route definitions for the language registry.

use axum::routing::get;
use axum::Router;

use crate::handlers::languages;
use crate::state::AppState;

/// Language registry routes mounted at `/languages`.
///
/// ```text
/// GET    /              -> list_languages
/// POST   /              -> create_language
/// GET    /choices       -> list_language_choices
/// GET    /{id}          -> get_language
/// PUT    /{id}          -> update_language
/// DELETE /{id}          -> delete_language
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(languages::list_languages).post(languages::create_language),
        )
        .route("/choices", get(languages::list_language_choices))
        .route(
            "/{id}",
            get(languages::get_language)
                .put(languages::update_language)
                .delete(languages::delete_language),
        )
}
