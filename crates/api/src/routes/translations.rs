//! Route definitions for the translation admin views.

use axum::routing::get;
use axum::Router;

use crate::handlers::translations;
use crate::state::AppState;

/// Translation routes mounted at `/translate`.
///
/// ```text
/// GET    /{page_id}                           -> translations_index
/// GET    /{page_id}/add-translation/{code}    -> add_translation_form
/// POST   /{page_id}/add-translation/{code}    -> add_translation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{page_id}", get(translations::translations_index))
        .route(
            "/{page_id}/add-translation/{code}",
            get(translations::add_translation_form).post(translations::add_translation),
        )
}
