//! Route definitions for the page tree.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::pages;
use crate::state::AppState;

/// Page routes mounted at `/pages`.
///
/// ```text
/// POST   /                    -> create_page
/// GET    /{id}                -> get_page
/// GET    /{id}/children       -> list_children
/// POST   /{id}/publish        -> publish_page
/// POST   /{id}/unpublish      -> unpublish_page
/// GET    /{id}/translations   -> list_translations
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(pages::create_page))
        .route("/{id}", get(pages::get_page))
        .route("/{id}/children", get(pages::list_children))
        .route("/{id}/publish", post(pages::publish_page))
        .route("/{id}/unpublish", post(pages::unpublish_page))
        .route("/{id}/translations", get(pages::list_translations))
}
