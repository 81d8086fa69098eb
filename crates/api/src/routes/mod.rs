pub mod health;
pub mod languages;
pub mod navigation;
pub mod pages;
pub mod site;
pub mod translations;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /languages                                       list, create (admin only)
/// /languages/choices                               locale catalog (admin only)
/// /languages/{id}                                  get, update, delete (admin only)
///
/// /pages                                           create child page
/// /pages/{id}                                      get
/// /pages/{id}/children                             list children
/// /pages/{id}/publish                              publish (POST)
/// /pages/{id}/unpublish                            unpublish (POST)
/// /pages/{id}/translations                         translation group (?only_live=)
///
/// /translate/{page_id}                             translations index
/// /translate/{page_id}/add-translation/{code}      form defaults (GET), copy (POST)
///
/// /navigation/languages                            language switcher (public)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/languages", languages::router())
        .nest("/pages", pages::router())
        .nest("/translate", translations::router())
        .nest("/navigation", navigation::router())
}
