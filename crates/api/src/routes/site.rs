use axum::routing::get;
use axum::Router;

use crate::handlers::site;
use crate::state::AppState;

/// Public site routes, mounted at the root after every other route.
///
/// ```text
/// GET    /          -> serve_root
/// GET    /{*path}   -> serve_page
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(site::serve_root))
        .route("/{*path}", get(site::serve_page))
}
