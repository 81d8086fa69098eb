//! Route definitions for site navigation helpers.

use axum::routing::get;
use axum::Router;

use crate::handlers::navigation;
use crate::state::AppState;

/// Navigation routes mounted at `/navigation` (public).
///
/// ```text
/// GET    /languages   -> language_switcher
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/languages", get(navigation::language_switcher))
}
