use std::sync::Arc;

use lingua_core::page_hooks::PageInitHooks;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: lingua_db::DbPool,
    /// Server configuration, including the locale catalog.
    pub config: Arc<ServerConfig>,
    /// Hooks run while a new page is initialised below its parent.
    pub page_hooks: Arc<PageInitHooks>,
}
