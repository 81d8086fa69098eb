//! Site model: a hostname bound to a root page.

use lingua_core::tree_path;
use lingua_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `sites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Site {
    pub id: DbId,
    pub hostname: String,
    pub port: i32,
    pub root_page_id: DbId,
    pub is_default_site: bool,
    pub created_at: Timestamp,
}

/// A site joined with the tree position of its root page.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct SiteRoot {
    pub site_id: DbId,
    pub hostname: String,
    pub root_page_id: DbId,
    pub root_path: String,
    pub root_url_path: String,
}

impl SiteRoot {
    /// Whether a page path lies inside this site.
    pub fn contains_path(&self, path: &str) -> bool {
        tree_path::is_within(path, &self.root_path)
    }

    /// Public URL for a page `url_path` within this site.
    pub fn url_for(&self, url_path: &str) -> Option<String> {
        tree_path::page_url(url_path, &self.root_url_path)
    }
}
