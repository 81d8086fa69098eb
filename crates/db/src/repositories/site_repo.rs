//! Repository for the `sites` table.

use lingua_core::types::DbId;
use sqlx::PgPool;

use crate::models::site::{Site, SiteRoot};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, hostname, port, root_page_id, is_default_site, created_at";

/// Columns for [`SiteRoot`], selected from `sites s JOIN pages r`.
const ROOT_COLUMNS: &str = "s.id AS site_id, s.hostname, s.root_page_id, \
                            r.path AS root_path, r.url_path AS root_url_path";

/// Provides site lookups.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a site bound to a root page. Only the default site is seeded
    /// by migrations; further sites come from provisioning tooling.
    pub async fn create(
        pool: &PgPool,
        hostname: &str,
        port: i32,
        root_page_id: DbId,
        is_default_site: bool,
    ) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (hostname, port, root_page_id, is_default_site) \
             VALUES ($1, $2, $3, $4) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(hostname)
            .bind(port)
            .bind(root_page_id)
            .bind(is_default_site)
            .fetch_one(pool)
            .await
    }

    /// List all sites, default site first.
    ///
    /// No route exposes sites; this backs provisioning tooling and tests.
    pub async fn list(pool: &PgPool) -> Result<Vec<Site>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM sites ORDER BY is_default_site DESC, hostname, id");
        sqlx::query_as::<_, Site>(&query).fetch_all(pool).await
    }

    /// Resolve the site serving a hostname, falling back to the default site.
    pub async fn find_for_hostname(
        pool: &PgPool,
        hostname: &str,
    ) -> Result<Option<SiteRoot>, sqlx::Error> {
        let query = format!(
            "SELECT {ROOT_COLUMNS} FROM sites s JOIN pages r ON r.id = s.root_page_id \
             WHERE s.hostname = $1 OR s.is_default_site = true \
             ORDER BY (s.hostname = $1) DESC, s.id \
             LIMIT 1"
        );
        sqlx::query_as::<_, SiteRoot>(&query)
            .bind(hostname)
            .fetch_optional(pool)
            .await
    }

    /// Find the site a page belongs to: the site with the deepest root page
    /// whose path prefixes the page path.
    pub async fn find_for_page_path(
        pool: &PgPool,
        page_path: &str,
    ) -> Result<Option<SiteRoot>, sqlx::Error> {
        let query = format!(
            "SELECT {ROOT_COLUMNS} FROM sites s JOIN pages r ON r.id = s.root_page_id \
             WHERE $1 LIKE r.path || '%' \
             ORDER BY length(r.path) DESC, s.is_default_site DESC, s.id \
             LIMIT 1"
        );
        sqlx::query_as::<_, SiteRoot>(&query)
            .bind(page_path)
            .fetch_optional(pool)
            .await
    }
}
