//! Repository for the `languages` table.

use lingua_core::error::CoreError;
use lingua_core::language::{select_default, validate_language_code};
use lingua_core::locales::LocaleCatalog;
use lingua_core::types::DbId;
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::language::{CreateLanguage, Language, UpdateLanguage};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, code, is_default, sort_order, live, created_at, updated_at";

/// Provides CRUD operations and registry queries for languages.
pub struct LanguageRepo;

impl LanguageRepo {
    /// List languages ordered by `sort_order`, optionally only live ones.
    pub async fn list(pool: &PgPool, live_only: bool) -> Result<Vec<Language>, sqlx::Error> {
        let query = if live_only {
            format!("SELECT {COLUMNS} FROM languages WHERE live = true ORDER BY sort_order, id")
        } else {
            format!("SELECT {COLUMNS} FROM languages ORDER BY sort_order, id")
        };
        sqlx::query_as::<_, Language>(&query).fetch_all(pool).await
    }

    /// Find a language by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Language>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM languages WHERE id = $1");
        sqlx::query_as::<_, Language>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a language by code. Codes are not unique in the schema; the
    /// first in registry order is returned.
    pub async fn find_by_code(pool: &PgPool, code: &str) -> Result<Option<Language>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM languages WHERE code = $1 ORDER BY sort_order, id LIMIT 1"
        );
        sqlx::query_as::<_, Language>(&query)
            .bind(code)
            .fetch_optional(pool)
            .await
    }

    /// The language shown to visitors without a preference.
    ///
    /// Always queried fresh. Several defaults log a warning and the first in
    /// registry order is returned.
    pub async fn default(pool: &PgPool) -> Result<Option<Language>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM languages WHERE is_default = true ORDER BY sort_order, id"
        );
        let defaults = sqlx::query_as::<_, Language>(&query).fetch_all(pool).await?;
        Ok(select_default(&defaults).cloned())
    }

    /// Insert a new language after validating its code against the catalog.
    pub async fn create(
        pool: &PgPool,
        catalog: &LocaleCatalog,
        input: &CreateLanguage,
    ) -> Result<Language, DbError> {
        validate_language_code(catalog, &input.code)?;

        let query = format!(
            "INSERT INTO languages (code, is_default, sort_order, live) \
             VALUES ($1, COALESCE($2, false), COALESCE($3, 0), COALESCE($4, true)) \
             RETURNING {COLUMNS}"
        );
        let language = sqlx::query_as::<_, Language>(&query)
            .bind(&input.code)
            .bind(input.is_default)
            .bind(input.sort_order)
            .bind(input.live)
            .fetch_one(pool)
            .await?;

        tracing::info!(language_id = language.id, code = %language.code, "Language created");
        Ok(language)
    }

    /// Update a language. Only non-`None` fields are applied; a new code is
    /// validated against the catalog.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        catalog: &LocaleCatalog,
        id: DbId,
        input: &UpdateLanguage,
    ) -> Result<Option<Language>, DbError> {
        if let Some(code) = &input.code {
            validate_language_code(catalog, code)?;
        }

        let query = format!(
            "UPDATE languages SET \
                code = COALESCE($2, code), \
                is_default = COALESCE($3, is_default), \
                sort_order = COALESCE($4, sort_order), \
                live = COALESCE($5, live) \
             WHERE id = $1 \
             RETURNING {COLUMNS}"
        );
        let language = sqlx::query_as::<_, Language>(&query)
            .bind(id)
            .bind(&input.code)
            .bind(input.is_default)
            .bind(input.sort_order)
            .bind(input.live)
            .fetch_optional(pool)
            .await?;
        Ok(language)
    }

    /// Delete a language that no page references.
    ///
    /// Returns `false` if the language does not exist. Fails with
    /// [`CoreError::ReferentialIntegrity`] while pages still use it.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, DbError> {
        let page_count = Self::page_count(pool, id).await?;
        if page_count > 0 {
            return Err(CoreError::ReferentialIntegrity(format!(
                "Language {id} is still used by {page_count} page(s)"
            ))
            .into());
        }

        let result = sqlx::query("DELETE FROM languages WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        if result.rows_affected() > 0 {
            tracing::info!(language_id = id, "Language deleted");
        }
        Ok(result.rows_affected() > 0)
    }

    /// Number of pages referencing a language.
    pub async fn page_count(pool: &PgPool, id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM pages WHERE language_id = $1")
            .bind(id)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Whether any page in this language lives under a site root path.
    pub async fn has_pages_in_site(
        pool: &PgPool,
        id: DbId,
        site_root_path: &str,
    ) -> Result<bool, sqlx::Error> {
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (\
                SELECT 1 FROM pages WHERE language_id = $1 AND path LIKE $2 || '%'\
             )",
        )
        .bind(id)
        .bind(site_root_path)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }
}
