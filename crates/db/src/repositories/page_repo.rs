//! Repository for the `pages` table: tree queries, page creation and
//! subtree copies.

use std::collections::HashMap;

use lingua_core::error::CoreError;
use lingua_core::page_hooks::{LanguageNode, PageInitHooks};
use lingua_core::page_types::{validate_new_page, PAGE_TYPE_TRANSLATABLE};
use lingua_core::translation::ensure_slug_available;
use lingua_core::tree_path;
use lingua_core::types::{DbId, TranslationKey};
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::error::DbError;
use crate::models::page::{CopyOptions, CopyOverrides, CreatePage, Page};
use crate::repositories::LanguageRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, parent_id, path, depth, numchild, title, slug, url_path, live, \
                       page_type, translation_key, language_id, created_at, updated_at";

/// Values for a row about to be inserted.
struct NewRow<'a> {
    parent_id: DbId,
    path: &'a str,
    numchild: i32,
    title: &'a str,
    slug: &'a str,
    url_path: &'a str,
    live: bool,
    page_type: &'a str,
    translation_key: Option<TranslationKey>,
    language_id: Option<DbId>,
}

/// Provides page tree operations.
pub struct PageRepo;

impl PageRepo {
    /// Find a page by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Parent of a page, or `None` for the tree root.
    pub async fn parent_of(pool: &PgPool, page: &Page) -> Result<Option<Page>, sqlx::Error> {
        match page.parent_id {
            Some(parent_id) => Self::find_by_id(pool, parent_id).await,
            None => Ok(None),
        }
    }

    /// Direct children of a page in tree order.
    pub async fn children(pool: &PgPool, parent_id: DbId) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE parent_id = $1 ORDER BY path");
        sqlx::query_as::<_, Page>(&query)
            .bind(parent_id)
            .fetch_all(pool)
            .await
    }

    /// Live translatable children of a page in tree order. These are the
    /// candidates a translation index routes visitors to.
    pub async fn live_translatable_children(
        pool: &PgPool,
        parent_id: DbId,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages \
             WHERE parent_id = $1 AND live = true AND page_type = $2 \
             ORDER BY path"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(parent_id)
            .bind(PAGE_TYPE_TRANSLATABLE)
            .fetch_all(pool)
            .await
    }

    /// Slugs of the direct children of a page.
    pub async fn child_slugs(pool: &PgPool, parent_id: DbId) -> Result<Vec<String>, sqlx::Error> {
        let mut conn = pool.acquire().await?;
        Self::child_slugs_on(&mut conn, parent_id).await
    }

    /// Find a page by its full `url_path` (e.g. `/home/en/about/`).
    pub async fn find_by_url_path(
        pool: &PgPool,
        url_path: &str,
    ) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE url_path = $1 ORDER BY path LIMIT 1");
        sqlx::query_as::<_, Page>(&query)
            .bind(url_path)
            .fetch_optional(pool)
            .await
    }

    /// Publish or unpublish a page. Returns `None` if the page does not exist.
    pub async fn set_live(pool: &PgPool, id: DbId, live: bool) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("UPDATE pages SET live = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .bind(live)
            .fetch_optional(pool)
            .await
    }

    /// Create a page as the last child of `input.parent_id`.
    ///
    /// Page-init hooks run against the parent before validation. Translatable
    /// pages get a fresh translation key unless one is supplied, and fall back
    /// to the default language when neither the caller nor a hook chose one.
    pub async fn create_child(
        pool: &PgPool,
        hooks: &PageInitHooks,
        input: CreatePage,
    ) -> Result<Page, DbError> {
        let mut draft = input;
        let mut tx = pool.begin().await?;

        let parent = Self::lock(&mut tx, draft.parent_id).await?;
        hooks.dispatch(&parent, &mut draft);

        validate_new_page(&draft.title, &draft.slug, &draft.page_type)?;
        let siblings = Self::child_slugs_on(&mut tx, parent.id).await?;
        ensure_slug_available(&draft.slug, siblings.iter().map(String::as_str), &parent.title)?;

        let (translation_key, language_id) = if draft.is_translatable() {
            let language_id = match draft.language_id {
                Some(id) => {
                    LanguageRepo::find_by_id(pool, id).await?.ok_or_else(|| {
                        CoreError::Validation(format!("Language {id} does not exist"))
                    })?;
                    id
                }
                None => {
                    LanguageRepo::default(pool)
                        .await?
                        .ok_or_else(|| {
                            CoreError::Validation(
                                "No language given and no default language configured"
                                    .to_string(),
                            )
                        })?
                        .id
                }
            };
            (
                Some(draft.translation_key.unwrap_or_else(Uuid::new_v4)),
                Some(language_id),
            )
        } else {
            (None, None)
        };

        let last_child = Self::last_child_path(&mut tx, parent.id).await?;
        let path = tree_path::next_child_path(&parent.path, last_child.as_deref())?;
        let url_path = tree_path::child_url_path(&parent.url_path, &draft.slug);

        let page = Self::insert(
            &mut tx,
            &NewRow {
                parent_id: parent.id,
                path: &path,
                numchild: 0,
                title: &draft.title,
                slug: &draft.slug,
                url_path: &url_path,
                live: draft.live.unwrap_or(false),
                page_type: &draft.page_type,
                translation_key,
                language_id,
            },
        )
        .await?;
        Self::increment_numchild(&mut tx, parent.id).await?;

        tx.commit().await?;
        tracing::info!(page_id = page.id, parent_id = parent.id, path = %page.path, "Page created");
        Ok(page)
    }

    /// Copy a page, and optionally its descendants, to the end of
    /// `new_parent_id`'s children.
    ///
    /// The top copy takes the override title and slug. Translation keys are
    /// preserved, so each copy joins its source's translation group; the
    /// override language applies to every translatable copy. Everything runs
    /// in one transaction.
    pub async fn copy(
        pool: &PgPool,
        source_id: DbId,
        new_parent_id: DbId,
        overrides: &CopyOverrides,
        options: CopyOptions,
    ) -> Result<Page, DbError> {
        let mut tx = pool.begin().await?;

        let source = Self::find_on(&mut tx, source_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Page",
                id: source_id,
            })?;
        let parent = Self::lock(&mut tx, new_parent_id).await?;

        if tree_path::is_within(&parent.path, &source.path) {
            return Err(CoreError::Validation(
                "A page cannot be copied into itself or one of its descendants".to_string(),
            )
            .into());
        }
        if overrides.language_id.is_some() && !source.is_translatable() {
            return Err(CoreError::Validation(format!(
                "Page {source_id} is not translatable and cannot change language"
            ))
            .into());
        }

        validate_new_page(&overrides.title, &overrides.slug, &source.page_type)?;
        let siblings = Self::child_slugs_on(&mut tx, parent.id).await?;
        ensure_slug_available(
            &overrides.slug,
            siblings.iter().map(String::as_str),
            &parent.title,
        )?;

        let descendants = if options.recursive {
            Self::descendants_on(&mut tx, &source.path).await?
        } else {
            Vec::new()
        };

        let last_child = Self::last_child_path(&mut tx, parent.id).await?;
        let root_path = tree_path::next_child_path(&parent.path, last_child.as_deref())?;
        let root_url_path = tree_path::child_url_path(&parent.url_path, &overrides.slug);

        let copy = Self::insert(
            &mut tx,
            &NewRow {
                parent_id: parent.id,
                path: &root_path,
                numchild: if options.recursive { source.numchild } else { 0 },
                title: &overrides.title,
                slug: &overrides.slug,
                url_path: &root_url_path,
                live: options.keep_live && source.live,
                page_type: &source.page_type,
                translation_key: source.translation_key,
                language_id: overrides.language_id.or(source.language_id),
            },
        )
        .await?;

        let mut copied_ids: HashMap<DbId, DbId> = HashMap::new();
        copied_ids.insert(source.id, copy.id);

        for page in &descendants {
            let new_parent = page
                .parent_id
                .and_then(|id| copied_ids.get(&id).copied())
                .ok_or_else(|| {
                    CoreError::Internal(format!("Parent of page {} was not copied", page.id))
                })?;
            let path = tree_path::rebase(&page.path, &source.path, &root_path).ok_or_else(|| {
                CoreError::Internal(format!("Page {} is outside the copied subtree", page.id))
            })?;
            let url_path = tree_path::rebase(&page.url_path, &source.url_path, &root_url_path)
                .ok_or_else(|| {
                    CoreError::Internal(format!("Page {} has an inconsistent url_path", page.id))
                })?;
            let language_id = if page.is_translatable() {
                overrides.language_id.or(page.language_id)
            } else {
                None
            };

            let copied = Self::insert(
                &mut tx,
                &NewRow {
                    parent_id: new_parent,
                    path: &path,
                    numchild: page.numchild,
                    title: &page.title,
                    slug: &page.slug,
                    url_path: &url_path,
                    live: options.keep_live && page.live,
                    page_type: &page.page_type,
                    translation_key: page.translation_key,
                    language_id,
                },
            )
            .await?;
            copied_ids.insert(page.id, copied.id);
        }

        Self::increment_numchild(&mut tx, parent.id).await?;
        tx.commit().await?;

        tracing::info!(
            source_id,
            copy_id = copy.id,
            new_parent_id,
            descendants = descendants.len(),
            keep_live = options.keep_live,
            "Page copied"
        );
        Ok(copy)
    }

    // -----------------------------------------------------------------------
    // Connection-level helpers (usable inside transactions)
    // -----------------------------------------------------------------------

    async fn find_on(conn: &mut PgConnection, id: DbId) -> Result<Option<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1");
        sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await
    }

    /// Lock a parent row so concurrent inserts below it get distinct paths.
    async fn lock(conn: &mut PgConnection, id: DbId) -> Result<Page, DbError> {
        let query = format!("SELECT {COLUMNS} FROM pages WHERE id = $1 FOR UPDATE");
        let page = sqlx::query_as::<_, Page>(&query)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or(CoreError::NotFound { entity: "Page", id })?;
        Ok(page)
    }

    async fn child_slugs_on(
        conn: &mut PgConnection,
        parent_id: DbId,
    ) -> Result<Vec<String>, sqlx::Error> {
        let rows: Vec<(String,)> =
            sqlx::query_as("SELECT slug FROM pages WHERE parent_id = $1 ORDER BY path")
                .bind(parent_id)
                .fetch_all(conn)
                .await?;
        Ok(rows.into_iter().map(|(slug,)| slug).collect())
    }

    async fn last_child_path(
        conn: &mut PgConnection,
        parent_id: DbId,
    ) -> Result<Option<String>, sqlx::Error> {
        let row: Option<(String,)> = sqlx::query_as(
            "SELECT path FROM pages WHERE parent_id = $1 ORDER BY path DESC LIMIT 1",
        )
        .bind(parent_id)
        .fetch_optional(conn)
        .await?;
        Ok(row.map(|(path,)| path))
    }

    /// Strict descendants of a path in tree order (parents before children).
    async fn descendants_on(
        conn: &mut PgConnection,
        path: &str,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages \
             WHERE path LIKE $1 || '%' AND path <> $1 \
             ORDER BY path"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(path)
            .fetch_all(conn)
            .await
    }

    async fn insert(conn: &mut PgConnection, row: &NewRow<'_>) -> Result<Page, sqlx::Error> {
        let query = format!(
            "INSERT INTO pages \
                (parent_id, path, depth, numchild, title, slug, url_path, live, \
                 page_type, translation_key, language_id) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11) \
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(row.parent_id)
            .bind(row.path)
            .bind(tree_path::depth_of(row.path))
            .bind(row.numchild)
            .bind(row.title)
            .bind(row.slug)
            .bind(row.url_path)
            .bind(row.live)
            .bind(row.page_type)
            .bind(row.translation_key)
            .bind(row.language_id)
            .fetch_one(conn)
            .await
    }

    async fn increment_numchild(conn: &mut PgConnection, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE pages SET numchild = numchild + 1 WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await?;
        Ok(())
    }
}
