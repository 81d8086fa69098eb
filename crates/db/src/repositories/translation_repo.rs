//! Translation group queries over translatable pages.
//!
//! A page's translations are the other pages sharing its `translation_key`.
//! Non-translatable pages have no group, so every query returns empty.

use lingua_core::error::CoreError;
use lingua_core::page_hooks::LanguageNode;
use lingua_core::page_types::validate_new_page;
use lingua_core::permissions::PagePermissions;
use lingua_core::translation::{copy_keeps_live, ensure_slug_available, pick_translation};
use lingua_core::types::{DbId, TranslationKey};
use sqlx::PgPool;

use crate::error::DbError;
use crate::models::page::{CopyOptions, CopyOverrides, NewTranslation, Page};
use crate::repositories::{LanguageRepo, PageRepo, SiteRepo};

/// Page columns qualified with the `p` alias for joins.
const COLUMNS: &str = "p.id, p.parent_id, p.path, p.depth, p.numchild, p.title, p.slug, \
                       p.url_path, p.live, p.page_type, p.translation_key, p.language_id, \
                       p.created_at, p.updated_at";

/// Provides translation group lookups.
pub struct TranslationRepo;

impl TranslationRepo {
    /// All pages of a translation group in creation order.
    pub async fn group_members(
        pool: &PgPool,
        translation_key: TranslationKey,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM pages p WHERE p.translation_key = $1 ORDER BY p.id");
        sqlx::query_as::<_, Page>(&query)
            .bind(translation_key)
            .fetch_all(pool)
            .await
    }

    /// Live pages of a group, the page itself included, in creation order.
    pub async fn live_group_members(
        pool: &PgPool,
        translation_key: TranslationKey,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM pages p \
             WHERE p.translation_key = $1 AND p.live = true \
             ORDER BY p.id"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(translation_key)
            .fetch_all(pool)
            .await
    }

    /// Translations of `page`, excluding the page itself, ordered by the
    /// language's `sort_order`.
    ///
    /// With `only_live`, only published pages in live languages are returned.
    pub async fn get_translations(
        pool: &PgPool,
        page: &Page,
        only_live: bool,
    ) -> Result<Vec<Page>, sqlx::Error> {
        let Some(key) = page.translation_key else {
            return Ok(Vec::new());
        };

        let live_filter = if only_live {
            "AND p.live = true AND l.live = true"
        } else {
            ""
        };
        let query = format!(
            "SELECT {COLUMNS} FROM pages p JOIN languages l ON l.id = p.language_id \
             WHERE p.translation_key = $1 AND p.id <> $2 {live_filter} \
             ORDER BY l.sort_order, l.id, p.id"
        );
        sqlx::query_as::<_, Page>(&query)
            .bind(key)
            .bind(page.id)
            .fetch_all(pool)
            .await
    }

    /// Whether the group of `page` has a page in the given language.
    ///
    /// The page itself counts.
    pub async fn has_translation(
        pool: &PgPool,
        page: &Page,
        language_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let Some(key) = page.translation_key else {
            return Ok(false);
        };
        let (exists,): (bool,) = sqlx::query_as(
            "SELECT EXISTS (\
                SELECT 1 FROM pages WHERE translation_key = $1 AND language_id = $2\
             )",
        )
        .bind(key)
        .bind(language_id)
        .fetch_one(pool)
        .await?;
        Ok(exists)
    }

    /// The group's page in the given language; the most recently created one
    /// if there are several.
    pub async fn get_translation(
        pool: &PgPool,
        page: &Page,
        language_id: DbId,
    ) -> Result<Option<Page>, sqlx::Error> {
        let Some(key) = page.translation_key else {
            return Ok(None);
        };
        let members = Self::group_members(pool, key).await?;
        Ok(pick_translation(&members, language_id).cloned())
    }

    /// [`Self::get_translation`] for a language code.
    pub async fn get_translation_from_code(
        pool: &PgPool,
        page: &Page,
        code: &str,
    ) -> Result<Option<Page>, DbError> {
        let language = LanguageRepo::find_by_code(pool, code)
            .await?
            .ok_or_else(|| CoreError::NotFoundByKey {
                entity: "Language",
                key: code.to_string(),
            })?;
        Ok(Self::get_translation(pool, page, language.id).await?)
    }

    /// The page a new translation of `page` should be created under.
    ///
    /// Looks for the parent's translation in that language within the page's
    /// site. When the parent's group has no such page there, the site root is
    /// suggested. `None` when the page is outside every site or its parent is
    /// not translatable.
    pub async fn get_translation_parent(
        pool: &PgPool,
        page: &Page,
        language_id: DbId,
    ) -> Result<Option<Page>, sqlx::Error> {
        let Some(site) = SiteRepo::find_for_page_path(pool, &page.path).await? else {
            return Ok(None);
        };
        let Some(parent) = PageRepo::parent_of(pool, page).await? else {
            return Ok(None);
        };
        let Some(parent_key) = parent.translation_key.filter(|_| parent.is_translatable()) else {
            return Ok(None);
        };

        let query = format!(
            "SELECT {COLUMNS} FROM pages p \
             WHERE p.translation_key = $1 AND p.language_id = $2 AND p.path LIKE $3 || '%' \
             ORDER BY p.path \
             LIMIT 1"
        );
        let translated_parent = sqlx::query_as::<_, Page>(&query)
            .bind(parent_key)
            .bind(language_id)
            .bind(&site.root_path)
            .fetch_optional(pool)
            .await?;

        match translated_parent {
            Some(found) => Ok(Some(found)),
            None => PageRepo::find_by_id(pool, site.root_page_id).await,
        }
    }

    /// Copy `source` into a new language below `request.parent_id`.
    ///
    /// Checks run in order before anything is written: the source must be
    /// translatable, the language and parent must exist, title and slug must
    /// be valid, the slug must be free under the parent, and the user must be
    /// allowed to add pages there. The copy keeps the source's translation
    /// key.
    pub async fn add_translation(
        pool: &PgPool,
        source: &Page,
        request: &NewTranslation,
        permissions: PagePermissions,
    ) -> Result<Page, DbError> {
        if !source.is_translatable() {
            return Err(CoreError::Validation(format!(
                "Page {} is not translatable",
                source.id
            ))
            .into());
        }
        LanguageRepo::find_by_id(pool, request.language_id)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Language",
                id: request.language_id,
            })?;
        let parent = PageRepo::find_by_id(pool, request.parent_id)
            .await?
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Parent page {} does not exist",
                    request.parent_id
                ))
            })?;

        validate_new_page(&request.title, &request.slug, &source.page_type)?;
        let siblings = PageRepo::child_slugs(pool, parent.id).await?;
        ensure_slug_available(&request.slug, siblings.iter().map(String::as_str), &parent.title)?;

        permissions.ensure_can_add_subpage()?;

        let keep_live = copy_keeps_live(
            permissions.can_publish_subpage,
            request.publish,
            source.live,
        );
        let copy = PageRepo::copy(
            pool,
            source.id,
            parent.id,
            &CopyOverrides {
                title: request.title.clone(),
                slug: request.slug.clone(),
                language_id: Some(request.language_id),
            },
            CopyOptions {
                keep_live,
                recursive: request.copy_subpages,
            },
        )
        .await?;

        tracing::info!(
            source_id = source.id,
            translation_id = copy.id,
            language_id = request.language_id,
            live = copy.live,
            "Translation added"
        );
        Ok(copy)
    }
}
