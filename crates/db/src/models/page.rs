//! Page tree model and DTOs.
//!
//! Every page lives in the `pages` table; translatable pages are the rows
//! with `page_type = 'translatable'`, which always carry a translation key
//! and a language.

use lingua_core::page_hooks::{LanguageNode, LanguageNodeMut};
use lingua_core::page_types::{PAGE_TYPE_TRANSLATABLE, PAGE_TYPE_TRANSLATION_INDEX};
use lingua_core::translation::TranslationMember;
use lingua_core::types::{DbId, Timestamp, TranslationKey};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `pages` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Page {
    pub id: DbId,
    pub parent_id: Option<DbId>,
    pub path: String,
    pub depth: i32,
    pub numchild: i32,
    pub title: String,
    pub slug: String,
    pub url_path: String,
    pub live: bool,
    pub page_type: String,
    pub translation_key: Option<TranslationKey>,
    pub language_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Page {
    pub fn is_translation_index(&self) -> bool {
        self.page_type == PAGE_TYPE_TRANSLATION_INDEX
    }
}

impl LanguageNode for Page {
    fn is_translatable(&self) -> bool {
        self.page_type == PAGE_TYPE_TRANSLATABLE
    }

    fn language_id(&self) -> Option<DbId> {
        self.language_id
    }
}

impl TranslationMember for Page {
    fn page_id(&self) -> DbId {
        self.id
    }

    fn translation_key(&self) -> Option<TranslationKey> {
        self.translation_key
    }

    fn is_live(&self) -> bool {
        self.live
    }
}

fn default_page_type() -> String {
    PAGE_TYPE_TRANSLATABLE.to_string()
}

/// DTO for creating a page below an existing parent.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePage {
    pub parent_id: DbId,
    pub title: String,
    pub slug: String,
    #[serde(default = "default_page_type")]
    pub page_type: String,
    pub live: Option<bool>,
    /// Ignored for non-translatable pages. Page-init hooks may replace it.
    pub language_id: Option<DbId>,
    /// Joins an existing translation group; a fresh key is assigned if absent.
    pub translation_key: Option<TranslationKey>,
}

impl LanguageNode for CreatePage {
    fn is_translatable(&self) -> bool {
        self.page_type == PAGE_TYPE_TRANSLATABLE
    }

    fn language_id(&self) -> Option<DbId> {
        self.language_id
    }
}

impl LanguageNodeMut for CreatePage {
    fn set_language_id(&mut self, language_id: DbId) {
        self.language_id = Some(language_id);
    }
}

/// Attributes replaced on the top page of a copy.
#[derive(Debug, Clone)]
pub struct CopyOverrides {
    pub title: String,
    pub slug: String,
    /// Applied to every translatable page in the copied subtree.
    pub language_id: Option<DbId>,
}

/// Options controlling a subtree copy.
#[derive(Debug, Clone, Copy)]
pub struct CopyOptions {
    /// Keep each copied page's live state; otherwise copies are drafts.
    pub keep_live: bool,
    /// Copy descendants as well as the page itself.
    pub recursive: bool,
}

/// A resolved add-translation request.
#[derive(Debug, Clone)]
pub struct NewTranslation {
    pub language_id: DbId,
    pub title: String,
    pub slug: String,
    pub parent_id: DbId,
    /// Publishing is only honoured with permission and a live source.
    pub publish: bool,
    pub copy_subpages: bool,
}
