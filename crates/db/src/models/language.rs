//! Language entity model and DTOs.

use lingua_core::language::RegistryEntry;
use lingua_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `languages` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Language {
    pub id: DbId,
    pub code: String,
    pub is_default: bool,
    pub sort_order: i32,
    pub live: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl RegistryEntry for Language {
    fn id(&self) -> DbId {
        self.id
    }

    fn code(&self) -> &str {
        &self.code
    }

    fn is_default(&self) -> bool {
        self.is_default
    }
}

/// DTO for creating a new language.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateLanguage {
    pub code: String,
    pub is_default: Option<bool>,
    pub sort_order: Option<i32>,
    pub live: Option<bool>,
}

/// DTO for updating a language. Only non-`None` fields are applied.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateLanguage {
    pub code: Option<String>,
    pub is_default: Option<bool>,
    pub sort_order: Option<i32>,
    pub live: Option<bool>,
}
