//! Shared query parameter types for API handlers.

use lingua_core::types::DbId;
use serde::Deserialize;

/// `?live_only=` for the language list. Defaults to all languages.
#[derive(Debug, Default, Deserialize)]
pub struct LanguageListParams {
    pub live_only: Option<bool>,
}

/// `?only_live=` for translation listings. Defaults to live translations only.
#[derive(Debug, Default, Deserialize)]
pub struct TranslationListParams {
    pub only_live: Option<bool>,
}

impl TranslationListParams {
    pub fn only_live(&self) -> bool {
        self.only_live.unwrap_or(true)
    }
}

/// Parameters for the language switcher.
///
/// Either `page_id` (with an optional `view_slug`) or `path` with the
/// `current` language code.
#[derive(Debug, Default, Deserialize)]
pub struct SwitcherParams {
    pub page_id: Option<DbId>,
    pub view_slug: Option<String>,
    pub path: Option<String>,
    pub current: Option<String>,
}
