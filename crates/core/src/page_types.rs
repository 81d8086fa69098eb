//! Page type names and draft validation.
//!
//! These must match the `ck_pages_page_type` constraint in
//! `20260301000002_create_pages_table.sql`.

use crate::error::CoreError;
use crate::translation::{validate_slug, MAX_TITLE_LENGTH};

/// Tree root; never served.
pub const PAGE_TYPE_ROOT: &str = "root";

/// Site entry point that redirects visitors to a language variant.
pub const PAGE_TYPE_TRANSLATION_INDEX: &str = "translation_index";

/// Page carrying a translation key and a language.
pub const PAGE_TYPE_TRANSLATABLE: &str = "translatable";

/// Plain page without language information.
pub const PAGE_TYPE_GENERIC: &str = "generic";

/// Types that may be created through the API. The tree root is seeded.
pub const CREATABLE_PAGE_TYPES: &[&str] = &[
    PAGE_TYPE_TRANSLATION_INDEX,
    PAGE_TYPE_TRANSLATABLE,
    PAGE_TYPE_GENERIC,
];

pub fn is_creatable_page_type(page_type: &str) -> bool {
    CREATABLE_PAGE_TYPES.contains(&page_type)
}

/// Validate the user-supplied fields of a new page.
pub fn validate_new_page(title: &str, slug: &str, page_type: &str) -> Result<(), CoreError> {
    if title.trim().is_empty() {
        return Err(CoreError::Validation("Title must not be empty".to_string()));
    }
    if title.chars().count() as u64 > MAX_TITLE_LENGTH {
        return Err(CoreError::Validation(format!(
            "Title must not exceed {MAX_TITLE_LENGTH} characters"
        )));
    }
    validate_slug(slug).map_err(|e| {
        CoreError::Validation(format!("Invalid slug '{slug}': {}", e.code))
    })?;
    if !is_creatable_page_type(page_type) {
        return Err(CoreError::Validation(format!(
            "Unknown page type '{page_type}'. Must be one of: {}",
            CREATABLE_PAGE_TYPES.join(", ")
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_root_is_not_creatable() {
        assert!(!is_creatable_page_type(PAGE_TYPE_ROOT));
        assert!(is_creatable_page_type(PAGE_TYPE_TRANSLATABLE));
    }

    #[test]
    fn test_validate_new_page_accepts_valid_input() {
        assert!(validate_new_page("About us", "about-us", PAGE_TYPE_TRANSLATABLE).is_ok());
    }

    #[test]
    fn test_validate_new_page_rejects_bad_fields() {
        assert_matches!(
            validate_new_page("  ", "about", PAGE_TYPE_GENERIC),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_new_page("About", "about/us", PAGE_TYPE_GENERIC),
            Err(CoreError::Validation(msg)) if msg.contains("slug_characters")
        );
        assert_matches!(
            validate_new_page("About", "about", "blog"),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_new_page(&"x".repeat(256), "about", PAGE_TYPE_GENERIC),
            Err(CoreError::Validation(_))
        );
    }
}
