//! Language registry rules: default selection, code validation and the
//! candidate languages offered to a visitor.

use crate::error::CoreError;
use crate::locales::LocaleCatalog;
use crate::types::DbId;

/// Read access to the fields the registry rules care about.
pub trait RegistryEntry {
    fn id(&self) -> DbId;
    fn code(&self) -> &str;
    fn is_default(&self) -> bool;
}

/// Pick the default language from an ordered list.
///
/// More than one default is a data-integrity problem, not a failure: the
/// first in order wins and a warning is logged.
pub fn select_default<T: RegistryEntry>(languages: &[T]) -> Option<&T> {
    let mut defaults = languages.iter().filter(|l| l.is_default());
    let first = defaults.next()?;

    let extra: Vec<&str> = defaults.map(|l| l.code()).collect();
    if !extra.is_empty() {
        tracing::warn!(
            chosen = first.code(),
            ignored = ?extra,
            "Multiple languages are marked as default"
        );
    }
    Some(first)
}

/// Validate a language code against the locale catalog.
pub fn validate_language_code(catalog: &LocaleCatalog, code: &str) -> Result<(), CoreError> {
    if code.trim().is_empty() {
        return Err(CoreError::Validation(
            "Language code must not be empty".to_string(),
        ));
    }
    catalog.validate_code(code)
}

/// Ids of the candidate languages for a visitor, best first.
///
/// Only the default language is offered; the request is not inspected.
pub fn user_languages<T: RegistryEntry>(default: Option<&T>) -> Vec<DbId> {
    default.map(|l| l.id()).into_iter().collect()
}
