//! Site-wide catalog of supported locale codes.
//!
//! Language records may only use codes listed here. The catalog also supplies
//! the human-readable names shown in the admin surface and the language
//! switcher.

use serde::Serialize;

use crate::error::CoreError;

/// Maximum length of a locale code (matches the `languages.code` column).
pub const MAX_CODE_LENGTH: usize = 12;

/// Catalog used when `LANGUAGES` is not configured.
pub const BUILTIN_LOCALES: &[(&str, &str)] = &[
    ("en", "English"),
    ("fr", "French"),
    ("de", "German"),
    ("nl", "Dutch"),
    ("es", "Spanish"),
    ("it", "Italian"),
    ("pt", "Portuguese"),
    ("pl", "Polish"),
    ("ja", "Japanese"),
    ("zh-hans", "Simplified Chinese"),
];

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Locale {
    pub code: String,
    pub name: String,
}

/// Ordered set of supported locales, in configuration order.
#[derive(Debug, Clone)]
pub struct LocaleCatalog {
    locales: Vec<Locale>,
}

impl Default for LocaleCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

impl LocaleCatalog {
    pub fn builtin() -> Self {
        Self {
            locales: BUILTIN_LOCALES
                .iter()
                .map(|(code, name)| Locale {
                    code: (*code).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
        }
    }

    /// Parse a catalog from `code:Name` pairs separated by commas, e.g.
    /// `en:English,fr:Français`.
    ///
    /// Blank entries are skipped. Duplicate codes, missing names and codes
    /// longer than [`MAX_CODE_LENGTH`] are rejected.
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let mut locales: Vec<Locale> = Vec::new();

        for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            let (code, name) = entry.split_once(':').ok_or_else(|| {
                CoreError::Validation(format!(
                    "Locale entry '{entry}' must have the form code:Name"
                ))
            })?;
            let code = code.trim();
            let name = name.trim();

            if code.is_empty() || name.is_empty() {
                return Err(CoreError::Validation(format!(
                    "Locale entry '{entry}' has an empty code or name"
                )));
            }
            if code.len() > MAX_CODE_LENGTH {
                return Err(CoreError::Validation(format!(
                    "Locale code '{code}' exceeds {MAX_CODE_LENGTH} characters"
                )));
            }
            if locales.iter().any(|l| l.code == code) {
                return Err(CoreError::Validation(format!(
                    "Locale code '{code}' is listed more than once"
                )));
            }

            locales.push(Locale {
                code: code.to_string(),
                name: name.to_string(),
            });
        }

        if locales.is_empty() {
            return Err(CoreError::Validation(
                "Locale catalog must contain at least one entry".to_string(),
            ));
        }

        Ok(Self { locales })
    }

    pub fn contains(&self, code: &str) -> bool {
        self.locales.iter().any(|l| l.code == code)
    }

    pub fn display_name(&self, code: &str) -> Option<&str> {
        self.locales
            .iter()
            .find(|l| l.code == code)
            .map(|l| l.name.as_str())
    }

    /// Display name for a code, falling back to the code itself for codes
    /// that were removed from the catalog after records were created.
    pub fn name_or_code<'a>(&'a self, code: &'a str) -> &'a str {
        self.display_name(code).unwrap_or(code)
    }

    /// Catalog entries sorted by display name, for choice lists.
    pub fn choices(&self) -> Vec<Locale> {
        let mut choices = self.locales.clone();
        choices.sort_by(|a, b| a.name.cmp(&b.name));
        choices
    }

    /// Reject codes that are not part of the catalog.
    pub fn validate_code(&self, code: &str) -> Result<(), CoreError> {
        if self.contains(code) {
            Ok(())
        } else {
            Err(CoreError::Validation(format!(
                "'{code}' is not one of the configured languages"
            )))
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &Locale> {
        self.locales.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_builtin_contains_english() {
        let catalog = LocaleCatalog::builtin();
        assert!(catalog.contains("en"));
        assert_eq!(catalog.display_name("en"), Some("English"));
    }

    #[test]
    fn test_parse_keeps_configuration_order() {
        let catalog = LocaleCatalog::parse("nl:Nederlands, en:English ,fr:Français").unwrap();
        let codes: Vec<&str> = catalog.iter().map(|l| l.code.as_str()).collect();
        assert_eq!(codes, vec!["nl", "en", "fr"]);
    }

    #[test]
    fn test_parse_skips_blank_entries() {
        let catalog = LocaleCatalog::parse("en:English,,").unwrap();
        assert_eq!(catalog.iter().count(), 1);
    }

    #[test]
    fn test_parse_rejects_missing_separator() {
        assert_matches!(LocaleCatalog::parse("en"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_parse_rejects_duplicates() {
        assert_matches!(
            LocaleCatalog::parse("en:English,en:Anglais"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_parse_rejects_long_codes() {
        assert_matches!(
            LocaleCatalog::parse("abcdefghijklm:Too long"),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn test_parse_rejects_empty_catalog() {
        assert_matches!(LocaleCatalog::parse(" , "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_choices_sorted_by_display_name() {
        let catalog = LocaleCatalog::parse("fr:French,de:German,en:English").unwrap();
        let names: Vec<String> = catalog.choices().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["English", "French", "German"]);
    }

    #[test]
    fn test_validate_code() {
        let catalog = LocaleCatalog::builtin();
        assert!(catalog.validate_code("fr").is_ok());
        assert_matches!(catalog.validate_code("xx"), Err(CoreError::Validation(_)));
        assert_matches!(catalog.validate_code("EN"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn test_name_or_code_falls_back() {
        let catalog = LocaleCatalog::builtin();
        assert_eq!(catalog.name_or_code("de"), "German");
        assert_eq!(catalog.name_or_code("tlh"), "tlh");
    }
}
