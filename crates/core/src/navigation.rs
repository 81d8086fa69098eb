//! Language switcher: one link per live language plus the current language.

use serde::Serialize;

use crate::translation::view_url;
use crate::types::DbId;

/// A live language as offered in the switcher, in registry order.
#[derive(Debug, Clone)]
pub struct SwitcherLanguage {
    pub id: DbId,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CurrentLanguage {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageLink {
    pub code: String,
    pub name: String,
    pub url: String,
    pub is_translated: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LanguageSwitcher {
    pub current: Option<CurrentLanguage>,
    pub list: Vec<LanguageLink>,
}

impl LanguageSwitcher {
    /// Switcher for a translatable page.
    ///
    /// `translations` holds `(language_id, url)` for every live page of the
    /// group, the page itself included; a later entry for the same language
    /// replaces an earlier one. Untranslated languages link to their front
    /// page.
    pub fn for_page(
        languages: &[SwitcherLanguage],
        current_language_id: Option<DbId>,
        translations: &[(DbId, String)],
        view_slug: Option<&str>,
    ) -> Self {
        let mut switcher = Self::default();

        for language in languages {
            if Some(language.id) == current_language_id {
                switcher.current = Some(CurrentLanguage {
                    code: language.code.clone(),
                    name: language.name.clone(),
                });
            }

            let translated = translations
                .iter()
                .rev()
                .find(|(language_id, _)| *language_id == language.id);

            let link = match translated {
                Some((_, url)) => LanguageLink {
                    code: language.code.clone(),
                    name: language.name.clone(),
                    url: view_url(url, view_slug),
                    is_translated: true,
                },
                None => LanguageLink {
                    code: language.code.clone(),
                    name: language.name.clone(),
                    url: format!("/{}/", language.code),
                    is_translated: false,
                },
            };
            switcher.list.push(link);
        }

        switcher
    }

    /// Switcher for a request that is not served by a page.
    ///
    /// Every language counts as translated; its URL is the request path with
    /// the first segment swapped for the language code.
    pub fn for_request(languages: &[SwitcherLanguage], path: &str, current_code: &str) -> Self {
        let mut switcher = Self::default();

        for language in languages {
            if language.code == current_code {
                switcher.current = Some(CurrentLanguage {
                    code: language.code.clone(),
                    name: language.name.clone(),
                });
            }
            switcher.list.push(LanguageLink {
                code: language.code.clone(),
                name: language.name.clone(),
                url: swap_language_segment(path, &language.code),
                is_translated: true,
            });
        }

        switcher
    }
}

/// Replace the first path segment with `code`: `/fr/news/` becomes `/en/news/`.
pub fn swap_language_segment(path: &str, code: &str) -> String {
    let mut segments: Vec<&str> = path.split('/').collect();
    if segments.len() < 2 {
        return format!("/{code}/");
    }
    segments[1] = code;
    segments.join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn languages() -> Vec<SwitcherLanguage> {
        [(1, "en", "English"), (2, "fr", "French"), (3, "de", "German")]
            .into_iter()
            .map(|(id, code, name)| SwitcherLanguage {
                id,
                code: code.to_string(),
                name: name.to_string(),
            })
            .collect()
    }

    #[test]
    fn test_page_switcher_marks_untranslated_languages() {
        let translations = vec![(1, "/en/about/".to_string()), (2, "/fr/a-propos/".to_string())];
        let switcher = LanguageSwitcher::for_page(&languages(), Some(1), &translations, None);

        assert_eq!(switcher.list.len(), 3);
        assert_eq!(
            switcher.current,
            Some(CurrentLanguage {
                code: "en".into(),
                name: "English".into()
            })
        );

        let en = &switcher.list[0];
        assert!(en.is_translated);
        assert_eq!(en.url, "/en/about/");

        let fr = &switcher.list[1];
        assert!(fr.is_translated);
        assert_eq!(fr.url, "/fr/a-propos/");

        let de = &switcher.list[2];
        assert!(!de.is_translated);
        assert_eq!(de.url, "/de/");
    }

    #[test]
    fn test_page_switcher_appends_view_slug() {
        let translations = vec![(2, "/fr/blog/".to_string())];
        let switcher =
            LanguageSwitcher::for_page(&languages(), Some(2), &translations, Some("archive"));
        assert_eq!(switcher.list[1].url, "/fr/blog/archive/");
        assert_eq!(switcher.list[0].url, "/en/");
    }

    #[test]
    fn test_page_switcher_side_by_side_keeps_url() {
        let translations = vec![(2, "/fr/blog/".to_string())];
        let switcher =
            LanguageSwitcher::for_page(&languages(), Some(2), &translations, Some("side_by_side"));
        assert_eq!(switcher.list[1].url, "/fr/blog/");
    }

    #[test]
    fn test_page_switcher_later_translation_wins() {
        let translations = vec![(2, "/fr/old/".to_string()), (2, "/fr/new/".to_string())];
        let switcher = LanguageSwitcher::for_page(&languages(), Some(1), &translations, None);
        assert_eq!(switcher.list[1].url, "/fr/new/");
    }

    #[test]
    fn test_page_switcher_without_current_language() {
        let switcher = LanguageSwitcher::for_page(&languages(), None, &[], None);
        assert!(switcher.current.is_none());
        assert!(switcher.list.iter().all(|l| !l.is_translated));
    }

    #[test]
    fn test_request_switcher_swaps_first_segment() {
        let switcher = LanguageSwitcher::for_request(&languages(), "/fr/search/", "fr");
        let urls: Vec<&str> = switcher.list.iter().map(|l| l.url.as_str()).collect();
        assert_eq!(urls, vec!["/en/search/", "/fr/search/", "/de/search/"]);
        assert!(switcher.list.iter().all(|l| l.is_translated));
        assert_eq!(switcher.current.map(|c| c.code).as_deref(), Some("fr"));
    }

    #[test]
    fn test_swap_language_segment_edge_cases() {
        assert_eq!(swap_language_segment("/", "en"), "/en");
        assert_eq!(swap_language_segment("", "en"), "/en/");
        assert_eq!(swap_language_segment("/fr", "de"), "/de");
    }
}
