//! Translation group rules: lookup tie-breaks, root routing, and the
//! add-translation form.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::error::CoreError;
use crate::page_hooks::LanguageNode;
use crate::types::{DbId, TranslationKey};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Maximum length of a page title.
pub const MAX_TITLE_LENGTH: u64 = 255;

/// Maximum length of a page slug.
pub const MAX_SLUG_LENGTH: usize = 255;

/// Sub-view that renders all translations together; its URL is not suffixed.
pub const SIDE_BY_SIDE_VIEW: &str = "side_by_side";

// ---------------------------------------------------------------------------
// Group members
// ---------------------------------------------------------------------------

/// A page as seen by the translation rules.
pub trait TranslationMember: LanguageNode {
    fn page_id(&self) -> DbId;
    fn translation_key(&self) -> Option<TranslationKey>;
    fn is_live(&self) -> bool;
}

/// Choose the translation for a language among group members.
///
/// `members` must be in creation order. Several pages with the same language
/// in one group is an anomaly; the most recently created one wins.
pub fn pick_translation<T: TranslationMember>(members: &[T], language_id: DbId) -> Option<&T> {
    members
        .iter()
        .rev()
        .find(|m| m.language_id() == Some(language_id))
}

/// Result of routing a visitor at a translation root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome<T> {
    Redirect(T),
    NotFound,
}

/// Pick the live page for the first candidate language that has one.
///
/// `candidate_languages` is ordered best first; `pages` are the live
/// translatable children of the routing root, in tree order.
pub fn route_request<'a, T: TranslationMember>(
    candidate_languages: &[DbId],
    pages: &'a [T],
) -> RouteOutcome<&'a T> {
    for language_id in candidate_languages {
        let found = pages
            .iter()
            .find(|p| p.is_live() && p.language_id() == Some(*language_id));
        if let Some(page) = found {
            return RouteOutcome::Redirect(page);
        }
    }
    RouteOutcome::NotFound
}

/// Whether a translated copy is published.
///
/// Publishing needs the permission, an explicit request, and a live source.
pub fn copy_keeps_live(can_publish: bool, requested: bool, source_live: bool) -> bool {
    can_publish && requested && source_live
}

/// Title shown in admin listings for translatable pages.
pub fn admin_display_title(title: &str, language_name: &str) -> String {
    format!("{title} ({language_name})")
}

/// URL of a translation when shown for a sub-view of the current page.
pub fn view_url(page_url: &str, view_slug: Option<&str>) -> String {
    match view_slug {
        Some(view) if !view.is_empty() && view != SIDE_BY_SIDE_VIEW => {
            format!("{page_url}{view}/")
        }
        _ => page_url.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Slugs
// ---------------------------------------------------------------------------

/// Slugs are ASCII letters, digits, hyphens and underscores.
pub fn validate_slug(slug: &str) -> Result<(), ValidationError> {
    if slug.is_empty() || slug.len() > MAX_SLUG_LENGTH {
        return Err(ValidationError::new("slug_length"));
    }
    let valid = slug
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if !valid {
        return Err(ValidationError::new("slug_characters"));
    }
    Ok(())
}

/// Reject a slug already used by a child of the target parent.
///
/// The comparison is exact and case-sensitive.
pub fn ensure_slug_available<'a>(
    slug: &str,
    sibling_slugs: impl IntoIterator<Item = &'a str>,
    parent_title: &str,
) -> Result<(), CoreError> {
    if sibling_slugs.into_iter().any(|s| s == slug) {
        return Err(CoreError::Validation(format!(
            "This slug is already in use within the context of its parent page \"{parent_title}\""
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Add-translation form
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

/// Submitted add-translation form.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddTranslationForm {
    #[validate(length(min = 1, max = 255))]
    pub new_title: String,
    #[validate(custom(function = "validate_slug"))]
    pub new_slug: String,
    /// Defaults to the suggested translation parent when omitted.
    pub new_parent_page: Option<DbId>,
    #[serde(default)]
    pub publish_copies: bool,
    #[serde(default = "default_true")]
    pub copy_subpages: bool,
}

impl AddTranslationForm {
    /// Run the derive validators and flatten failures into one message.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate()
            .map_err(|errors| CoreError::Validation(errors.to_string()))
    }
}

/// Initial values offered when the add-translation form is opened.
#[derive(Debug, Clone, Serialize)]
pub struct AddTranslationDefaults {
    pub new_title: String,
    pub new_slug: String,
    pub new_parent_page: Option<DbId>,
    pub can_publish: bool,
    /// Only offered when the user may publish.
    pub publish_copies: Option<bool>,
    pub copy_subpages: bool,
}

impl AddTranslationDefaults {
    pub fn new(title: &str, slug: &str, parent: Option<DbId>, can_publish: bool) -> Self {
        Self {
            new_title: title.to_string(),
            new_slug: slug.to_string(),
            new_parent_page: parent,
            can_publish,
            publish_copies: can_publish.then_some(true),
            copy_subpages: true,
        }
    }
}
