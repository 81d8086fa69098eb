//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&PgPool` as the first argument.

pub mod language_repo;
pub mod page_repo;
pub mod site_repo;
pub mod translation_repo;

pub use language_repo::LanguageRepo;
pub use page_repo::PageRepo;
pub use site_repo::SiteRepo;
pub use translation_repo::TranslationRepo;
