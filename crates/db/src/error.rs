use lingua_core::error::CoreError;

/// Errors from repository operations that enforce domain rules.
///
/// Plain CRUD helpers return `sqlx::Error` directly; operations that also
/// validate input or guard references return this type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Database error: {0}")]
    Sqlx(#[from] sqlx::Error),
}
