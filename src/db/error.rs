use thiserror::Error;

/// Typed failures surfaced by the local store.
///
/// Validation and duplicate-user errors propagate to the CLI as user-facing
/// messages; everything else is a storage-layer fault.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("username '{0}' already exists")]
    DuplicateUser(String),

    #[error("payload serialization error: {0}")]
    Serialization(String),

    #[error("database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
