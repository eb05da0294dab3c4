//! Error type shared by generated repositories and storage engines.

use thiserror::Error;

/// Errors surfaced by repository methods.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RepoError {
    /// `create` was handed an entity that already carries a primary key.
    #[error("primary key not blank")]
    PrimaryNotBlank,

    /// A single-row lookup matched nothing.
    #[error("record not found")]
    RecordNotFound,

    /// Failure reported by the underlying storage engine.
    #[error("database error: {0}")]
    Database(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl RepoError {
    /// Wraps an engine-specific error.
    pub fn database<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Database(Box::new(err))
    }
}

/// Result alias used throughout generated repositories.
pub type Result<T, E = RepoError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::RepoError;

    #[test]
    fn primary_not_blank_message_is_stable() {
        assert_eq!(RepoError::PrimaryNotBlank.to_string(), "primary key not blank");
    }

    #[test]
    fn database_errors_keep_their_source() {
        let err = RepoError::database(std::io::Error::other("disk full"));
        assert_eq!(err.to_string(), "database error: disk full");
        assert!(std::error::Error::source(&err).is_some());
    }
}
