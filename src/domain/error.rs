use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("Access denied")]
    Forbidden,

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("{0} already exists")]
    AlreadyExists(&'static str),

    #[error("Upstream call failed: {0}")]
    UpstreamFailure(String),

    #[error("Upstream call to {0} timed out")]
    UpstreamTimeout(&'static str),

    /// A cross-entity step failed after an earlier step already committed.
    /// Carries both identifiers so the divergence can be reconciled.
    #[error("write to {committed_id} committed but follow-up on {failed_id} failed")]
    Inconsistency { committed_id: Uuid, failed_id: Uuid },

    #[error("Failed to sign token: {0}")]
    TokenSigning(String),

    #[error("Invalid email address")]
    InvalidEmail,

    #[error("Empty name")]
    EmptyName,

    #[error("Negative price")]
    NegativePrice,

    #[error("Rating out of range (1-5)")]
    InvalidRating,
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),
}
