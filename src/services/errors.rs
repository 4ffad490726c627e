use thiserror::Error;

/// Failures surfaced by the service layer, mapped to HTTP statuses in `routes`.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not found")]
    NotFound,

    /// Request body failed validation.
    #[error("{0}")]
    Form(String),

    #[error("type constraint violation: {0}")]
    TypeConstraint(String),

    /// Storage or runtime fault. The message is logged, never returned.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ServiceResult<T> = Result<T, ServiceError>;
