use thiserror::Error;

/// The primary error type crossing service boundaries. Each variant maps to
/// one HTTP status at the API layer.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Entity absent by id or slug.
    #[error("{0} not found")]
    NotFound(String),

    /// Uniqueness violation: email, slug, api-key name, page slug.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Malformed hierarchy operation, invalid parent, missing related entity.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Failed credential check or failed token validation.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Infrastructure failure. Logged with full detail, surfaced generically.
    #[error("internal error: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
