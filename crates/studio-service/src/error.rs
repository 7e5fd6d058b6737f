use thiserror::Error;

/// Errors returned by an [`ImageService`](crate::ImageService).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    /// The backing model could not serve the request right now.
    #[error("AI model temporarily unavailable")]
    Unavailable,

    /// The request was rejected before reaching a model.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ServiceError>;
