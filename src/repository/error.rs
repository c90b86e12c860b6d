#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum RepositoryError {
    #[error("Internal database error: {0}")]
    BackendError(#[from] diesel::result::Error),

    #[error("Database connection error: {message}")]
    ConnectionError { message: String },

    #[error("Internal database error: {message}")]
    InternalError { message: String },
}
