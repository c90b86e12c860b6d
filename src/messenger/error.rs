#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum MessengerError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("Messaging API error (status {status}): {message}")]
    ApiError { status: u16, message: String },
}

impl From<wreq::Error> for MessengerError {
    fn from(e: wreq::Error) -> Self {
        MessengerError::RequestFailed(Box::new(e))
    }
}
