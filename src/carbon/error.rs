#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CarbonError {
    #[error("DEEPSEEK_API_KEY not set")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse API response: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("Response contained no choices")]
    EmptyResponse,
}

impl From<wreq::Error> for CarbonError {
    fn from(e: wreq::Error) -> Self {
        CarbonError::RequestFailed(Box::new(e))
    }
}
