#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum WeatherError {
    #[error("未設定氣象API金鑰")]
    MissingApiKey,

    #[error("天氣取得失敗: HTTP request failed: {0}")]
    RequestFailed(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("天氣取得失敗: API returned status {status}: {body}")]
    ApiError { status: u16, body: String },

    #[error("天氣取得失敗: failed to parse API response: {0}")]
    JsonParseFailed(#[from] serde_json::Error),

    #[error("天氣取得失敗: location `{city}` not found in response")]
    LocationNotFound { city: String },

    #[error(
        "天氣取得失敗: schema mismatch for dataset {dataset} at weatherElement[{index}]: expected `{expected}`, found `{found}`"
    )]
    SchemaMismatch {
        dataset: &'static str,
        index: usize,
        expected: &'static str,
        found: String,
    },

    #[error("天氣取得失敗: invalid data from API: missing field `{field}`")]
    MissingField { field: String },

    #[error("天氣取得失敗: invalid number `{value}` in `{field}`")]
    InvalidNumber { field: String, value: String },

    #[error("天氣取得失敗: invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl From<wreq::Error> for WeatherError {
    fn from(e: wreq::Error) -> Self {
        WeatherError::RequestFailed(Box::new(e))
    }
}
