use crate::carbon::error::CarbonError;
use crate::messenger::error::MessengerError;
use crate::repository::error::RepositoryError;
use crate::weather::error::WeatherError;

#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ServiceError {
    #[error("WeatherError: {0}")]
    WeatherError(#[from] WeatherError),

    #[error("MessengerError: {0}")]
    MessengerError(#[from] MessengerError),

    #[error("RepositoryError: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("CarbonError: {0}")]
    CarbonError(#[from] CarbonError),
}
