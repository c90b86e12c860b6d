//! Weather lookup for the daily push.

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

use crate::weather::advice::WateringAdvice;
use crate::weather::error::WeatherError;

pub mod advice;
pub mod cwa_platform;
pub mod error;

/// Alias to canonical administrative region, as the CWA dataset expects it.
const CITY_MAPPING: &[(&str, &str)] = &[
    ("基隆", "基隆市"),
    ("台北", "臺北市"),
    ("新北", "新北市"),
    ("板橋", "新北市"),
    ("桃園", "桃園市"),
    ("中壢", "桃園市"),
    ("新竹", "新竹市"),
    ("竹北", "新竹縣"),
    ("台中", "臺中市"),
    ("台南", "臺南市"),
    ("高雄", "高雄市"),
];

/// Maps a free-text city to its canonical name. Unknown input is returned as is.
pub fn normalize_city(city: &str) -> &str {
    CITY_MAPPING
        .iter()
        .find(|(alias, _)| *alias == city)
        .map_or(city, |&(_, canonical)| canonical)
}

/// Today's forecast for one city. Never cached across subscribers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeatherSnapshot {
    pub city: String,
    pub status: String,
    pub min_temp: i32,
    pub max_temp: i32,
    pub rain_prob: i32,
}

impl WeatherSnapshot {
    pub fn watering_advice(&self) -> WateringAdvice {
        advice::advice(Some(self.rain_prob), Some(self.max_temp))
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetches today's forecast for `city`, normalizing it first.
    async fn get_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError>;
}
