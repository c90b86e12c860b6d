//! Central Weather Administration open-data client.
//!
//! Only dataset `F-C0032-001` (36-hour general forecast) is supported. Its
//! `weatherElement` array is read positionally, so the parser checks every
//! element code it relies on and rejects a payload whose layout moved.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::Quota;
use governor::RateLimiter;
use governor::clock::QuantaClock;
use governor::state::InMemoryState;
use governor::state::direct::NotKeyed;
use log::debug;
use log::info;
use serde::Deserialize;
use url::Url;

use crate::weather::WeatherProvider;
use crate::weather::WeatherSnapshot;
use crate::weather::error::WeatherError;
use crate::weather::normalize_city;

pub const DATASET_ID: &str = "F-C0032-001";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const REQUESTS_PER_SECOND: NonZeroU32 = NonZeroU32::new(5).unwrap();

/// Positions and codes of the elements read from `F-C0032-001`.
/// Position 3 (`CI`, comfort index) is unused.
const STATUS_ELEMENT: (usize, &str) = (0, "Wx");
const RAIN_PROB_ELEMENT: (usize, &str) = (1, "PoP");
const MIN_TEMP_ELEMENT: (usize, &str) = (2, "MinT");
const MAX_TEMP_ELEMENT: (usize, &str) = (4, "MaxT");

#[derive(Deserialize)]
struct DatastoreResponse {
    records: Records,
}

#[derive(Deserialize)]
struct Records {
    #[serde(default)]
    location: Vec<Location>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Location {
    location_name: String,
    #[serde(default)]
    weather_element: Vec<WeatherElement>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WeatherElement {
    element_name: String,
    #[serde(default)]
    time: Vec<TimeSlot>,
}

#[derive(Deserialize)]
struct TimeSlot {
    parameter: Parameter,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Parameter {
    parameter_name: String,
}

/// Parses an `F-C0032-001` response body into today's snapshot.
///
/// Reads the first time slot of each element. `city` is only used for the
/// error when the location list is empty.
pub fn parse_forecast(body: &str, city: &str) -> Result<WeatherSnapshot, WeatherError> {
    let response: DatastoreResponse = serde_json::from_str(body)?;
    let location =
        response
            .records
            .location
            .first()
            .ok_or_else(|| WeatherError::LocationNotFound {
                city: city.to_string(),
            })?;

    let elements = &location.weather_element;
    let status = first_parameter(elements, STATUS_ELEMENT)?.to_string();
    let rain_prob = parse_int(first_parameter(elements, RAIN_PROB_ELEMENT)?, "PoP")?;
    let min_temp = parse_int(first_parameter(elements, MIN_TEMP_ELEMENT)?, "MinT")?;
    let max_temp = parse_int(first_parameter(elements, MAX_TEMP_ELEMENT)?, "MaxT")?;

    Ok(WeatherSnapshot {
        city: location.location_name.clone(),
        status,
        min_temp,
        max_temp,
        rain_prob,
    })
}

fn first_parameter<'a>(
    elements: &'a [WeatherElement],
    (index, code): (usize, &'static str),
) -> Result<&'a str, WeatherError> {
    let element = elements.get(index).ok_or_else(|| WeatherError::SchemaMismatch {
        dataset: DATASET_ID,
        index,
        expected: code,
        found: "<missing>".to_string(),
    })?;

    if element.element_name != code {
        return Err(WeatherError::SchemaMismatch {
            dataset: DATASET_ID,
            index,
            expected: code,
            found: element.element_name.clone(),
        });
    }

    element
        .time
        .first()
        .map(|slot| slot.parameter.parameter_name.as_str())
        .ok_or_else(|| WeatherError::MissingField {
            field: format!("weatherElement[{index}].time[0]"),
        })
}

fn parse_int(value: &str, field: &str) -> Result<i32, WeatherError> {
    value
        .trim()
        .parse::<i32>()
        .map_err(|_| WeatherError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// CWA forecast client with request pacing.
pub struct CwaWeatherClient {
    client: wreq::Client,
    api_url: String,
    api_key: Option<String>,
    limiter: RateLimiter<NotKeyed, InMemoryState, QuantaClock>,
}

impl CwaWeatherClient {
    /// Creates a client against `api_url` (e.g. `https://opendata.cwa.gov.tw`).
    ///
    /// A `None` key is accepted; every lookup then fails with
    /// [`WeatherError::MissingApiKey`] without touching the network.
    pub fn new(api_url: impl Into<String>, api_key: Option<String>) -> Result<Self, WeatherError> {
        let client = wreq::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        let limiter = RateLimiter::direct(Quota::per_second(REQUESTS_PER_SECOND));

        Ok(Self {
            client,
            api_url: api_url.into(),
            api_key,
            limiter,
        })
    }

    fn forecast_url(&self, api_key: &str, city_name: &str) -> Result<Url, WeatherError> {
        let base = format!(
            "{}/api/v1/rest/datastore/{}",
            self.api_url.trim_end_matches('/'),
            DATASET_ID
        );
        Ok(Url::parse_with_params(
            &base,
            &[
                ("Authorization", api_key),
                ("format", "JSON"),
                ("locationName", city_name),
            ],
        )?)
    }

    async fn send(&self, url: &Url) -> Result<wreq::Response, wreq::Error> {
        if self.limiter.check().is_err() {
            info!("CWA requests are ratelimited. Waiting...");
        }
        self.limiter.until_ready().await;

        // The query string carries the API key, so only the path is logged.
        debug!("Making request to: {}", url.path());
        self.client.get(url.as_str()).send().await
    }
}

#[async_trait]
impl WeatherProvider for CwaWeatherClient {
    async fn get_weather(&self, city: &str) -> Result<WeatherSnapshot, WeatherError> {
        let city_name = normalize_city(city);
        let api_key = self.api_key.as_deref().ok_or(WeatherError::MissingApiKey)?;

        let url = self.forecast_url(api_key, city_name)?;
        let response = self.send(&url).await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(WeatherError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        parse_forecast(&body, city_name)
    }
}
