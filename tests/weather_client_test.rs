use fernbrom::weather::WeatherProvider;
use fernbrom::weather::cwa_platform::CwaWeatherClient;
use fernbrom::weather::error::WeatherError;
use httpmock::prelude::*;
use serde_json::json;

mod common;

fn client(server: &MockServer) -> CwaWeatherClient {
    CwaWeatherClient::new(server.url(""), Some("cwa-key".to_string())).unwrap()
}

#[tokio::test]
async fn test_alias_is_normalized_in_query() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(common::FORECAST_PATH)
            .query_param("Authorization", "cwa-key")
            .query_param("locationName", "臺北市");
        then.status(200)
            .json_body(common::forecast_body("臺北市", "多雲", "30", "22", "29"));
    });

    let snapshot = client(&server).get_weather("台北").await.unwrap();
    assert_eq!(snapshot.city, "臺北市");
    assert_eq!(snapshot.status, "多雲");
    assert_eq!(snapshot.rain_prob, 30);
    assert_eq!(snapshot.min_temp, 22);
    assert_eq!(snapshot.max_temp, 29);
    mock.assert();
}

#[tokio::test]
async fn test_unknown_city_is_sent_verbatim() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path(common::FORECAST_PATH)
            .query_param("locationName", "東京");
        then.status(200)
            .json_body(json!({ "success": "true", "records": { "location": [] } }));
    });

    let result = client(&server).get_weather("東京").await;
    assert!(matches!(
        result,
        Err(WeatherError::LocationNotFound { city }) if city == "東京"
    ));
    mock.assert();
}

#[tokio::test]
async fn test_reordered_elements_fail_loudly() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(common::FORECAST_PATH);
        then.status(200).json_body(json!({
            "records": {
                "location": [ {
                    "locationName": "臺北市",
                    "weatherElement": [
                        { "elementName": "PoP", "time": [ { "parameter": { "parameterName": "10" } } ] },
                        { "elementName": "Wx", "time": [ { "parameter": { "parameterName": "晴" } } ] }
                    ]
                } ]
            }
        }));
    });

    let result = client(&server).get_weather("臺北市").await;
    assert!(matches!(
        result,
        Err(WeatherError::SchemaMismatch { index: 0, expected: "Wx", .. })
    ));
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path(common::FORECAST_PATH);
        then.status(401).body(r#"{"message":"Unauthorized"}"#);
    });

    let result = client(&server).get_weather("高雄").await;
    match result {
        Err(WeatherError::ApiError { status, body }) => {
            assert_eq!(status, 401);
            assert!(body.contains("Unauthorized"));
        }
        other => panic!("expected ApiError, got {other:?}"),
    }
}

#[tokio::test]
async fn test_missing_key_never_calls_api() {
    let server = MockServer::start();
    let mock = server.mock(|_when, then| {
        then.status(200);
    });

    let client = CwaWeatherClient::new(server.url(""), None).unwrap();
    let result = client.get_weather("台北").await;

    assert!(matches!(result, Err(WeatherError::MissingApiKey)));
    assert_eq!(result.unwrap_err().to_string(), "未設定氣象API金鑰");
    mock.assert_hits(0);
}
