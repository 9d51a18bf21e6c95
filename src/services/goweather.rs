//! Client for the upstream weather-by-city service.
//!
//! `GET <base>/weather/<city>` returns a small JSON object:
//! `{"temperature": "+28 °C", "wind": "10 km/h", "description": "Sunny",
//!   "forecast": [{"day": "1", "temperature": "+29 °C", "wind": "12 km/h"}]}`.
//! The shape is not guaranteed, so parsing never fails: anything missing or
//! mistyped is left empty and filled in by normalization.

use reqwest::StatusCode;
use serde_json::Value;

use crate::config::UpstreamConfig;
use crate::errors::AppError;
use crate::services::observation::{RawForecastDay, RawObservation};

/// Client for the upstream weather service.
#[derive(Debug, Clone)]
pub struct GoWeatherClient {
    client: reqwest::Client,
    base_url: String,
}

/// The result of an upstream lookup.
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTTP 2xx, body parsed leniently.
    Found(RawObservation),
    /// HTTP error status with the JSON body, if the upstream sent one.
    /// Mapped to a client-facing error by the caller.
    Rejected {
        status: StatusCode,
        body: Option<Value>,
    },
}

impl GoWeatherClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
        })
    }

    fn city_url(&self, city: &str) -> Result<reqwest::Url, AppError> {
        let mut url = reqwest::Url::parse(&self.base_url).map_err(|e| {
            AppError::InternalError(format!("Invalid upstream URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                AppError::InternalError(format!("Upstream URL '{}' has no path", self.base_url))
            })?
            .pop_if_empty()
            .push("weather")
            .push(city);
        Ok(url)
    }

    /// Fetch the current observation and short outlook for `city`.
    ///
    /// Transport failures become errors right away; HTTP error statuses are
    /// returned as `FetchOutcome::Rejected`.
    pub async fn fetch_city(&self, city: &str) -> Result<FetchOutcome, AppError> {
        let url = self.city_url(city)?;
        tracing::debug!("Fetching upstream weather from {}", url);

        let response = self.client.get(url).send().await.map_err(classify_error)?;
        let status = response.status();
        let text = response.text().await.map_err(classify_error)?;
        let body: Option<Value> = serde_json::from_str(&text).ok();

        if !status.is_success() {
            tracing::warn!("Upstream returned HTTP {} for '{}'", status, city);
            return Ok(FetchOutcome::Rejected { status, body });
        }

        let raw = match body {
            Some(value) => parse_observation(&value),
            None => {
                tracing::warn!(
                    "Upstream body for '{}' is not JSON, using defaults",
                    city
                );
                RawObservation::default()
            }
        };
        Ok(FetchOutcome::Found(raw))
    }
}

/// Map a reqwest transport error onto the client-facing taxonomy.
fn classify_error(err: reqwest::Error) -> AppError {
    if err.is_timeout() {
        tracing::warn!("Upstream request timed out: {}", err);
        AppError::UpstreamTimeout
    } else if err.is_connect() {
        tracing::warn!("Upstream unreachable: {}", err);
        AppError::Network
    } else {
        tracing::warn!("Upstream request failed: {}", err);
        AppError::FetchFailed
    }
}

fn string_field(value: &Value, key: &str) -> Option<String> {
    value.get(key).and_then(Value::as_str).map(str::to_string)
}

/// Build a `RawObservation` from whatever JSON the upstream sent.
///
/// Non-string fields are treated as absent and non-object forecast entries
/// are skipped.
pub fn parse_observation(value: &Value) -> RawObservation {
    let forecast = value
        .get("forecast")
        .and_then(Value::as_array)
        .map(|days| {
            days.iter()
                .filter(|day| day.is_object())
                .map(|day| RawForecastDay {
                    temperature: string_field(day, "temperature"),
                    sky: string_field(day, "sky"),
                    wind: string_field(day, "wind"),
                })
                .collect()
        })
        .unwrap_or_default();

    RawObservation {
        description: string_field(value, "description"),
        temperature: string_field(value, "temperature"),
        wind: string_field(value, "wind"),
        forecast,
    }
}

/// The `message` field of an upstream error body, if any.
pub fn error_message(body: Option<&Value>) -> Option<String> {
    body.and_then(|b| b.get("message"))
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str, timeout: Duration) -> GoWeatherClient {
        GoWeatherClient::new(&UpstreamConfig {
            base_url: base_url.to_string(),
            timeout,
        })
        .unwrap()
    }

    #[test]
    fn test_parse_observation_full() {
        let json = serde_json::json!({
            "temperature": "+31 °C",
            "wind": "15 km/h",
            "description": "Partly cloudy",
            "forecast": [
                {"day": "1", "temperature": "30 °C", "sky": "Light rain", "wind": "12 km/h"},
                {"day": "2", "temperature": "29 °C", "wind": "9 km/h"}
            ]
        });

        let raw = parse_observation(&json);
        assert_eq!(raw.temperature.as_deref(), Some("+31 °C"));
        assert_eq!(raw.wind.as_deref(), Some("15 km/h"));
        assert_eq!(raw.description.as_deref(), Some("Partly cloudy"));
        assert_eq!(raw.forecast.len(), 2);
        assert_eq!(raw.forecast[0].sky.as_deref(), Some("Light rain"));
        assert_eq!(raw.forecast[1].sky, None);
    }

    #[test]
    fn test_parse_observation_mistyped_fields() {
        let json = serde_json::json!({
            "temperature": 31,
            "description": null,
            "forecast": ["tomorrow", {"temperature": "30 °C"}]
        });

        let raw = parse_observation(&json);
        assert_eq!(raw.temperature, None);
        assert_eq!(raw.description, None);
        assert_eq!(raw.forecast.len(), 1);
        assert_eq!(raw.forecast[0].temperature.as_deref(), Some("30 °C"));
    }

    #[test]
    fn test_parse_observation_not_an_object() {
        assert_eq!(
            parse_observation(&serde_json::json!([1, 2, 3])),
            RawObservation::default()
        );
    }

    #[test]
    fn test_error_message() {
        let body = serde_json::json!({"message": "NOT_FOUND"});
        assert_eq!(error_message(Some(&body)).as_deref(), Some("NOT_FOUND"));
        assert_eq!(error_message(Some(&serde_json::json!({}))), None);
        assert_eq!(error_message(None), None);
    }

    #[test]
    fn test_city_url_encodes_name() {
        let client = client_for("https://goweather.example", Duration::from_secs(1));
        let url = client.city_url("Quezon City").unwrap();
        assert_eq!(url.as_str(), "https://goweather.example/weather/Quezon%20City");
    }

    #[test]
    fn test_city_url_keeps_base_path() {
        let client = client_for("https://proxy.example/api/", Duration::from_secs(1));
        let url = client.city_url("Cebu").unwrap();
        assert_eq!(url.as_str(), "https://proxy.example/api/weather/Cebu");
    }

    #[tokio::test]
    async fn test_fetch_city_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/Manila"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "temperature": "32 °C",
                "wind": "10 km/h",
                "description": "Sunny",
                "forecast": []
            })))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Duration::from_secs(5));
        match client.fetch_city("Manila").await.unwrap() {
            FetchOutcome::Found(raw) => {
                assert_eq!(raw.temperature.as_deref(), Some("32 °C"));
                assert_eq!(raw.description.as_deref(), Some("Sunny"));
            }
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_city_non_json_body_uses_defaults() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/Manila"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Duration::from_secs(5));
        match client.fetch_city("Manila").await.unwrap() {
            FetchOutcome::Found(raw) => assert_eq!(raw, RawObservation::default()),
            other => panic!("expected Found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_city_rejected() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/Atlantis"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "NOT_FOUND"})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Duration::from_secs(5));
        match client.fetch_city("Atlantis").await.unwrap() {
            FetchOutcome::Rejected { status, body } => {
                assert_eq!(status, StatusCode::NOT_FOUND);
                assert_eq!(body, Some(serde_json::json!({"message": "NOT_FOUND"})));
            }
            other => panic!("expected Rejected, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_fetch_city_timeout() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/weather/Manila"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({}))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri(), Duration::from_millis(50));
        let err = client.fetch_city("Manila").await.unwrap_err();
        assert!(matches!(err, AppError::UpstreamTimeout), "got {:?}", err);
    }

    #[tokio::test]
    async fn test_fetch_city_connection_refused() {
        // Bind then drop a listener so the port is known to be closed.
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let client = client_for(&format!("http://127.0.0.1:{}", port), Duration::from_secs(5));
        let err = client.fetch_city("Manila").await.unwrap_err();
        assert!(matches!(err, AppError::Network), "got {:?}", err);
    }
}
