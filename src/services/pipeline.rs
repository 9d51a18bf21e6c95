//! City lookup → upstream fetch → normalization → forecast synthesis.
//!
//! One upstream call per request, then purely in-memory work. Nothing is
//! shared between requests except the HTTP client's connection pool.

use chrono::{DateTime, Utc};
use rand::Rng;

use crate::config::UpstreamConfig;
use crate::errors::AppError;
use crate::services::forecast::{synthesize, ForecastSeries, SynthesisMode};
use crate::services::geo::{self, Coordinates};
use crate::services::goweather::{error_message, FetchOutcome, GoWeatherClient};
use crate::services::observation::{normalize, CanonicalObservation, RawObservation};
use crate::services::units::Units;

/// Current weather plus its synthesized forecast.
#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub observation: CanonicalObservation,
    pub forecast: ForecastSeries,
}

/// Which entry point a fetch belongs to; decides how a 404 is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LookupPath {
    City,
    Geo,
}

#[derive(Debug, Clone)]
pub struct WeatherPipeline {
    client: GoWeatherClient,
}

impl WeatherPipeline {
    pub fn new(config: &UpstreamConfig) -> Result<Self, AppError> {
        Ok(Self {
            client: GoWeatherClient::new(config)?,
        })
    }

    /// Fetch the upstream observation, mapping error statuses to `AppError`.
    async fn fetch(&self, city: &str, lookup: LookupPath) -> Result<RawObservation, AppError> {
        match self.client.fetch_city(city).await? {
            FetchOutcome::Found(raw) => Ok(raw),
            FetchOutcome::Rejected { status, body } => {
                if lookup == LookupPath::City && status == reqwest::StatusCode::NOT_FOUND {
                    return Err(AppError::CityNotFound {
                        city: city.to_string(),
                        details: body,
                    });
                }
                Err(AppError::UpstreamStatus {
                    status: status.as_u16(),
                    message: error_message(body.as_ref())
                        .unwrap_or_else(|| "Unknown error".to_string()),
                    details: body,
                })
            }
        }
    }

    /// Weather for a city given by name.
    pub async fn weather_by_city<R: Rng + Send>(
        &self,
        city: &str,
        units: Units,
        rng: &mut R,
    ) -> Result<WeatherReport, AppError> {
        let raw = self.fetch(city, LookupPath::City).await?;
        Ok(build_report(
            &raw,
            city,
            units,
            None,
            SynthesisMode::City,
            Utc::now(),
            rng,
        ))
    }

    /// Weather for the reference city nearest to `(lat, lon)`.
    ///
    /// The report keeps the caller's coordinates, not the reference city's.
    pub async fn weather_by_coords<R: Rng + Send>(
        &self,
        lat: f64,
        lon: f64,
        units: Units,
        rng: &mut R,
    ) -> Result<WeatherReport, AppError> {
        let city = geo::resolve(lat, lon);
        tracing::info!("Resolved ({}, {}) to {}", lat, lon, city.name);

        let raw = self.fetch(city.name, LookupPath::Geo).await?;
        Ok(build_report(
            &raw,
            city.name,
            units,
            Some(Coordinates { lat, lon }),
            SynthesisMode::Geo,
            Utc::now(),
            rng,
        ))
    }
}

/// Normalize and synthesize. Cannot fail once the upstream has answered.
fn build_report<R: Rng>(
    raw: &RawObservation,
    city: &str,
    units: Units,
    coordinates: Option<Coordinates>,
    mode: SynthesisMode,
    now: DateTime<Utc>,
    rng: &mut R,
) -> WeatherReport {
    let observation = normalize(raw, city, units, coordinates, now);
    let forecast = synthesize(&observation, &raw.forecast, mode, units, now, rng);
    WeatherReport {
        observation,
        forecast,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::conditions::ConditionCategory;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn pipeline_for(server: &MockServer) -> WeatherPipeline {
        WeatherPipeline::new(&UpstreamConfig {
            base_url: server.uri(),
            timeout: Duration::from_secs(5),
        })
        .unwrap()
    }

    async fn mount_manila(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/weather/Manila"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "description": "sunny",
                "temperature": "32°C",
                "wind": "10 km/h",
                "forecast": [
                    {"temperature": "31°C", "sky": "cloudy", "wind": "12 km/h"}
                ]
            })))
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_weather_by_city() {
        let server = MockServer::start().await;
        mount_manila(&server).await;

        let mut rng = StdRng::seed_from_u64(1);
        let report = pipeline_for(&server)
            .weather_by_city("Manila", Units::Metric, &mut rng)
            .await
            .unwrap();

        assert_eq!(report.observation.temperature, 32.0);
        assert_eq!(report.observation.condition.category, ConditionCategory::Clear);
        assert_eq!(report.observation.coordinates, None);
        assert_eq!(report.forecast.points.len(), 29);
        assert_eq!(
            report.forecast.points[24].condition.category,
            ConditionCategory::Clouds
        );
        assert_eq!(report.forecast.points[24].temperature, 31.0);
    }

    #[tokio::test]
    async fn test_weather_by_coords_resolves_nearest_city() {
        let server = MockServer::start().await;
        mount_manila(&server).await;

        let mut rng = StdRng::seed_from_u64(1);
        // Intramuros, a couple of km from the Manila reference point
        let report = pipeline_for(&server)
            .weather_by_coords(14.5896, 120.9747, Units::Imperial, &mut rng)
            .await
            .unwrap();

        assert_eq!(report.observation.location_name, "Manila");
        assert_eq!(
            report.observation.coordinates,
            Some(Coordinates { lat: 14.5896, lon: 120.9747 })
        );
        assert!((report.observation.temperature - 89.6).abs() < 1e-9);
        assert_eq!(report.forecast.points.len(), 13);
        assert_eq!(
            report.forecast.city.coordinates,
            Coordinates { lat: 14.5896, lon: 120.9747 }
        );
    }

    #[tokio::test]
    async fn test_city_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather/Atlantis"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let mut rng = StdRng::seed_from_u64(1);
        let err = pipeline_for(&server)
            .weather_by_city("Atlantis", Units::Metric, &mut rng)
            .await
            .unwrap_err();

        match err {
            AppError::CityNotFound { city, details } => {
                assert_eq!(city, "Atlantis");
                assert_eq!(details, None);
            }
            other => panic!("expected CityNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_geo_404_is_generic_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather/Manila"))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(serde_json::json!({"message": "NOT_FOUND"})),
            )
            .mount(&server)
            .await;

        let mut rng = StdRng::seed_from_u64(1);
        let err = pipeline_for(&server)
            .weather_by_coords(14.5995, 120.9842, Units::Metric, &mut rng)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API error: NOT_FOUND");
        assert_eq!(err.status(), axum::http::StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_upstream_server_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/weather/Cebu"))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let mut rng = StdRng::seed_from_u64(1);
        let err = pipeline_for(&server)
            .weather_by_city("Cebu", Units::Metric, &mut rng)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "API error: Unknown error");
        assert_eq!(err.status(), axum::http::StatusCode::SERVICE_UNAVAILABLE);
    }
}
