//! HTTP layer.
//!
//! - GET /weather?city=&units=
//! - GET /weather/geo?lat=&lon=&units=
//! - GET /activities?condition=&temperature=&location=
//! - GET /health

use axum::routing::get;
use axum::Router;

use crate::services::pipeline::WeatherPipeline;

pub mod activities;
pub mod health;
pub mod weather;

/// Shared application state.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) pipeline: WeatherPipeline,
    /// City served by `/weather` without a `city` parameter.
    pub(crate) default_city: String,
    /// Upstream base URL, reported by `/health`.
    pub(crate) upstream_url: String,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(weather::get_weather_by_city))
        .route("/weather/geo", get(weather::get_weather_by_coords))
        .route("/activities", get(activities::get_activities))
        .route("/health", get(health::health_check))
        .with_state(state)
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;
    use crate::config::UpstreamConfig;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    pub(crate) fn app(upstream_url: &str) -> Router {
        app_with_timeout(upstream_url, Duration::from_secs(5))
    }

    pub(crate) fn app_with_timeout(upstream_url: &str, timeout: Duration) -> Router {
        let upstream = UpstreamConfig {
            base_url: upstream_url.to_string(),
            timeout,
        };
        router(AppState {
            pipeline: WeatherPipeline::new(&upstream).unwrap(),
            default_city: "Manila".to_string(),
            upstream_url: upstream.base_url,
        })
    }

    /// Send a GET and return the status with the parsed JSON body.
    pub(crate) async fn get_json(app: Router, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }
}
