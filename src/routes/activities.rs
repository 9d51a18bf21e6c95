//! GET /activities?condition=Rain&temperature=29&location=Cebu

use axum::extract::Query;
use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, ErrorResponse};
use crate::services::activities::{recommend, Recommendation};

#[derive(Debug, Deserialize, IntoParams)]
pub struct ActivitiesQuery {
    /// Weather description or category, e.g. "Light rain"
    pub condition: Option<String>,
    /// Current temperature in °C
    pub temperature: Option<String>,
    /// Free-text location, e.g. "Makati, Metro Manila"
    pub location: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivityItem {
    pub activity: String,
    /// `true` for curated highlights of the requested location
    pub location_specific: bool,
}

impl From<Recommendation> for ActivityItem {
    fn from(r: Recommendation) -> Self {
        Self {
            activity: r.activity.to_string(),
            location_specific: r.location_specific,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ActivitiesResponse {
    pub success: bool,
    /// At most five suggestions, location highlights first
    pub recommendations: Vec<ActivityItem>,
}

/// Suggested activities for the current weather and location.
#[utoipa::path(
    get,
    path = "/activities",
    tag = "Activities",
    params(ActivitiesQuery),
    responses(
        (status = 200, description = "Up to five suggestions", body = ActivitiesResponse),
        (status = 400, description = "Missing or non-numeric temperature", body = ErrorResponse),
    )
)]
pub async fn get_activities(
    Query(params): Query<ActivitiesQuery>,
) -> Result<Json<ActivitiesResponse>, AppError> {
    let temperature = params
        .temperature
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing temperature parameter".to_string()))?
        .parse::<f64>()
        .ok()
        .filter(|t| t.is_finite())
        .ok_or_else(|| AppError::BadRequest("Invalid temperature parameter".to_string()))?;

    let recommendations = recommend(
        params.condition.as_deref().unwrap_or(""),
        temperature,
        params.location.as_deref().unwrap_or(""),
    );

    Ok(Json(ActivitiesResponse {
        success: true,
        recommendations: recommendations.into_iter().map(ActivityItem::from).collect(),
    }))
}

#[cfg(test)]
mod tests {
    use crate::routes::test_support::{app, get_json};
    use axum::http::StatusCode;

    // No upstream call is made, so the URL is never dialed.
    const UNUSED_UPSTREAM: &str = "http://127.0.0.1:9";

    #[tokio::test]
    async fn test_location_highlights_first() {
        let (status, body) = get_json(
            app(UNUSED_UPSTREAM),
            "/activities?condition=Clear&temperature=31&location=Baguio",
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[0]["activity"], "Burnham Park visit");
        assert_eq!(recs[0]["location_specific"], true);
    }

    #[tokio::test]
    async fn test_general_suggestions_without_location() {
        let (status, body) =
            get_json(app(UNUSED_UPSTREAM), "/activities?condition=Clouds&temperature=20").await;

        assert_eq!(status, StatusCode::OK);
        let names: Vec<&str> = body["recommendations"]
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["activity"].as_str().unwrap())
            .collect();
        assert_eq!(
            names,
            vec!["Sightseeing", "Park visits", "City tours", "Hot beverages", "Nature walks"]
        );
    }

    #[tokio::test]
    async fn test_temperature_required() {
        let (status, body) = get_json(app(UNUSED_UPSTREAM), "/activities?condition=Clear").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Missing temperature parameter");

        let (status, body) =
            get_json(app(UNUSED_UPSTREAM), "/activities?temperature=warm").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid temperature parameter");
    }
}
