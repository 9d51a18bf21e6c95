//! Weather HTTP endpoints.
//!
//! - GET /weather?city=Manila&units=metric
//! - GET /weather/geo?lat=14.6&lon=121.0&units=imperial
//!
//! Responses keep the OpenWeatherMap-style field names existing clients read
//! (`weatherData.main.temp`, `forecastData.list[].dt_txt`, ...).

use axum::extract::{Query, State};
use axum::Json;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, ErrorResponse};
use crate::helpers::PH_UTC_OFFSET_SECS;
use crate::routes::AppState;
use crate::services::forecast::{ForecastCity, ForecastPoint, ForecastSeries};
use crate::services::geo::Coordinates;
use crate::services::observation::{CanonicalObservation, Condition};
use crate::services::pipeline::WeatherReport;
use crate::services::units::Units;

/// `cod` reported on every successful observation.
const SUCCESS_CODE: u16 = 200;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, IntoParams)]
pub struct CityQuery {
    /// City name (defaults to the configured city, normally "Manila")
    pub city: Option<String>,
    /// "imperial" for °F and mph; anything else is metric
    pub units: Option<String>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct GeoQuery {
    /// Latitude in degrees
    pub lat: Option<String>,
    /// Longitude in degrees
    pub lon: Option<String>,
    /// "imperial" for °F and mph; anything else is metric
    pub units: Option<String>,
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherCondition {
    /// Condition category, e.g. "Clouds"
    pub main: String,
    pub description: String,
    /// Icon code, e.g. "02d"
    pub icon: String,
}

impl From<&Condition> for WeatherCondition {
    fn from(c: &Condition) -> Self {
        Self {
            main: c.category.as_str().to_string(),
            description: c.description.clone(),
            icon: c.icon_code.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MainReadings {
    pub temp: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    /// Relative humidity, %
    pub humidity: u8,
    /// hPa
    pub pressure: u16,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Wind {
    /// km/h (metric) or the imperial-scaled value
    pub speed: f64,
    /// Direction in degrees. Forecast entries only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deg: Option<u16>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Clouds {
    /// Cloud cover, %
    pub all: u8,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Sys {
    pub country: String,
}

/// Current weather.
#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherData {
    pub name: String,
    pub sys: Sys,
    pub weather: Vec<WeatherCondition>,
    pub main: MainReadings,
    pub wind: Wind,
    pub clouds: Clouds,
    /// Metres
    pub visibility: u32,
    /// Unix seconds (fractional)
    pub dt: f64,
    /// Offset from UTC in seconds
    pub timezone: i32,
    pub cod: u16,
    /// Requested coordinates. Coordinate lookups only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub coord: Option<Coordinates>,
}

impl WeatherData {
    pub fn from_observation(o: &CanonicalObservation) -> Self {
        Self {
            name: o.location_name.clone(),
            sys: Sys {
                country: o.country_code.to_string(),
            },
            weather: vec![WeatherCondition::from(&o.condition)],
            main: MainReadings {
                temp: o.temperature,
                feels_like: o.feels_like,
                temp_min: o.temp_min,
                temp_max: o.temp_max,
                humidity: o.humidity_pct,
                pressure: o.pressure_hpa,
            },
            wind: Wind {
                speed: o.wind_speed,
                deg: None,
            },
            clouds: Clouds { all: o.cloud_pct },
            visibility: o.visibility_m,
            dt: o.timestamp_unix,
            timezone: PH_UTC_OFFSET_SECS,
            cod: SUCCESS_CODE,
            coord: o.coordinates,
        }
    }
}

/// One forecast list entry.
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastEntry {
    /// Unix seconds (fractional)
    pub dt: f64,
    pub main: MainReadings,
    pub weather: Vec<WeatherCondition>,
    pub clouds: Clouds,
    pub wind: Wind,
    /// ISO 8601 UTC with milliseconds
    pub dt_txt: String,
}

impl From<&ForecastPoint> for ForecastEntry {
    fn from(p: &ForecastPoint) -> Self {
        Self {
            dt: p.timestamp_unix,
            main: MainReadings {
                temp: p.temperature,
                feels_like: p.feels_like,
                temp_min: p.temp_min,
                temp_max: p.temp_max,
                humidity: p.humidity_pct,
                pressure: p.pressure_hpa,
            },
            weather: vec![WeatherCondition::from(&p.condition)],
            clouds: Clouds { all: p.cloud_pct },
            wind: Wind {
                speed: p.wind_speed,
                deg: Some(p.wind_deg),
            },
            dt_txt: p.iso_time.clone(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastCityInfo {
    pub name: String,
    pub coord: Coordinates,
    pub country: String,
    /// Unix seconds
    pub sunrise: i64,
    /// Unix seconds
    pub sunset: i64,
}

impl From<&ForecastCity> for ForecastCityInfo {
    fn from(c: &ForecastCity) -> Self {
        Self {
            name: c.name.clone(),
            coord: c.coordinates,
            country: c.country.to_string(),
            sunrise: c.sunrise_unix,
            sunset: c.sunset_unix,
        }
    }
}

/// Short-interval entries followed by five daily entries at local noon.
#[derive(Debug, Serialize, ToSchema)]
pub struct ForecastData {
    pub list: Vec<ForecastEntry>,
    pub city: ForecastCityInfo,
}

impl ForecastData {
    pub fn from_series(series: &ForecastSeries) -> Self {
        Self {
            list: series.points.iter().map(ForecastEntry::from).collect(),
            city: ForecastCityInfo::from(&series.city),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherResponse {
    /// Always `true`
    pub success: bool,
    #[serde(rename = "weatherData")]
    pub weather_data: WeatherData,
    #[serde(rename = "forecastData")]
    pub forecast_data: ForecastData,
}

impl From<WeatherReport> for WeatherResponse {
    fn from(report: WeatherReport) -> Self {
        Self {
            success: true,
            weather_data: WeatherData::from_observation(&report.observation),
            forecast_data: ForecastData::from_series(&report.forecast),
        }
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// Parse the `lat`/`lon` query values.
fn parse_coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<(f64, f64), AppError> {
    let (lat, lon) = match (
        lat.map(str::trim).filter(|v| !v.is_empty()),
        lon.map(str::trim).filter(|v| !v.is_empty()),
    ) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(AppError::BadRequest(
                "Missing latitude or longitude parameters".to_string(),
            ))
        }
    };

    match (lat.parse::<f64>(), lon.parse::<f64>()) {
        (Ok(lat), Ok(lon)) if lat.is_finite() && lon.is_finite() => Ok((lat, lon)),
        _ => Err(AppError::BadRequest(
            "Invalid latitude or longitude parameters".to_string(),
        )),
    }
}

/// Current weather and forecast for a Philippine city.
#[utoipa::path(
    get,
    path = "/weather",
    tag = "Weather",
    params(CityQuery),
    responses(
        (status = 200, description = "Current weather and synthesized forecast", body = WeatherResponse),
        (status = 404, description = "Unknown city", body = ErrorResponse),
        (status = 500, description = "Upstream timeout, network or API error", body = ErrorResponse),
    )
)]
pub async fn get_weather_by_city(
    State(state): State<AppState>,
    Query(params): Query<CityQuery>,
) -> Result<Json<WeatherResponse>, AppError> {
    let city = params
        .city
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .unwrap_or(state.default_city.as_str());
    let units = Units::from_param(params.units.as_deref());

    let mut rng = StdRng::from_entropy();
    let report = state.pipeline.weather_by_city(city, units, &mut rng).await?;
    Ok(Json(WeatherResponse::from(report)))
}

/// Current weather and forecast for the reference city nearest to a point.
///
/// The response's `coord` fields echo the requested coordinates, not those of
/// the city that was looked up.
#[utoipa::path(
    get,
    path = "/weather/geo",
    tag = "Weather",
    params(GeoQuery),
    responses(
        (status = 200, description = "Current weather and synthesized forecast", body = WeatherResponse),
        (status = 400, description = "Missing or invalid coordinates", body = ErrorResponse),
        (status = 500, description = "Upstream timeout, network or API error", body = ErrorResponse),
    )
)]
pub async fn get_weather_by_coords(
    State(state): State<AppState>,
    Query(params): Query<GeoQuery>,
) -> Result<Json<WeatherResponse>, AppError> {
    let (lat, lon) = parse_coordinates(params.lat.as_deref(), params.lon.as_deref())?;
    let units = Units::from_param(params.units.as_deref());

    let mut rng = StdRng::from_entropy();
    let report = state
        .pipeline
        .weather_by_coords(lat, lon, units, &mut rng)
        .await?;
    Ok(Json(WeatherResponse::from(report)))
}
