//! Upstream observation types and normalization.
//!
//! The upstream returns a handful of loosely formatted strings. Normalizing
//! fills in everything else from fixed offsets and defaults, so the output
//! looks like a full current-weather record. The derived values are display
//! heuristics, not meteorology.

use chrono::{DateTime, Utc};

use crate::helpers::unix_seconds;
use crate::services::conditions::{self, ConditionCategory, DEFAULT_DESCRIPTION};
use crate::services::geo::Coordinates;
use crate::services::units::{parse_temperature, parse_wind_speed, Units};

/// Country code of every observation.
pub const COUNTRY_CODE: &str = "PH";
/// Relative humidity reported when the upstream has none (always).
pub const DEFAULT_HUMIDITY_PCT: u8 = 70;
/// Pressure reported when the upstream has none (always).
pub const DEFAULT_PRESSURE_HPA: u16 = 1013;
/// Visibility reported for every observation, in metres.
pub const DEFAULT_VISIBILITY_M: u32 = 10_000;

const FEELS_LIKE_OFFSET: f64 = -2.0;
const TEMP_MIN_OFFSET: f64 = -3.0;
const TEMP_MAX_OFFSET: f64 = 2.0;

/// One day of the upstream's short outlook.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawForecastDay {
    pub temperature: Option<String>,
    pub sky: Option<String>,
    pub wind: Option<String>,
}

/// The upstream payload. Every field may be missing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawObservation {
    pub description: Option<String>,
    pub temperature: Option<String>,
    pub wind: Option<String>,
    pub forecast: Vec<RawForecastDay>,
}

/// Weather condition as shown to clients.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub category: ConditionCategory,
    pub description: String,
    pub icon_code: String,
}

/// Temperature and its derived companions, in the requested units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemperatureBand {
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
}

impl TemperatureBand {
    /// Derive feels-like, min and max from fixed offsets.
    pub fn from_temperature(temperature: f64) -> Self {
        Self {
            temperature,
            feels_like: temperature + FEELS_LIKE_OFFSET,
            temp_min: temperature + TEMP_MIN_OFFSET,
            temp_max: temperature + TEMP_MAX_OFFSET,
        }
    }

    /// Parse an upstream temperature string and derive the band.
    pub fn parse(raw: Option<&str>, units: Units) -> Self {
        Self::from_temperature(parse_temperature(raw, units))
    }
}

/// Normalized current weather for one location.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalObservation {
    pub location_name: String,
    pub country_code: &'static str,
    pub condition: Condition,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u16,
    pub wind_speed: f64,
    pub cloud_pct: u8,
    pub visibility_m: u32,
    /// Present on the coordinate path only.
    pub coordinates: Option<Coordinates>,
    pub timestamp_unix: f64,
}

impl CanonicalObservation {
    pub fn temperature_band(&self) -> TemperatureBand {
        TemperatureBand {
            temperature: self.temperature,
            feels_like: self.feels_like,
            temp_min: self.temp_min,
            temp_max: self.temp_max,
        }
    }
}

/// Classify a free-text description into a condition and a cloud estimate.
/// Day icons are always used.
pub fn describe(description: Option<&str>) -> (Condition, u8) {
    let description = description.filter(|d| !d.is_empty());
    let classification = conditions::classify(description, true);
    let condition = Condition {
        category: classification.category,
        description: description.unwrap_or(DEFAULT_DESCRIPTION).to_string(),
        icon_code: classification.icon_code,
    };
    (condition, classification.cloud_pct)
}

/// Turn one upstream observation into a canonical record stamped `now`.
pub fn normalize(
    raw: &RawObservation,
    city_name: &str,
    units: Units,
    coordinates: Option<Coordinates>,
    now: DateTime<Utc>,
) -> CanonicalObservation {
    let band = TemperatureBand::parse(raw.temperature.as_deref(), units);
    let (condition, cloud_pct) = describe(raw.description.as_deref());

    CanonicalObservation {
        location_name: city_name.to_string(),
        country_code: COUNTRY_CODE,
        condition,
        temperature: band.temperature,
        feels_like: band.feels_like,
        temp_min: band.temp_min,
        temp_max: band.temp_max,
        humidity_pct: DEFAULT_HUMIDITY_PCT,
        pressure_hpa: DEFAULT_PRESSURE_HPA,
        wind_speed: parse_wind_speed(raw.wind.as_deref(), units),
        cloud_pct,
        visibility_m: DEFAULT_VISIBILITY_M,
        coordinates,
        timestamp_unix: unix_seconds(now),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(description: &str, temperature: &str, wind: &str) -> RawObservation {
        RawObservation {
            description: Some(description.to_string()),
            temperature: Some(temperature.to_string()),
            wind: Some(wind.to_string()),
            forecast: vec![],
        }
    }

    fn now() -> DateTime<Utc> {
        "2026-03-01T04:00:00Z".parse().unwrap()
    }

    #[test]
    fn test_clear_sky_metric() {
        let obs = normalize(
            &raw("clear sky", "30°C", "10 km/h"),
            "Manila",
            Units::Metric,
            None,
            now(),
        );
        assert_eq!(obs.condition.category, ConditionCategory::Clear);
        assert_eq!(obs.condition.description, "clear sky");
        assert_eq!(obs.condition.icon_code, "01d");
        assert_eq!(obs.temperature, 30.0);
    }

    #[test]
    fn test_fixed_offsets_and_defaults() {
        let obs = normalize(
            &raw("Light rain", "+25 °C", "12 km/h"),
            "Cebu",
            Units::Metric,
            None,
            now(),
        );
        assert_eq!(obs.location_name, "Cebu");
        assert_eq!(obs.country_code, "PH");
        assert_eq!(obs.feels_like, 23.0);
        assert_eq!(obs.temp_min, 22.0);
        assert_eq!(obs.temp_max, 27.0);
        assert_eq!(obs.humidity_pct, 70);
        assert_eq!(obs.pressure_hpa, 1013);
        assert_eq!(obs.visibility_m, 10_000);
        assert_eq!(obs.wind_speed, 12.0);
        assert_eq!(obs.cloud_pct, 0);
        assert_eq!(obs.timestamp_unix, 1772337600.0);
    }

    #[test]
    fn test_offsets_apply_after_unit_conversion() {
        let obs = normalize(
            &raw("Sunny", "30 °C", "10 km/h"),
            "Manila",
            Units::Imperial,
            None,
            now(),
        );
        assert!((obs.temperature - 86.0).abs() < 1e-9);
        assert!((obs.feels_like - 84.0).abs() < 1e-9);
        assert!((obs.temp_min - 83.0).abs() < 1e-9);
        assert!((obs.temp_max - 88.0).abs() < 1e-9);
    }

    #[test]
    fn test_empty_payload_uses_defaults() {
        let obs = normalize(
            &RawObservation::default(),
            "Davao",
            Units::Metric,
            Some(Coordinates { lat: 7.0, lon: 125.0 }),
            now(),
        );
        assert_eq!(obs.temperature, 28.0);
        assert_eq!(obs.wind_speed, 10.0);
        assert_eq!(obs.condition.category, ConditionCategory::Clear);
        assert_eq!(obs.condition.description, "Clear sky");
        assert_eq!(obs.coordinates, Some(Coordinates { lat: 7.0, lon: 125.0 }));
    }

    #[test]
    fn test_describe_empty_string_defaults() {
        let (condition, cloud) = describe(Some(""));
        assert_eq!(condition.description, "Clear sky");
        assert_eq!(condition.icon_code, "01d");
        assert_eq!(cloud, 0);
    }
}
