//! Unit handling for the upstream's string-encoded temperature and wind fields.
//!
//! The upstream reports values like `"28 °C"` or `"15 km/h"`. Only the digits
//! are kept; anything without digits falls back to a fixed default.

/// Temperature used when the upstream value has no digits.
const DEFAULT_TEMPERATURE: &str = "28";
/// Wind speed used when the upstream value has no digits.
const DEFAULT_WIND_SPEED: &str = "10";
/// Scalar applied to wind speed for imperial output (the m/s→mph factor,
/// applied to the km/h figure as-is).
const IMPERIAL_WIND_FACTOR: f64 = 2.237;

/// Unit system requested by the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Units {
    Metric,
    Imperial,
}

impl Units {
    /// Parse the `units` query parameter. Only `imperial` selects imperial;
    /// anything else (including absence) is metric.
    pub fn from_param(param: Option<&str>) -> Self {
        match param {
            Some("imperial") => Units::Imperial,
            _ => Units::Metric,
        }
    }
}

/// Keep only ASCII digits, substituting `default` when none remain.
fn digits_or(raw: Option<&str>, default: &str) -> f64 {
    let digits: String = raw
        .unwrap_or_default()
        .chars()
        .filter(char::is_ascii_digit)
        .collect();
    let digits = if digits.is_empty() {
        default
    } else {
        digits.as_str()
    };
    digits.parse().unwrap_or_default()
}

/// Temperature in the requested units. The upstream value is read as Celsius.
pub fn parse_temperature(raw: Option<&str>, units: Units) -> f64 {
    let celsius = digits_or(raw, DEFAULT_TEMPERATURE);
    match units {
        Units::Imperial => celsius * 9.0 / 5.0 + 32.0,
        Units::Metric => celsius,
    }
}

/// Wind speed in the requested units.
pub fn parse_wind_speed(raw: Option<&str>, units: Units) -> f64 {
    let speed = digits_or(raw, DEFAULT_WIND_SPEED);
    match units {
        Units::Imperial => speed * IMPERIAL_WIND_FACTOR,
        Units::Metric => speed,
    }
}
