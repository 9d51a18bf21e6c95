//! Synthetic forecast series.
//!
//! Expands one canonical observation into a forecast list in two phases:
//!
//! - **Phase A**: short-interval points interpolated from the observation.
//!   City lookups get 24 hourly points with a time-of-day temperature curve;
//!   coordinate lookups get 8 three-hourly points with flat ±1 jitter.
//! - **Phase B**: 5 daily points pinned to local noon. The first ones come
//!   from the upstream's short outlook (at most 3 days); the rest repeat the
//!   current condition with wider jitter.
//!
//! All randomness comes from the caller's `Rng`, so a seeded generator gives
//! a reproducible series.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::helpers::{at_local_hour, iso_millis, local_hour, unix_seconds};
use crate::services::geo::{self, Coordinates};
use crate::services::observation::{
    describe, CanonicalObservation, Condition, RawForecastDay, TemperatureBand, COUNTRY_CODE,
    DEFAULT_HUMIDITY_PCT, DEFAULT_PRESSURE_HPA,
};
use crate::services::units::{parse_wind_speed, Units};

/// Hourly points generated for city lookups.
const CITY_HOURLY_POINTS: i64 = 24;
/// Points generated for coordinate lookups.
const GEO_INTERVAL_POINTS: i64 = 8;
/// Spacing of coordinate-lookup points, in hours.
const GEO_INTERVAL_HOURS: i64 = 3;
/// Daily points in every series.
const DAILY_POINTS: usize = 5;
/// Upstream outlook days used at most.
const MAX_UPSTREAM_DAYS: usize = 3;
/// Local hour daily points are pinned to.
const DAILY_POINT_HOUR: u32 = 12;
/// Placeholder sunrise, local hour. Not derived from date or location.
pub const SUNRISE_HOUR: u32 = 6;
/// Placeholder sunset, local hour. Not derived from date or location.
pub const SUNSET_HOUR: u32 = 18;

/// Half-width of the temperature jitter on coordinate-lookup points.
const GEO_TEMP_JITTER: f64 = 1.0;
/// Half-width of the temperature/feels-like jitter on padded days.
const PADDED_TEMP_JITTER: f64 = 2.5;
/// Half-width of the min/max jitter on padded days.
const PADDED_RANGE_JITTER: f64 = 1.5;
/// Half-width of the wind speed jitter on synthetic points.
const WIND_JITTER: f64 = 1.0;
/// Humidity jitter is `0..HUMIDITY_JITTER_MAX` added to the default.
const HUMIDITY_JITTER_MAX: u8 = 10;

/// Which lookup produced the observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisMode {
    /// Lookup by city name: 24 hourly points with the diurnal curve.
    City,
    /// Lookup by coordinates: 8 three-hourly points with flat jitter.
    Geo,
}

/// One entry of the forecast list.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastPoint {
    pub timestamp_unix: f64,
    pub iso_time: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity_pct: u8,
    pub pressure_hpa: u16,
    pub condition: Condition,
    pub cloud_pct: u8,
    pub wind_speed: f64,
    /// Always in `0..360`
    pub wind_deg: u16,
}

/// Location metadata attached to a series.
#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCity {
    pub name: String,
    pub coordinates: Coordinates,
    pub country: &'static str,
    pub sunrise_unix: i64,
    pub sunset_unix: i64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastSeries {
    /// Phase A points, then Phase B points, each in chronological order.
    pub points: Vec<ForecastPoint>,
    pub city: ForecastCity,
}

/// Temperature adjustment band for a local hour, as `(base, spread)`.
/// The adjustment is drawn from `base + U(0, spread)`.
pub fn diurnal_band(hour: u32) -> (f64, f64) {
    match hour {
        0..=5 => (-2.0, 1.0),  // night
        6..=11 => (-1.0, 2.0), // morning
        12..=17 => (0.0, 3.0), // afternoon
        _ => (-1.0, 1.0),      // evening
    }
}

/// Random temperature adjustment for a local hour.
pub fn diurnal_adjustment<R: Rng>(hour: u32, rng: &mut R) -> f64 {
    let (base, spread) = diurnal_band(hour);
    base + rng.gen_range(0.0..spread)
}

fn symmetric<R: Rng>(rng: &mut R, half_width: f64) -> f64 {
    rng.gen_range(-half_width..half_width)
}

fn jittered_humidity<R: Rng>(rng: &mut R) -> u8 {
    DEFAULT_HUMIDITY_PCT + rng.gen_range(0..HUMIDITY_JITTER_MAX)
}

/// A point that copies the observation's condition with the given
/// temperature values and fresh humidity/wind jitter.
fn synthetic_point<R: Rng>(
    observation: &CanonicalObservation,
    time: DateTime<Utc>,
    band: TemperatureBand,
    rng: &mut R,
) -> ForecastPoint {
    ForecastPoint {
        timestamp_unix: unix_seconds(time),
        iso_time: iso_millis(time),
        temperature: band.temperature,
        feels_like: band.feels_like,
        temp_min: band.temp_min,
        temp_max: band.temp_max,
        humidity_pct: jittered_humidity(rng),
        pressure_hpa: DEFAULT_PRESSURE_HPA,
        condition: observation.condition.clone(),
        cloud_pct: observation.cloud_pct,
        wind_speed: observation.wind_speed + symmetric(rng, WIND_JITTER),
        wind_deg: rng.gen_range(0..360),
    }
}

/// Phase A for city lookups: hourly, following the diurnal curve.
/// Temperature and feels-like share the same adjustment.
fn hourly_points<R: Rng>(
    observation: &CanonicalObservation,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    (0..CITY_HOURLY_POINTS)
        .map(|offset| {
            let time = now + Duration::hours(offset);
            let adjustment = diurnal_adjustment(local_hour(time), rng);
            let band = TemperatureBand {
                temperature: observation.temperature + adjustment,
                feels_like: observation.feels_like + adjustment,
                ..observation.temperature_band()
            };
            synthetic_point(observation, time, band, rng)
        })
        .collect()
}

/// Phase A for coordinate lookups: three-hourly, flat independent jitter.
fn interval_points<R: Rng>(
    observation: &CanonicalObservation,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    (0..GEO_INTERVAL_POINTS)
        .map(|i| {
            let time = now + Duration::hours(i * GEO_INTERVAL_HOURS);
            let band = TemperatureBand {
                temperature: observation.temperature + symmetric(rng, GEO_TEMP_JITTER),
                feels_like: observation.feels_like + symmetric(rng, GEO_TEMP_JITTER),
                ..observation.temperature_band()
            };
            synthetic_point(observation, time, band, rng)
        })
        .collect()
}

/// Local noon `days_ahead` days after `now`.
fn daily_time(now: DateTime<Utc>, days_ahead: usize) -> DateTime<Utc> {
    at_local_hour(now + Duration::days(days_ahead as i64), DAILY_POINT_HOUR)
}

/// Phase B point from one upstream outlook day.
fn upstream_day_point<R: Rng>(
    day: &RawForecastDay,
    time: DateTime<Utc>,
    units: Units,
    rng: &mut R,
) -> ForecastPoint {
    let band = TemperatureBand::parse(day.temperature.as_deref(), units);
    let (condition, cloud_pct) = describe(day.sky.as_deref());
    ForecastPoint {
        timestamp_unix: unix_seconds(time),
        iso_time: iso_millis(time),
        temperature: band.temperature,
        feels_like: band.feels_like,
        temp_min: band.temp_min,
        temp_max: band.temp_max,
        humidity_pct: jittered_humidity(rng),
        pressure_hpa: DEFAULT_PRESSURE_HPA,
        condition,
        cloud_pct,
        wind_speed: parse_wind_speed(day.wind.as_deref(), units),
        wind_deg: rng.gen_range(0..360),
    }
}

/// Phase B: upstream days first, then padding up to `DAILY_POINTS`.
fn daily_points<R: Rng>(
    observation: &CanonicalObservation,
    raw_days: &[RawForecastDay],
    units: Units,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<ForecastPoint> {
    let upstream_days = &raw_days[..raw_days.len().min(MAX_UPSTREAM_DAYS)];
    let mut points = Vec::with_capacity(DAILY_POINTS);

    for (index, day) in upstream_days.iter().enumerate() {
        points.push(upstream_day_point(day, daily_time(now, index + 1), units, rng));
    }

    for days_ahead in (upstream_days.len() + 1)..=DAILY_POINTS {
        let band = TemperatureBand {
            temperature: observation.temperature + symmetric(rng, PADDED_TEMP_JITTER),
            feels_like: observation.feels_like + symmetric(rng, PADDED_TEMP_JITTER),
            temp_min: observation.temp_min + symmetric(rng, PADDED_RANGE_JITTER),
            temp_max: observation.temp_max + symmetric(rng, PADDED_RANGE_JITTER),
        };
        points.push(synthetic_point(
            observation,
            daily_time(now, days_ahead),
            band,
            rng,
        ));
    }

    points
}

/// Build the full series for `observation` as of `now`.
///
/// The series city uses the observation's coordinates when present, else the
/// reference city matching its name (Manila when none does).
pub fn synthesize<R: Rng>(
    observation: &CanonicalObservation,
    raw_days: &[RawForecastDay],
    mode: SynthesisMode,
    units: Units,
    now: DateTime<Utc>,
    rng: &mut R,
) -> ForecastSeries {
    let mut points = match mode {
        SynthesisMode::City => hourly_points(observation, now, rng),
        SynthesisMode::Geo => interval_points(observation, now, rng),
    };
    points.extend(daily_points(observation, raw_days, units, now, rng));

    let city = ForecastCity {
        name: observation.location_name.clone(),
        coordinates: observation
            .coordinates
            .unwrap_or_else(|| geo::coordinates_for_name(&observation.location_name)),
        country: COUNTRY_CODE,
        sunrise_unix: at_local_hour(now, SUNRISE_HOUR).timestamp(),
        sunset_unix: at_local_hour(now, SUNSET_HOUR).timestamp(),
    };

    ForecastSeries { points, city }
}
