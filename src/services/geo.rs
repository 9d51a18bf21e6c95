//! Nearest reference city lookup.
//!
//! The upstream only answers by city name, so coordinates are snapped to the
//! closest of a fixed set of Philippine cities by great-circle distance.

use serde::Serialize;
use utoipa::ToSchema;

/// A latitude/longitude pair in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, ToSchema)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

/// A named lookup target for coordinate requests.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferenceCity {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl ReferenceCity {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Reference cities, in lookup order. Ties go to the earlier entry.
#[rustfmt::skip]
pub const REFERENCE_CITIES: [ReferenceCity; 10] = [
    ReferenceCity { name: "Manila", lat: 14.5995, lon: 120.9842 },
    ReferenceCity { name: "Cebu", lat: 10.3157, lon: 123.8854 },
    ReferenceCity { name: "Davao", lat: 7.1907, lon: 125.4553 },
    ReferenceCity { name: "Quezon City", lat: 14.6760, lon: 121.0437 },
    ReferenceCity { name: "Baguio", lat: 16.4023, lon: 120.5960 },
    ReferenceCity { name: "Iloilo", lat: 10.7202, lon: 122.5621 },
    ReferenceCity { name: "Zamboanga", lat: 6.9214, lon: 122.0790 },
    ReferenceCity { name: "Taguig", lat: 14.5243, lon: 121.0792 },
    ReferenceCity { name: "Cagayan de Oro", lat: 8.4542, lon: 124.6319 },
    ReferenceCity { name: "Bacolod", lat: 10.6713, lon: 122.9511 },
];

/// Great-circle distance in km (Earth radius 6371 km) between two points
/// given in degrees.
pub fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    haversine::distance(
        haversine::Location {
            latitude: lat1,
            longitude: lon1,
        },
        haversine::Location {
            latitude: lat2,
            longitude: lon2,
        },
        haversine::Units::Kilometers,
    )
}

/// The reference city nearest to `(lat, lon)`.
///
/// Strict `<` keeps the first city on ties, and a NaN distance never wins,
/// so non-finite input resolves to the first city (Manila).
pub fn resolve(lat: f64, lon: f64) -> ReferenceCity {
    let mut nearest = REFERENCE_CITIES[0];
    let mut min_distance = f64::MAX;
    for city in REFERENCE_CITIES {
        let distance = haversine_km(lat, lon, city.lat, city.lon);
        if distance < min_distance {
            min_distance = distance;
            nearest = city;
        }
    }
    nearest
}

/// Coordinates of the reference city named `name` (case-insensitive),
/// or Manila's when there is no such city.
pub fn coordinates_for_name(name: &str) -> Coordinates {
    let name = name.trim();
    REFERENCE_CITIES
        .iter()
        .find(|c| c.name.eq_ignore_ascii_case(name))
        .unwrap_or(&REFERENCE_CITIES[0])
        .coordinates()
}
