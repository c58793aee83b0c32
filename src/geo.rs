//! Geographic primitives: the `Position` value and great-circle distance.

use crate::config::EARTH_RADIUS_M;
use serde::{Deserialize, Serialize};

/// A geographic fix in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

#[inline]
pub fn to_radians(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}

/// Great-circle distance between two fixes on a spherical Earth, in metres.
///
/// Uses the haversine formula with the mean Earth radius. The result is
/// always `>= 0` and exactly `0.0` for identical positions. Inputs are not
/// validated; non-finite coordinates propagate as NaN.
pub fn haversine_distance_meters(a: &Position, b: &Position) -> f64 {
    let d_lat = to_radians(b.latitude - a.latitude);
    let d_lon = to_radians(b.longitude - a.longitude);

    let h = (d_lat / 2.0).sin().powi(2)
        + to_radians(a.latitude).cos() * to_radians(b.latitude).cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    const WESTMINSTER: Position = Position::new(51.5007, -0.1246);
    const PARIS: Position = Position::new(48.8566, 2.3522);

    #[test]
    fn identical_positions_are_zero_apart() {
        for p in [WESTMINSTER, PARIS, Position::new(0.0, 0.0), Position::new(-89.9, 179.9)] {
            assert_eq!(haversine_distance_meters(&p, &p), 0.0);
        }
    }

    #[test]
    fn distance_is_symmetric() {
        let pairs = [
            (WESTMINSTER, PARIS),
            (Position::new(0.0, 0.0), Position::new(0.001, 0.0)),
            (Position::new(-33.8688, 151.2093), Position::new(35.6762, 139.6503)),
        ];
        for (a, b) in pairs {
            assert_eq!(haversine_distance_meters(&a, &b), haversine_distance_meters(&b, &a));
        }
    }

    #[test]
    fn london_to_paris() {
        let d = haversine_distance_meters(&WESTMINSTER, &PARIS);
        assert!((d - 343_556.0).abs() <= 1_000.0, "got {d}");
    }

    #[test]
    fn thousandth_of_a_degree_at_the_equator() {
        let d = haversine_distance_meters(&Position::new(0.0, 0.0), &Position::new(0.001, 0.0));
        assert!((d - 111.19).abs() <= 0.5, "got {d}");
    }

    #[test]
    fn antipodes_are_half_the_circumference_apart() {
        let d = haversine_distance_meters(&Position::new(0.0, 0.0), &Position::new(0.0, 180.0));
        assert!((d - std::f64::consts::PI * EARTH_RADIUS_M).abs() < 1e-6);
    }
}
