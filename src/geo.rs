//! geo.rs — Great-circle distance via the haversine formula.
//!
//! Pure math, no validation: NaN coordinates propagate into the result (and
//! from there into the score), matching the reference behavior of trusting
//! pre-validated input.

use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometers.
const EARTH_RADIUS_KM: f64 = 6371.0;

/// A WGS84-ish point in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

/// Great-circle distance between two points, in kilometers.
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lon = (b.lon - a.lon).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + a.lat.to_radians().cos() * b.lat.to_radians().cos() * (d_lon / 2.0).sin().powi(2);

    2.0 * EARTH_RADIUS_KM * h.sqrt().asin()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn c(lat: f64, lon: f64) -> Coordinate {
        Coordinate { lat, lon }
    }

    #[test]
    fn zero_distance_to_self() {
        let p = c(50.087, 14.421);
        assert!(haversine_km(p, p).abs() < 1e-9);
    }

    #[test]
    fn symmetric() {
        let a = c(50.087, 14.421); // Prague
        let b = c(48.208, 16.373); // Vienna
        let ab = haversine_km(a, b);
        let ba = haversine_km(b, a);
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn known_city_pair_within_tolerance() {
        // Prague <-> Vienna is roughly 250 km as the crow flies.
        let d = haversine_km(c(50.087, 14.421), c(48.208, 16.373));
        assert!((240.0..260.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_latitude_is_about_111_km() {
        let d = haversine_km(c(0.0, 0.0), c(1.0, 0.0));
        assert!((d - 111.19).abs() < 0.5, "got {d}");
    }

    #[test]
    fn nan_propagates() {
        let d = haversine_km(c(f64::NAN, 0.0), c(0.0, 0.0));
        assert!(d.is_nan());
    }
}
