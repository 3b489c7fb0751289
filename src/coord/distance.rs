//! Great-circle distance
//!
//! Spherical haversine against a fixed Earth radius. Good to a fraction of a
//! percent at poster scales, which is all the radius needs.

use crate::constants::geo::EARTH_RADIUS_METERS;
use crate::coord::{Coordinates, MapViewport};

/// Calculate the distance between two points in meters (Haversine formula)
pub fn haversine_distance(p1: Coordinates, p2: Coordinates) -> f64 {
    let lat1 = p1.lat.to_radians();
    let lat2 = p2.lat.to_radians();
    let delta_lat = (p2.lat - p1.lat).to_radians();
    let delta_lng = (p2.lng - p1.lng).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1.cos() * lat2.cos() * (delta_lng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_METERS * c
}

/// Poster radius for a viewport, in whole meters
///
/// Measured from the center to the north edge along the center's meridian,
/// i.e. half the visible vertical extent. Always derived from the viewport
/// it is given; nothing carries over between calls.
pub fn viewport_radius(viewport: &MapViewport) -> u32 {
    let edge = Coordinates::new(viewport.bounds.north(), viewport.center.lng);
    haversine_distance(viewport.center, edge).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::LatLngBounds;
    use approx::assert_abs_diff_eq;

    fn viewport(center: Coordinates, north: f64) -> MapViewport {
        MapViewport {
            center,
            zoom: 10,
            bounds: LatLngBounds::new(
                Coordinates::new(north, center.lng + 1.0),
                Coordinates::new(2.0 * center.lat - north, center.lng - 1.0),
            ),
        }
    }

    #[test]
    fn test_haversine_distance() {
        // One degree of latitude is roughly 111 km
        let nyc = Coordinates::new(40.7128, -74.0060);
        let nearby = Coordinates::new(41.7128, -74.0060);

        let distance = haversine_distance(nyc, nearby);
        assert!(
            (distance - 111_000.0).abs() < 1000.0,
            "Distance {} should be approximately 111000",
            distance
        );
    }

    #[test]
    fn test_haversine_zero() {
        let p = Coordinates::new(48.8566, 2.3522);
        assert_eq!(haversine_distance(p, p), 0.0);
    }

    #[test]
    fn test_radius_at_equator() {
        let center = Coordinates::new(0.0, 0.0);
        let expected = haversine_distance(center, Coordinates::new(1.0, 0.0));

        let radius = viewport_radius(&viewport(center, 1.0));
        assert_abs_diff_eq!(radius as f64, expected, epsilon = 1.0);
    }

    #[test]
    fn test_radius_ignores_east_edge() {
        // Same north edge, wider box: radius unchanged
        let center = Coordinates::new(52.52, 13.405);
        let mut wide = viewport(center, 52.62);
        wide.bounds.north_east.lng += 5.0;

        assert_eq!(viewport_radius(&wide), viewport_radius(&viewport(center, 52.62)));
    }

    #[test]
    fn test_radius_rounds_to_meters() {
        let center = Coordinates::new(10.0, 20.0);
        let vp = viewport(center, 10.05);
        let exact = haversine_distance(center, Coordinates::new(10.05, 20.0));

        assert_eq!(viewport_radius(&vp), exact.round() as u32);
    }
}
