//! Great-circle distance on a spherical earth.
//!
//! Accurate to well under a percent at route scale, which is all the
//! sampler and the proximity filter need.

use crate::polyline::Coordinate;

/// Mean earth radius in meters.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance between two coordinates in meters.
///
/// Symmetric, and exactly zero when `a == b`.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }

    let lat1_rad = a.lat.to_radians();
    let lat2_rad = b.lat.to_radians();
    let delta_lat = (b.lat - a.lat).to_radians();
    let delta_lon = (b.lon - a.lon).to_radians();

    let h = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().min(1.0).asin();

    EARTH_RADIUS_M * c
}

/// Total length of a path in meters.
pub fn path_length_m(points: &[Coordinate]) -> f64 {
    points.windows(2).map(|pair| distance_m(pair[0], pair[1])).sum()
}

/// True when `point` lies within `radius_m` of any of `targets`.
pub fn is_near_any(point: Coordinate, targets: &[Coordinate], radius_m: f64) -> bool {
    targets.iter().any(|t| distance_m(point, *t) <= radius_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RADCLIFFE: Coordinate = Coordinate::new(53.5605, -2.3044);
    const BURY: Coordinate = Coordinate::new(53.5933, -2.2966);

    #[test]
    fn test_same_point_is_zero() {
        assert_eq!(distance_m(RADCLIFFE, RADCLIFFE), 0.0);
    }

    #[test]
    fn test_symmetric() {
        assert_eq!(distance_m(RADCLIFFE, BURY), distance_m(BURY, RADCLIFFE));
    }

    #[test]
    fn test_known_distance() {
        // Las Vegas to Los Angeles, roughly 370 km.
        let dist = distance_m(Coordinate::new(36.17, -115.14), Coordinate::new(34.05, -118.24));
        assert!(dist > 350_000.0 && dist < 400_000.0, "got {dist}");
    }

    #[test]
    fn test_one_degree_of_latitude() {
        let dist = distance_m(Coordinate::new(0.0, 0.0), Coordinate::new(1.0, 0.0));
        assert!((dist - 111_195.0).abs() < 10.0, "got {dist}");
    }

    #[test]
    fn test_distinct_points_are_positive() {
        let nudged = Coordinate::new(RADCLIFFE.lat + 1e-6, RADCLIFFE.lon);
        assert!(distance_m(RADCLIFFE, nudged) > 0.0);
    }

    #[test]
    fn test_path_length() {
        let mid = Coordinate::new(53.5769, -2.3005);
        let total = path_length_m(&[RADCLIFFE, mid, BURY]);
        let direct = distance_m(RADCLIFFE, BURY);
        assert!(total >= direct);
        assert_eq!(path_length_m(&[RADCLIFFE]), 0.0);
        assert_eq!(path_length_m(&[]), 0.0);
    }

    #[test]
    fn test_is_near_any() {
        let nearby = Coordinate::new(53.5607, -2.3044); // ~22 m north
        assert!(is_near_any(nearby, &[BURY, RADCLIFFE], 50.0));
        assert!(!is_near_any(nearby, &[BURY], 50.0));
        assert!(!is_near_any(nearby, &[], 50.0));
    }
}
