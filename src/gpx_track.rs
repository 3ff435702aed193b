//! GPX documents as route geometry.
//!
//! Wraps the `gpx` crate. Track points from every track and segment are
//! concatenated in document order; documents without tracks fall back to
//! their `<rte>` points. Distance and elevation gain come from the points.

use std::io::Read;

use crate::error::DecodeError;
use crate::haversine::path_length_m;
use crate::polyline::Coordinate;
use crate::route::RouteGeometry;

pub fn parse_geometry<R: Read>(reader: R) -> Result<RouteGeometry, DecodeError> {
    let gpx = gpx::read(reader).map_err(|e| DecodeError::Gpx(e.to_string()))?;

    let mut waypoints: Vec<&gpx::Waypoint> = gpx
        .tracks
        .iter()
        .flat_map(|track| track.segments.iter())
        .flat_map(|segment| segment.points.iter())
        .collect();
    if waypoints.is_empty() {
        waypoints = gpx.routes.iter().flat_map(|route| route.points.iter()).collect();
    }

    let points: Vec<Coordinate> = waypoints
        .iter()
        .map(|wp| Coordinate::new(wp.point().y(), wp.point().x()))
        .collect();
    let elevations: Vec<f64> = waypoints.iter().filter_map(|wp| wp.elevation).collect();

    Ok(RouteGeometry {
        distance_m: path_length_m(&points),
        elevation_gain_m: elevation_gain(&elevations),
        points,
    })
}

/// Sum of positive deltas between consecutive elevation samples.
pub fn elevation_gain(elevations: &[f64]) -> f64 {
    elevations
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(0.0))
        .sum()
}
