//! Route identifiers, raw provider payloads and decoded route geometry.

use crate::error::DecodeError;
use crate::gpx_track;
use crate::polyline::{Coordinate, decode_polyline};

/// Decoded route geometry plus the provider's headline numbers.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteGeometry {
    pub points: Vec<Coordinate>,
    pub distance_m: f64,
    pub elevation_gain_m: f64,
}

impl RouteGeometry {
    pub fn distance_km(&self) -> f64 {
        self.distance_m / 1000.0
    }
}

/// Route data as handed over by a `RouteSource`, before decoding.
#[derive(Debug, Clone, PartialEq)]
pub enum RoutePayload {
    /// Encoded polyline with provider-computed totals.
    Polyline {
        encoded: String,
        distance_m: f64,
        elevation_gain_m: f64,
    },
    /// A GPX document; totals are derived from the track itself.
    Gpx(String),
}

impl RoutePayload {
    pub fn decode(&self) -> Result<RouteGeometry, DecodeError> {
        match self {
            RoutePayload::Polyline {
                encoded,
                distance_m,
                elevation_gain_m,
            } => Ok(RouteGeometry {
                points: decode_polyline(encoded)?,
                distance_m: *distance_m,
                elevation_gain_m: *elevation_gain_m,
            }),
            RoutePayload::Gpx(document) => gpx_track::parse_geometry(document.as_bytes()),
        }
    }
}

/// Extracts the route identifier from a route URL or bare id.
///
/// Takes the last `/`-delimited segment after trimming whitespace, any
/// query string or fragment, and trailing slashes. Returns `None` when
/// nothing is left.
pub fn route_id_from_url(input: &str) -> Option<String> {
    let trimmed = input.trim();
    let without_suffix = trimmed
        .split(['?', '#'])
        .next()
        .unwrap_or_default()
        .trim_end_matches('/');

    without_suffix
        .rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
}
