//! Coordinates and polyline geometry.
//!
//! Route providers ship geometry in the compact encoded polyline format
//! (precision 1e-5). Decoding happens here, at the boundary; the rest of the
//! crate only sees `Coordinate` sequences.

use serde::{Deserialize, Serialize};

use crate::error::DecodeError;

const PRECISION: f64 = 1e5;

/// A WGS84 position in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lon): (f64, f64)) -> Self {
        Self { lat, lon }
    }
}

/// A route geometry as decoded coordinates, start-to-end.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Polyline {
    points: Vec<Coordinate>,
}

impl Polyline {
    pub fn new(points: Vec<Coordinate>) -> Self {
        Self { points }
    }

    /// Decodes an encoded polyline string.
    pub fn decode(encoded: &str) -> Result<Self, DecodeError> {
        decode_polyline(encoded).map(Self::new)
    }

    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Coordinate> {
        self.points
    }

    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::around(&self.points)
    }
}

/// Decodes a precision-5 encoded polyline into coordinates.
///
/// Each coordinate is a pair of zigzag-encoded deltas, written as 5-bit
/// groups offset by 63 with the 0x20 bit marking continuation.
pub fn decode_polyline(encoded: &str) -> Result<Vec<Coordinate>, DecodeError> {
    let bytes = encoded.as_bytes();
    let mut index = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    let mut points = Vec::new();

    while index < bytes.len() {
        lat = lat
            .checked_add(next_delta(bytes, &mut index)?)
            .ok_or(DecodeError::Overflow { offset: index })?;
        lon = lon
            .checked_add(next_delta(bytes, &mut index)?)
            .ok_or(DecodeError::Overflow { offset: index })?;
        points.push(Coordinate::new(lat as f64 / PRECISION, lon as f64 / PRECISION));
    }

    Ok(points)
}

fn next_delta(bytes: &[u8], index: &mut usize) -> Result<i64, DecodeError> {
    let mut result: i64 = 0;
    let mut shift = 0;

    loop {
        let Some(&byte) = bytes.get(*index) else {
            return Err(DecodeError::TruncatedPolyline { offset: *index });
        };
        if !(63..=126).contains(&byte) {
            return Err(DecodeError::InvalidCharacter {
                offset: *index,
                found: byte as char,
            });
        }
        if shift > 55 {
            return Err(DecodeError::Overflow { offset: *index });
        }

        let chunk = i64::from(byte - 63);
        *index += 1;
        result |= (chunk & 0x1f) << shift;
        shift += 5;

        if chunk < 0x20 {
            break;
        }
    }

    Ok(if result & 1 == 1 { !(result >> 1) } else { result >> 1 })
}

/// Axis-aligned lat/lon extent of a set of points, without padding.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl BoundingBox {
    /// Returns `None` for an empty slice.
    pub fn around(points: &[Coordinate]) -> Option<Self> {
        let first = points.first()?;
        let init = Self {
            south: first.lat,
            west: first.lon,
            north: first.lat,
            east: first.lon,
        };

        Some(points.iter().skip(1).fold(init, |bbox, p| Self {
            south: bbox.south.min(p.lat),
            west: bbox.west.min(p.lon),
            north: bbox.north.max(p.lat),
            east: bbox.east.max(p.lon),
        }))
    }

    pub fn contains(&self, point: Coordinate) -> bool {
        point.lat >= self.south
            && point.lat <= self.north
            && point.lon >= self.west
            && point.lon <= self.east
    }
}
