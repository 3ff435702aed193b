//! Seams between the pipeline and its external collaborators.
//!
//! The HTTP adapters in `strava`, `overpass` and `nominatim` implement these;
//! tests substitute recording fakes.

use std::collections::BTreeMap;

use crate::error::{LookupError, RouteFetchError};
use crate::polyline::{BoundingBox, Coordinate};
use crate::route::RoutePayload;

/// Obtains raw route geometry for a route identifier.
pub trait RouteSource {
    fn fetch_route(&self, route_id: &str, access_token: &str) -> Result<RoutePayload, RouteFetchError>;
}

/// A named area feature (park, green space) with a representative point.
#[derive(Debug, Clone, PartialEq)]
pub struct AreaFeature {
    pub name: String,
    pub centroid: Coordinate,
}

/// Bounding-box lookup of named parks.
pub trait AreaFeatureSource {
    fn parks_within(&self, bbox: &BoundingBox) -> Result<Vec<AreaFeature>, LookupError>;
}

/// Result of a reverse-geocode: address components keyed by type
/// (`road`, `park`, `suburb`, ...) and the free-text display name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressLookup {
    pub address: BTreeMap<String, String>,
    pub display_name: Option<String>,
}

impl AddressLookup {
    pub fn with_field(mut self, field: &str, value: &str) -> Self {
        self.address.insert(field.to_string(), value.to_string());
        self
    }
}

/// Point lookup of address components.
///
/// `Ok(None)` means the backend answered but found nothing at that point.
pub trait ReverseGeocoder {
    fn reverse(&self, point: Coordinate) -> Result<Option<AddressLookup>, LookupError>;
}

impl<T: RouteSource + ?Sized> RouteSource for &T {
    fn fetch_route(&self, route_id: &str, access_token: &str) -> Result<RoutePayload, RouteFetchError> {
        (**self).fetch_route(route_id, access_token)
    }
}

impl<T: AreaFeatureSource + ?Sized> AreaFeatureSource for &T {
    fn parks_within(&self, bbox: &BoundingBox) -> Result<Vec<AreaFeature>, LookupError> {
        (**self).parks_within(bbox)
    }
}

impl<T: ReverseGeocoder + ?Sized> ReverseGeocoder for &T {
    fn reverse(&self, point: Coordinate) -> Result<Option<AddressLookup>, LookupError> {
        (**self).reverse(point)
    }
}

impl<T: RouteSource + ?Sized> RouteSource for Box<T> {
    fn fetch_route(&self, route_id: &str, access_token: &str) -> Result<RoutePayload, RouteFetchError> {
        (**self).fetch_route(route_id, access_token)
    }
}
