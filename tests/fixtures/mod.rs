//! Test fixtures for route-summary.
//!
//! Provides:
//! - Real Radcliffe locations and route geometry
//! - Recording fakes for the route, park and reverse-geocode backends

#![allow(dead_code)]

pub mod radcliffe_locations;

use std::cell::{Cell, RefCell};

use route_summary::Coordinate;
use route_summary::error::{LookupError, RouteFetchError};
use route_summary::polyline::BoundingBox;
use route_summary::route::RoutePayload;
use route_summary::traits::{AddressLookup, AreaFeature, AreaFeatureSource, ReverseGeocoder, RouteSource};

pub use radcliffe_locations::*;

// ============================================================================
// Route source
// ============================================================================

#[derive(Debug, Clone, Copy)]
pub enum FetchFailure {
    Auth,
    NotFound,
    Transient,
    InvalidResponse,
}

pub struct FakeRouteSource {
    outcome: Result<RoutePayload, FetchFailure>,
    pub calls: Cell<usize>,
    pub last_token: RefCell<Option<String>>,
}

impl FakeRouteSource {
    pub fn serving(payload: RoutePayload) -> Self {
        Self {
            outcome: Ok(payload),
            calls: Cell::new(0),
            last_token: RefCell::new(None),
        }
    }

    pub fn failing(failure: FetchFailure) -> Self {
        Self {
            outcome: Err(failure),
            calls: Cell::new(0),
            last_token: RefCell::new(None),
        }
    }

    pub fn polyline(points: &[Coordinate], distance_m: f64, elevation_gain_m: f64) -> Self {
        Self::serving(RoutePayload::Polyline {
            encoded: encode_polyline(points),
            distance_m,
            elevation_gain_m,
        })
    }
}

impl RouteSource for FakeRouteSource {
    fn fetch_route(&self, route_id: &str, access_token: &str) -> Result<RoutePayload, RouteFetchError> {
        self.calls.set(self.calls.get() + 1);
        *self.last_token.borrow_mut() = Some(access_token.to_string());
        match &self.outcome {
            Ok(payload) => Ok(payload.clone()),
            Err(FetchFailure::Auth) => Err(RouteFetchError::Auth { status: 401 }),
            Err(FetchFailure::NotFound) => Err(RouteFetchError::NotFound {
                route_id: route_id.to_string(),
            }),
            Err(FetchFailure::Transient) => Err(RouteFetchError::Transient("connection reset".to_string())),
            Err(FetchFailure::InvalidResponse) => {
                Err(RouteFetchError::InvalidResponse("expected value at line 1 column 1".to_string()))
            }
        }
    }
}

// ============================================================================
// Park backend
// ============================================================================

pub struct FakeParks {
    features: Option<Vec<AreaFeature>>,
    pub calls: Cell<usize>,
    pub last_bbox: Cell<Option<BoundingBox>>,
}

impl FakeParks {
    pub fn with(parks: &[Location]) -> Self {
        Self {
            features: Some(
                parks
                    .iter()
                    .map(|p| AreaFeature {
                        name: p.name.to_string(),
                        centroid: p.coord(),
                    })
                    .collect(),
            ),
            calls: Cell::new(0),
            last_bbox: Cell::new(None),
        }
    }

    pub fn none() -> Self {
        Self::with(&[])
    }

    pub fn failing() -> Self {
        Self {
            features: None,
            calls: Cell::new(0),
            last_bbox: Cell::new(None),
        }
    }
}

impl AreaFeatureSource for FakeParks {
    fn parks_within(&self, bbox: &BoundingBox) -> Result<Vec<AreaFeature>, LookupError> {
        self.calls.set(self.calls.get() + 1);
        self.last_bbox.set(Some(*bbox));
        self.features.clone().ok_or(LookupError::Status(504))
    }
}

// ============================================================================
// Reverse geocoder
// ============================================================================

#[derive(Debug, Clone)]
pub enum Answer {
    Road(&'static str),
    Fields(Vec<(&'static str, &'static str)>),
    Nothing,
    Fail,
}

/// Answers probes in call order from a script, then `Nothing`.
pub struct ScriptedGeocoder {
    script: RefCell<Vec<Answer>>,
    pub probes: RefCell<Vec<Coordinate>>,
}

impl ScriptedGeocoder {
    pub fn new(script: Vec<Answer>) -> Self {
        Self {
            script: RefCell::new(script),
            probes: RefCell::new(Vec::new()),
        }
    }

    pub fn roads(names: &[&'static str]) -> Self {
        Self::new(names.iter().map(|n| Answer::Road(*n)).collect())
    }

    pub fn calls(&self) -> usize {
        self.probes.borrow().len()
    }
}

impl ReverseGeocoder for ScriptedGeocoder {
    fn reverse(&self, point: Coordinate) -> Result<Option<AddressLookup>, LookupError> {
        self.probes.borrow_mut().push(point);
        let mut script = self.script.borrow_mut();
        let answer = if script.is_empty() {
            Answer::Nothing
        } else {
            script.remove(0)
        };

        match answer {
            Answer::Road(name) => Ok(Some(AddressLookup::default().with_field("road", name))),
            Answer::Fields(fields) => Ok(Some(
                fields
                    .into_iter()
                    .fold(AddressLookup::default(), |lookup, (k, v)| lookup.with_field(k, v)),
            )),
            Answer::Nothing => Ok(None),
            Answer::Fail => Err(LookupError::Payload("timed out".to_string())),
        }
    }
}
