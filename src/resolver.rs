//! Points of interest along a route, from two geocoding backends.
//!
//! The park pass runs first: one bounding-box query, filtered to features
//! whose centroid is close to the sampled path. The reverse-geocode pass then
//! walks a capped set of probe points. Names are unique across both passes
//! (case-insensitive) and park names keep their earlier position.
//!
//! Every backend call is allowed to fail on its own. A failed call is logged
//! and skipped; resolution always carries on with what it has.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::cache::SummaryCache;
use crate::config::SummaryConfig;
use crate::haversine::is_near_any;
use crate::polyline::{BoundingBox, Coordinate};
use crate::sampler::select_probes;
use crate::traits::{AddressLookup, AreaFeatureSource, ReverseGeocoder};

/// Address fields tried in order when naming a reverse-geocoded point.
pub const ADDRESS_FIELD_PRIORITY: [&str; 4] = ["road", "park", "neighbourhood", "suburb"];

/// Which backend a name came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoiSource {
    Park,
    Geocoded,
}

/// A named place on the route. Names are unique within one summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub name: String,
    /// `None` for names restored from the cache.
    pub source: Option<PoiSource>,
    /// Only set for area features.
    pub centroid: Option<Coordinate>,
}

impl PointOfInterest {
    pub fn park(name: impl Into<String>, centroid: Coordinate) -> Self {
        Self {
            name: name.into(),
            source: Some(PoiSource::Park),
            centroid: Some(centroid),
        }
    }

    pub fn geocoded(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: Some(PoiSource::Geocoded),
            centroid: None,
        }
    }

    pub fn cached(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            centroid: None,
        }
    }
}

/// POIs for a route and whether they came from the cache.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    pub pois: Vec<PointOfInterest>,
    pub from_cache: bool,
}

impl Resolution {
    pub fn names(&self) -> Vec<String> {
        self.pois.iter().map(|poi| poi.name.clone()).collect()
    }
}

/// Order-preserving list that refuses duplicate names.
#[derive(Debug, Default)]
struct PoiList {
    pois: Vec<PointOfInterest>,
    seen: HashSet<String>,
}

impl PoiList {
    fn push(&mut self, poi: PointOfInterest) -> bool {
        let name = poi.name.trim();
        if name.is_empty() || !self.seen.insert(name.to_lowercase()) {
            return false;
        }
        self.pois.push(poi);
        true
    }

    fn len(&self) -> usize {
        self.pois.len()
    }

    fn into_vec(self) -> Vec<PointOfInterest> {
        self.pois
    }
}

/// Picks the first non-empty address field by `ADDRESS_FIELD_PRIORITY`.
pub fn representative_name(lookup: &AddressLookup) -> Option<&str> {
    ADDRESS_FIELD_PRIORITY
        .iter()
        .filter_map(|field| lookup.address.get(*field))
        .map(|value| value.trim())
        .find(|value| !value.is_empty())
}

/// Merges park and reverse-geocode results for a sampled route.
#[derive(Debug)]
pub struct PoiResolver<A, G> {
    area: A,
    geocoder: G,
    proximity_m: f64,
    max_reverse_lookups: usize,
    max_pois: usize,
}

impl<A, G> PoiResolver<A, G>
where
    A: AreaFeatureSource,
    G: ReverseGeocoder,
{
    /// Takes the proximity threshold and both caps from `config`.
    pub fn new(area: A, geocoder: G, config: &SummaryConfig) -> Self {
        Self {
            area,
            geocoder,
            proximity_m: config.proximity_m,
            max_reverse_lookups: config.max_reverse_lookups,
            max_pois: config.max_pois,
        }
    }

    /// Serves `route_id` from the cache, or resolves and caches it.
    ///
    /// Empty results are not cached so a route whose lookups all failed is
    /// retried next time. A failed cache write is logged; the fresh result
    /// is still returned.
    pub fn resolve_cached(&self, route_id: &str, sampled: &[Coordinate], cache: &mut SummaryCache) -> Resolution {
        if let Some(names) = cache.get(route_id) {
            tracing::debug!(route_id, count = names.len(), "POIs served from cache");
            return Resolution {
                pois: names.iter().map(PointOfInterest::cached).collect(),
                from_cache: true,
            };
        }

        let pois = self.resolve(sampled);
        if !pois.is_empty() {
            let names = pois.iter().map(|poi| poi.name.clone()).collect();
            if let Err(err) = cache.put(route_id, names) {
                tracing::warn!(route_id, error = %err, "failed to persist POI cache");
            }
        }

        Resolution {
            pois,
            from_cache: false,
        }
    }

    /// Runs both passes and merges them, parks first.
    pub fn resolve(&self, sampled: &[Coordinate]) -> Vec<PointOfInterest> {
        let mut merged = PoiList::default();

        for park in self.nearby_parks(sampled) {
            merged.push(park);
        }
        let parks = merged.len();

        for probe in select_probes(sampled, self.max_reverse_lookups) {
            if merged.len() >= self.max_pois {
                break;
            }
            if let Some(name) = self.probe_name(probe) {
                if !merged.push(PointOfInterest::geocoded(name.clone())) {
                    tracing::debug!(%name, "skipping duplicate geocoded name");
                }
            }
        }

        let mut pois = merged.into_vec();
        tracing::info!(
            parks,
            geocoded = pois.len() - parks,
            "resolved points of interest"
        );
        pois.truncate(self.max_pois);
        pois
    }

    /// Parks from the bounding box whose centroid lies near a sampled point.
    pub fn nearby_parks(&self, sampled: &[Coordinate]) -> Vec<PointOfInterest> {
        let Some(bbox) = BoundingBox::around(sampled) else {
            return Vec::new();
        };

        let features = match self.area.parks_within(&bbox) {
            Ok(features) => features,
            Err(err) => {
                tracing::warn!(error = %err, "park lookup failed, skipping");
                return Vec::new();
            }
        };

        let total = features.len();
        let mut parks = PoiList::default();
        for feature in features {
            if is_near_any(feature.centroid, sampled, self.proximity_m) {
                parks.push(PointOfInterest::park(feature.name, feature.centroid));
            }
        }
        tracing::debug!(total, kept = parks.len(), "filtered parks by proximity");
        parks.into_vec()
    }

    fn probe_name(&self, probe: Coordinate) -> Option<String> {
        match self.geocoder.reverse(probe) {
            Ok(Some(lookup)) => representative_name(&lookup).map(str::to_string),
            Ok(None) => None,
            Err(err) => {
                tracing::warn!(lat = probe.lat, lon = probe.lon, error = %err, "reverse geocode failed, skipping");
                None
            }
        }
    }
}
