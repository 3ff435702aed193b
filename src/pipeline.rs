//! The route summary pipeline.
//!
//! fetch -> decode -> sample -> resolve POIs (cache first) -> compose.
//! `generate_route_summary` never fails: every error becomes one of the
//! placeholder sentences below.

use crate::cache::SummaryCache;
use crate::composer::{Difficulty, compose_summary};
use crate::config::SummaryConfig;
use crate::error::{ConfigurationError, RouteFetchError, SummaryError};
use crate::resolver::{PoiResolver, PointOfInterest};
use crate::route::route_id_from_url;
use crate::sampler::sample;
use crate::traits::{AreaFeatureSource, ReverseGeocoder, RouteSource};

/// Returned when route data could not be obtained.
pub const ROUTE_UNAVAILABLE: &str = "Could not load route data.";

/// Returned when route data arrived but could not be turned into a summary.
pub const SUMMARY_UNAVAILABLE: &str = "Route summary unavailable.";

/// Log target for failures an operator has to act on.
pub const OPERATOR_TARGET: &str = "route_summary::operator";

/// Everything known about one summarised route.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSummary {
    pub route_id: String,
    pub distance_km: f64,
    pub elevation_gain_m: f64,
    pub difficulty: Difficulty,
    pub pois: Vec<PointOfInterest>,
    pub from_cache: bool,
}

impl RouteSummary {
    pub fn text(&self) -> String {
        let names: Vec<&str> = self.pois.iter().map(|poi| poi.name.as_str()).collect();
        compose_summary(self.distance_km, self.elevation_gain_m, &names)
    }
}

/// Owns the route source, the POI resolver and the cache for one process.
///
/// Routes are handled one at a time; the geocoding backends are rate
/// limited and gain nothing from concurrent calls.
pub struct RouteSummarizer<S, A, G> {
    source: S,
    resolver: PoiResolver<A, G>,
    cache: SummaryCache,
    config: SummaryConfig,
}

impl<S, A, G> RouteSummarizer<S, A, G>
where
    S: RouteSource,
    A: AreaFeatureSource,
    G: ReverseGeocoder,
{
    /// Fails if `config` is invalid, so bad settings surface at startup.
    pub fn new(source: S, area: A, geocoder: G, cache: SummaryCache, config: SummaryConfig) -> Result<Self, ConfigurationError> {
        config.validate()?;
        Ok(Self {
            source,
            resolver: PoiResolver::new(area, geocoder, &config),
            cache,
            config,
        })
    }

    /// The POI cache, for inspection.
    pub fn cache(&self) -> &SummaryCache {
        &self.cache
    }

    /// The POI cache, for invalidating entries.
    pub fn cache_mut(&mut self) -> &mut SummaryCache {
        &mut self.cache
    }

    /// Summary text for a route URL or id. Never fails.
    pub fn generate_route_summary(&mut self, route: &str, access_token: &str) -> String {
        match self.summarize(route, access_token) {
            Ok(summary) => summary.text(),
            Err(err) => placeholder(route, &err).to_string(),
        }
    }

    /// Structured summary for a route URL or id.
    pub fn summarize(&mut self, route: &str, access_token: &str) -> Result<RouteSummary, SummaryError> {
        let route_id = route_id_from_url(route).ok_or_else(|| SummaryError::InvalidRouteId(route.to_string()))?;
        let _span = tracing::info_span!("route_summary", route_id = %route_id).entered();

        let payload = self.source.fetch_route(&route_id, access_token)?;
        let geometry = payload.decode()?;
        let sampled = sample(&geometry.points, self.config.min_spacing_m)?;
        tracing::debug!(
            points = geometry.points.len(),
            probes = sampled.len(),
            "sampled route geometry"
        );

        let resolution = self.resolver.resolve_cached(&route_id, &sampled, &mut self.cache);

        Ok(RouteSummary {
            route_id,
            distance_km: geometry.distance_km(),
            elevation_gain_m: geometry.elevation_gain_m,
            difficulty: Difficulty::from_elevation_gain(geometry.elevation_gain_m),
            pois: resolution.pois,
            from_cache: resolution.from_cache,
        })
    }
}

/// Logs `err` and picks the placeholder sentence for it.
fn placeholder(route: &str, err: &SummaryError) -> &'static str {
    match err {
        SummaryError::Fetch(RouteFetchError::Auth { status }) => {
            tracing::error!(target: OPERATOR_TARGET, route, status, "routing provider rejected the access token");
            ROUTE_UNAVAILABLE
        }
        SummaryError::Fetch(RouteFetchError::InvalidResponse(_)) => {
            tracing::warn!(route, error = %err, "route payload unreadable");
            SUMMARY_UNAVAILABLE
        }
        SummaryError::InvalidRouteId(_) | SummaryError::Fetch(_) => {
            tracing::warn!(route, error = %err, "route data unavailable");
            ROUTE_UNAVAILABLE
        }
        SummaryError::Decode(_) | SummaryError::Configuration(_) => {
            tracing::warn!(route, error = %err, "route summary unavailable");
            SUMMARY_UNAVAILABLE
        }
    }
}
