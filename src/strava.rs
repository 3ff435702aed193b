//! Strava HTTP adapter for route geometry.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use crate::config::StravaConfig;
use crate::error::{ConfigurationError, RouteFetchError};
use crate::route::RoutePayload;
use crate::traits::RouteSource;

/// Which representation to request from the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GeometryFormat {
    /// Route JSON with an encoded polyline and provider totals.
    #[default]
    Polyline,
    /// The route's GPX export.
    Gpx,
}

#[derive(Debug, Clone)]
pub struct StravaClient {
    config: StravaConfig,
    format: GeometryFormat,
    client: reqwest::blocking::Client,
}

impl StravaClient {
    pub fn new(config: StravaConfig, format: GeometryFormat) -> Result<Self, ConfigurationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ConfigurationError::HttpClient(err.to_string()))?;

        Ok(Self {
            config,
            format,
            client,
        })
    }

    fn get(&self, url: &str, route_id: &str, access_token: &str) -> Result<reqwest::blocking::Response, RouteFetchError> {
        tracing::debug!(route_id, url, "fetching route");
        let response = self.client.get(url).bearer_auth(access_token).send()?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(RouteFetchError::from_status(status.as_u16(), route_id))
        }
    }
}

impl RouteSource for StravaClient {
    fn fetch_route(&self, route_id: &str, access_token: &str) -> Result<RoutePayload, RouteFetchError> {
        match self.format {
            GeometryFormat::Polyline => {
                let url = format!("{}/routes/{}", self.config.base_url, route_id);
                let body: StravaRoute = self.get(&url, route_id, access_token)?.json()?;
                body.into_payload()
            }
            GeometryFormat::Gpx => {
                let url = format!("{}/routes/{}/export_gpx", self.config.base_url, route_id);
                let document = self.get(&url, route_id, access_token)?.text()?;
                Ok(RoutePayload::Gpx(document))
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct StravaRoute {
    #[serde(default)]
    distance: f64,
    #[serde(default)]
    elevation_gain: f64,
    map: StravaMap,
}

#[derive(Debug, Deserialize)]
struct StravaMap {
    polyline: Option<String>,
    summary_polyline: Option<String>,
}

impl StravaRoute {
    /// Prefers the full polyline over the summary one.
    fn into_payload(self) -> Result<RoutePayload, RouteFetchError> {
        let encoded = self
            .map
            .polyline
            .filter(|p| !p.is_empty())
            .or(self.map.summary_polyline.filter(|p| !p.is_empty()))
            .ok_or_else(|| RouteFetchError::InvalidResponse("route has no polyline".to_string()))?;

        Ok(RoutePayload::Polyline {
            encoded,
            distance_m: self.distance,
            elevation_gain_m: self.elevation_gain,
        })
    }
}

/// Serves a local GPX file for any route id. The credential is ignored.
#[derive(Debug, Clone)]
pub struct GpxFileSource {
    path: PathBuf,
}

impl GpxFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RouteSource for GpxFileSource {
    fn fetch_route(&self, route_id: &str, _access_token: &str) -> Result<RoutePayload, RouteFetchError> {
        match fs::read_to_string(&self.path) {
            Ok(document) => Ok(RoutePayload::Gpx(document)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Err(RouteFetchError::NotFound {
                route_id: route_id.to_string(),
            }),
            Err(err) => Err(RouteFetchError::Transient(err.to_string())),
        }
    }
}
