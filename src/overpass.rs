//! Overpass API adapter: named parks inside a bounding box.

use std::time::Duration;

use serde::Deserialize;

use crate::config::OverpassConfig;
use crate::error::{ConfigurationError, LookupError};
use crate::polyline::{BoundingBox, Coordinate};
use crate::traits::{AreaFeature, AreaFeatureSource};

#[derive(Debug, Clone)]
pub struct OverpassClient {
    config: OverpassConfig,
    client: reqwest::blocking::Client,
}

impl OverpassClient {
    pub fn new(config: OverpassConfig) -> Result<Self, ConfigurationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|err| ConfigurationError::HttpClient(err.to_string()))?;

        Ok(Self { config, client })
    }
}

impl AreaFeatureSource for OverpassClient {
    fn parks_within(&self, bbox: &BoundingBox) -> Result<Vec<AreaFeature>, LookupError> {
        let query = park_query(bbox, self.config.timeout_secs);
        tracing::debug!(endpoint = %self.config.endpoint, "querying parks");

        let response = self
            .client
            .post(&self.config.endpoint)
            .form(&[("data", query)])
            .send()?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.text()?;
        parse_features(&body)
    }
}

/// Overpass QL for named `leisure=park` nodes, ways and relations.
///
/// `out center` gives ways and relations a single representative point.
pub fn park_query(bbox: &BoundingBox, timeout_secs: u64) -> String {
    let area = format!(
        "{:.6},{:.6},{:.6},{:.6}",
        bbox.south, bbox.west, bbox.north, bbox.east
    );
    format!(
        "[out:json][timeout:{timeout_secs}];\
         (node[\"leisure\"=\"park\"][\"name\"]({area});\
         way[\"leisure\"=\"park\"][\"name\"]({area});\
         relation[\"leisure\"=\"park\"][\"name\"]({area}););\
         out center tags;"
    )
}

#[derive(Debug, Deserialize)]
struct OverpassResponse {
    #[serde(default)]
    elements: Vec<OverpassElement>,
}

#[derive(Debug, Deserialize)]
struct OverpassElement {
    lat: Option<f64>,
    lon: Option<f64>,
    center: Option<OverpassCenter>,
    #[serde(default)]
    tags: OverpassTags,
}

#[derive(Debug, Deserialize)]
struct OverpassCenter {
    lat: f64,
    lon: f64,
}

#[derive(Debug, Default, Deserialize)]
struct OverpassTags {
    name: Option<String>,
}

impl OverpassElement {
    fn into_feature(self) -> Option<AreaFeature> {
        let centroid = match (self.center, self.lat, self.lon) {
            (Some(center), _, _) => Coordinate::new(center.lat, center.lon),
            (None, Some(lat), Some(lon)) => Coordinate::new(lat, lon),
            _ => return None,
        };
        let name = self.tags.name.map(|n| n.trim().to_string()).filter(|n| !n.is_empty())?;
        Some(AreaFeature { name, centroid })
    }
}

/// Parses an Overpass JSON body, dropping elements without a name or point.
pub fn parse_features(body: &str) -> Result<Vec<AreaFeature>, LookupError> {
    let response: OverpassResponse = serde_json::from_str(body)?;
    Ok(response
        .elements
        .into_iter()
        .filter_map(OverpassElement::into_feature)
        .collect())
}
