//! Nominatim reverse-geocoding adapter.
//!
//! Nominatim's public instance allows about one request per second, so every
//! call goes through a `Pacer`.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use crate::config::NominatimConfig;
use crate::error::{ConfigurationError, LookupError};
use crate::pacing::Pacer;
use crate::polyline::Coordinate;
use crate::traits::{AddressLookup, ReverseGeocoder};

#[derive(Debug)]
pub struct NominatimClient {
    config: NominatimConfig,
    client: reqwest::blocking::Client,
    pacer: Pacer,
}

impl NominatimClient {
    pub fn new(config: NominatimConfig, min_interval: Duration) -> Result<Self, ConfigurationError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|err| ConfigurationError::HttpClient(err.to_string()))?;

        Ok(Self {
            config,
            client,
            pacer: Pacer::new(min_interval),
        })
    }
}

impl ReverseGeocoder for NominatimClient {
    fn reverse(&self, point: Coordinate) -> Result<Option<AddressLookup>, LookupError> {
        self.pacer.wait();

        let url = format!("{}/reverse", self.config.base_url);
        let lat = format!("{:.6}", point.lat);
        let lon = format!("{:.6}", point.lon);
        tracing::debug!(lat = point.lat, lon = point.lon, "reverse geocoding");

        let response = self
            .client
            .get(&url)
            .query(&[
                ("format", "jsonv2"),
                ("lat", lat.as_str()),
                ("lon", lon.as_str()),
                ("zoom", "17"),
                ("addressdetails", "1"),
                ("accept-language", self.config.language.as_str()),
            ])
            .send()?;
        if !response.status().is_success() {
            return Err(LookupError::Status(response.status().as_u16()));
        }

        let body = response.text()?;
        parse_reverse(&body)
    }
}

#[derive(Debug, Deserialize)]
struct ReverseResponse {
    display_name: Option<String>,
    #[serde(default)]
    address: BTreeMap<String, String>,
    error: Option<String>,
}

/// Parses a `/reverse` body. Nominatim reports "nothing here" as a 200
/// with an `error` field, which maps to `Ok(None)`.
pub fn parse_reverse(body: &str) -> Result<Option<AddressLookup>, LookupError> {
    let response: ReverseResponse = serde_json::from_str(body)?;
    if let Some(error) = response.error {
        tracing::debug!(%error, "no reverse-geocode result");
        return Ok(None);
    }

    Ok(Some(AddressLookup {
        address: response.address,
        display_name: response.display_name,
    }))
}
