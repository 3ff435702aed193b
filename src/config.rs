//! Pipeline and backend configuration.

use std::time::Duration;

use crate::error::ConfigurationError;

/// Tuning knobs for sampling and POI resolution.
#[derive(Debug, Clone)]
pub struct SummaryConfig {
    /// Minimum along-route spacing between probe points, meters.
    pub min_spacing_m: f64,
    /// Max distance from a sampled point for a park centroid to count, meters.
    pub proximity_m: f64,
    /// Cap on reverse-geocode calls per route.
    pub max_reverse_lookups: usize,
    /// Cap on names in the final summary.
    pub max_pois: usize,
    /// Minimum gap between reverse-geocode calls, milliseconds.
    pub reverse_geocode_interval_ms: u64,
    /// Per-request timeout for every external call, seconds.
    pub request_timeout_secs: u64,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            min_spacing_m: 300.0,
            proximity_m: 50.0,
            max_reverse_lookups: 5,
            max_pois: 6,
            reverse_geocode_interval_ms: 1000,
            request_timeout_secs: 5,
        }
    }
}

impl SummaryConfig {
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        positive("min_spacing_m", self.min_spacing_m)?;
        positive("proximity_m", self.proximity_m)?;
        positive("reverse_geocode_interval_ms", self.reverse_geocode_interval_ms as f64)?;
        positive("request_timeout_secs", self.request_timeout_secs as f64)?;
        if self.max_reverse_lookups == 0 {
            return Err(ConfigurationError::ZeroLimit {
                name: "max_reverse_lookups",
            });
        }
        if self.max_pois == 0 {
            return Err(ConfigurationError::ZeroLimit { name: "max_pois" });
        }
        Ok(())
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn reverse_geocode_interval(&self) -> Duration {
        Duration::from_millis(self.reverse_geocode_interval_ms)
    }
}

/// Rejects zero, negative and NaN values.
pub(crate) fn positive(name: &'static str, value: f64) -> Result<(), ConfigurationError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigurationError::NonPositive { name, value })
    }
}

#[derive(Debug, Clone)]
pub struct StravaConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for StravaConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.strava.com/api/v3".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OverpassConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
}

impl Default for OverpassConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://overpass-api.de/api/interpreter".to_string(),
            timeout_secs: 5,
        }
    }
}

#[derive(Debug, Clone)]
pub struct NominatimConfig {
    pub base_url: String,
    /// Nominatim's usage policy requires an identifying user agent.
    pub user_agent: String,
    pub language: String,
    pub timeout_secs: u64,
}

impl Default for NominatimConfig {
    fn default() -> Self {
        Self {
            base_url: "https://nominatim.openstreetmap.org".to_string(),
            user_agent: concat!("route-summary/", env!("CARGO_PKG_VERSION")).to_string(),
            language: "en".to_string(),
            timeout_secs: 5,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(SummaryConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_zero_spacing() {
        let config = SummaryConfig {
            min_spacing_m: 0.0,
            ..SummaryConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::NonPositive {
                name: "min_spacing_m",
                value: 0.0
            })
        );
    }

    #[test]
    fn test_rejects_nan_proximity() {
        let config = SummaryConfig {
            proximity_m: f64::NAN,
            ..SummaryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_zero_caps() {
        let config = SummaryConfig {
            max_pois: 0,
            ..SummaryConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigurationError::ZeroLimit { name: "max_pois" })
        );

        let config = SummaryConfig {
            max_reverse_lookups: 0,
            ..SummaryConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_durations() {
        let config = SummaryConfig::default();
        assert_eq!(config.request_timeout(), Duration::from_secs(5));
        assert_eq!(config.reverse_geocode_interval(), Duration::from_millis(1000));
    }
}
