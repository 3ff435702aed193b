//! Error taxonomy for the route summary pipeline.
//!
//! Every failure here is either fatal at startup (`ConfigurationError`) or
//! degrades to placeholder text at the pipeline boundary. Nothing is meant to
//! escape `RouteSummarizer::generate_route_summary`.

use thiserror::Error;

/// Malformed route geometry.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DecodeError {
    #[error("polyline truncated inside a varint at byte {offset}")]
    TruncatedPolyline { offset: usize },

    #[error("invalid polyline character {found:?} at byte {offset}")]
    InvalidCharacter { offset: usize, found: char },

    #[error("polyline value overflows at byte {offset}")]
    Overflow { offset: usize },

    #[error("GPX parse error: {0}")]
    Gpx(String),
}

/// Invalid pipeline parameters.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigurationError {
    #[error("{name} must be greater than zero, got {value}")]
    NonPositive { name: &'static str, value: f64 },

    #[error("{name} must be at least 1")]
    ZeroLimit { name: &'static str },

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Failure to obtain route data from the routing provider.
#[derive(Debug, Error)]
pub enum RouteFetchError {
    /// The credential was rejected. Needs operator attention.
    #[error("credential rejected by routing provider (HTTP {status})")]
    Auth { status: u16 },

    #[error("route {route_id} not found")]
    NotFound { route_id: String },

    /// Network error, timeout, rate limit or 5xx. The caller may retry.
    #[error("transient routing provider failure: {0}")]
    Transient(String),

    #[error("unreadable routing provider response: {0}")]
    InvalidResponse(String),
}

impl RouteFetchError {
    pub fn is_retryable(&self) -> bool {
        matches!(self, RouteFetchError::Transient(_))
    }

    /// Classifies a non-success HTTP status.
    pub fn from_status(status: u16, route_id: &str) -> Self {
        match status {
            401 | 403 => RouteFetchError::Auth { status },
            404 => RouteFetchError::NotFound {
                route_id: route_id.to_string(),
            },
            429 | 500..=599 => RouteFetchError::Transient(format!("HTTP {status}")),
            other => RouteFetchError::InvalidResponse(format!("unexpected HTTP {other}")),
        }
    }
}

impl From<reqwest::Error> for RouteFetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            RouteFetchError::InvalidResponse(err.to_string())
        } else {
            RouteFetchError::Transient(err.to_string())
        }
    }
}

/// A single geocoding lookup that failed. Always skipped, never surfaced.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("backend answered HTTP {0}")]
    Status(u16),

    #[error("malformed payload: {0}")]
    Payload(String),
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        LookupError::Payload(err.to_string())
    }
}

/// Persistent cache failures.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("cache I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache file is not valid JSON: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("failed to replace cache file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

/// Why a route could not be summarised.
#[derive(Debug, Error)]
pub enum SummaryError {
    #[error("no route identifier in {0:?}")]
    InvalidRouteId(String),

    #[error(transparent)]
    Fetch(#[from] RouteFetchError),

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_classification() {
        assert!(matches!(
            RouteFetchError::from_status(401, "1"),
            RouteFetchError::Auth { status: 401 }
        ));
        assert!(matches!(
            RouteFetchError::from_status(403, "1"),
            RouteFetchError::Auth { status: 403 }
        ));
        assert!(matches!(
            RouteFetchError::from_status(404, "42"),
            RouteFetchError::NotFound { ref route_id } if route_id == "42"
        ));
        assert!(RouteFetchError::from_status(503, "1").is_retryable());
        assert!(RouteFetchError::from_status(429, "1").is_retryable());
        assert!(!RouteFetchError::from_status(400, "1").is_retryable());
    }

    #[test]
    fn test_display_mentions_offset() {
        let err = DecodeError::TruncatedPolyline { offset: 7 };
        assert!(err.to_string().contains("byte 7"));
    }
}
