//! route-summary
//!
//! Turns a route URL into a one-paragraph description for club
//! announcements: distance, climbing, a difficulty label and the parks and
//! streets the route passes.

pub mod error;
pub mod config;
pub mod traits;
pub mod polyline;
pub mod haversine;
pub mod sampler;
pub mod route;
pub mod gpx_track;
pub mod pacing;
pub mod strava;
pub mod overpass;
pub mod nominatim;
pub mod resolver;
pub mod cache;
pub mod composer;
pub mod pipeline;

pub use cache::SummaryCache;
pub use config::SummaryConfig;
pub use pipeline::{ROUTE_UNAVAILABLE, RouteSummarizer, RouteSummary, SUMMARY_UNAVAILABLE};
pub use polyline::Coordinate;
