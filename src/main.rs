use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing_subscriber::EnvFilter;

use route_summary::config::{NominatimConfig, OverpassConfig, StravaConfig};
use route_summary::nominatim::NominatimClient;
use route_summary::overpass::OverpassClient;
use route_summary::route::route_id_from_url;
use route_summary::strava::{GeometryFormat, GpxFileSource, StravaClient};
use route_summary::traits::RouteSource;
use route_summary::{RouteSummarizer, SummaryCache, SummaryConfig};

/// Describe running routes for weekly club announcements.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Route URLs or ids, e.g. https://www.strava.com/routes/3344556677
    #[arg(required = true)]
    routes: Vec<String>,

    /// Bearer token for the routing provider
    #[arg(long, env = "STRAVA_ACCESS_TOKEN", hide_env_values = true, default_value = "")]
    token: String,

    /// POI cache file
    #[arg(long, default_value = "route_summary_cache.json")]
    cache: PathBuf,

    /// Read geometry from a local GPX file instead of the provider
    #[arg(long)]
    gpx_file: Option<PathBuf>,

    /// Geometry representation to request from the provider
    #[arg(long, value_enum, default_value_t = Format::Polyline)]
    format: Format,

    /// Minimum spacing between probe points, meters
    #[arg(long, default_value_t = 300.0)]
    min_spacing: f64,

    /// Maximum reverse-geocode calls per route
    #[arg(long, default_value_t = 5)]
    max_lookups: usize,

    /// Maximum names listed per route
    #[arg(long, default_value_t = 6)]
    max_pois: usize,

    /// Drop cached POIs for these routes before summarising
    #[arg(long)]
    refresh: bool,

    /// User agent sent to the geocoding service
    #[arg(long, env = "ROUTE_SUMMARY_USER_AGENT")]
    user_agent: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Format {
    Polyline,
    Gpx,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "startup failed");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = SummaryConfig {
        min_spacing_m: cli.min_spacing,
        max_reverse_lookups: cli.max_lookups,
        max_pois: cli.max_pois,
        ..SummaryConfig::default()
    };
    config.validate()?;

    let source: Box<dyn RouteSource> = match &cli.gpx_file {
        Some(path) => Box::new(GpxFileSource::new(path)),
        None => {
            let format = match cli.format {
                Format::Polyline => GeometryFormat::Polyline,
                Format::Gpx => GeometryFormat::Gpx,
            };
            if cli.token.is_empty() {
                tracing::warn!("no access token set; provider requests will be rejected");
            }
            Box::new(StravaClient::new(StravaConfig::default(), format)?)
        }
    };

    let overpass = OverpassClient::new(OverpassConfig {
        timeout_secs: config.request_timeout_secs,
        ..OverpassConfig::default()
    })?;

    let mut nominatim_config = NominatimConfig {
        timeout_secs: config.request_timeout_secs,
        ..NominatimConfig::default()
    };
    if let Some(agent) = cli.user_agent {
        nominatim_config.user_agent = agent;
    }
    let nominatim = NominatimClient::new(nominatim_config, config.reverse_geocode_interval())?;

    let cache = SummaryCache::open(&cli.cache)?;
    let mut summarizer = RouteSummarizer::new(source, overpass, nominatim, cache, config)?;

    for route in &cli.routes {
        if cli.refresh {
            if let Some(route_id) = route_id_from_url(route) {
                if let Err(err) = summarizer.cache_mut().invalidate(&route_id) {
                    tracing::warn!(%route_id, error = %err, "failed to invalidate cache entry");
                }
            }
        }

        let text = summarizer.generate_route_summary(route, &cli.token);
        println!("{route}\n{text}\n");
    }

    Ok(())
}
