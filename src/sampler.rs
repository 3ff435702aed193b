//! Distance-based downsampling of dense route geometry.

use crate::config::positive;
use crate::error::ConfigurationError;
use crate::haversine::distance_m;
use crate::polyline::Coordinate;

/// Reduces `points` to a sparse subsequence spaced by at least
/// `min_spacing_m` of along-route distance.
///
/// The first point is always kept. Distance accumulates over consecutive
/// input points and a point is emitted once the running total since the
/// last emitted point reaches the spacing. The final input point is not
/// forced in, so the tail may be shorter than the spacing.
pub fn sample(points: &[Coordinate], min_spacing_m: f64) -> Result<Vec<Coordinate>, ConfigurationError> {
    positive("min_spacing_m", min_spacing_m)?;

    let Some((&first, rest)) = points.split_first() else {
        return Ok(Vec::new());
    };

    let mut sampled = vec![first];
    let mut accumulated = 0.0;
    let mut previous = first;

    for &point in rest {
        accumulated += distance_m(previous, point);
        previous = point;
        if accumulated >= min_spacing_m {
            sampled.push(point);
            accumulated = 0.0;
        }
    }

    Ok(sampled)
}

/// Picks at most `max` probes from `sampled`, spread evenly and in route
/// order. The first point is always a probe.
pub fn select_probes(sampled: &[Coordinate], max: usize) -> Vec<Coordinate> {
    if max == 0 || sampled.is_empty() {
        return Vec::new();
    }
    if sampled.len() <= max {
        return sampled.to_vec();
    }

    let step = sampled.len() as f64 / max as f64;
    (0..max)
        .map(|i| sampled[((i as f64 * step).floor() as usize).min(sampled.len() - 1)])
        .collect()
}
