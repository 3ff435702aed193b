//! Summary text. No I/O here.

use std::fmt;

/// Terrain tier chosen from total elevation gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Flat,
    GentlyUndulating,
    AFewHills,
    Hilly,
}

impl Difficulty {
    /// Upper bounds are inclusive: 20 m, 50 m, 100 m.
    pub fn from_elevation_gain(elevation_gain_m: f64) -> Self {
        if elevation_gain_m <= 20.0 {
            Difficulty::Flat
        } else if elevation_gain_m <= 50.0 {
            Difficulty::GentlyUndulating
        } else if elevation_gain_m <= 100.0 {
            Difficulty::AFewHills
        } else {
            Difficulty::Hilly
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Flat => "flat",
            Difficulty::GentlyUndulating => "gently undulating",
            Difficulty::AFewHills => "a few hills",
            Difficulty::Hilly => "hilly",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub const NO_POIS_SENTENCE: &str = "Could not identify major points of interest.";

/// "This route passes A.", "... A and B.", "... A, B, and C."
pub fn poi_sentence<S: AsRef<str>>(names: &[S]) -> String {
    let names: Vec<&str> = names.iter().map(|name| name.as_ref()).collect();
    match names.as_slice() {
        [] => NO_POIS_SENTENCE.to_string(),
        [only] => format!("This route passes {only}."),
        [first, second] => format!("This route passes {first} and {second}."),
        [init @ .., last] => format!("This route passes {}, and {last}.", init.join(", ")),
    }
}

/// Distance, climbing and difficulty line followed by the POI sentence.
pub fn compose_summary<S: AsRef<str>>(distance_km: f64, elevation_gain_m: f64, names: &[S]) -> String {
    let difficulty = Difficulty::from_elevation_gain(elevation_gain_m);
    format!(
        "{distance_km:.1} km with {elevation_gain_m:.0} m of elevation gain ({difficulty}). {}",
        poi_sentence(names)
    )
}
