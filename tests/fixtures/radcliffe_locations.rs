//! Locations around Radcliffe, Greater Manchester, for route fixtures.

use route_summary::Coordinate;

/// A named location with coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Location {
    pub name: &'static str,
    pub lat: f64,
    pub lon: f64,
}

impl Location {
    pub const fn new(name: &'static str, lat: f64, lon: f64) -> Self {
        Self { name, lat, lon }
    }

    pub fn coord(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lon)
    }
}

// ============================================================================
// Parks
// ============================================================================

/// On the first leg of `riverside_loop`, about 35 m from its nearest probe.
pub const CLOSE_PARK: Location = Location::new("Close Park", 53.5627, -2.3067);
/// Inside the loop's bounding box but 300 m from the path.
pub const OUTWOOD_GREEN: Location = Location::new("Outwood Green", 53.5660, -2.3040);
/// Outside the loop's bounding box.
pub const BURRS_COUNTRY_PARK: Location = Location::new("Burrs Country Park", 53.6046, -2.3040);

// ============================================================================
// Routes
// ============================================================================

/// Two points roughly 585 m apart along Radcliffe Road.
pub const SHORT_HOP: [Location; 2] = [
    Location::new("Radcliffe Road start", 53.5605, -2.3044),
    Location::new("Radcliffe Road end", 53.5650, -2.3090),
];

/// A riverside loop of about 3 km, densified to one point every ~50 m.
pub fn riverside_loop() -> Vec<Coordinate> {
    let corners = [
        Coordinate::new(53.5605, -2.3044),
        Coordinate::new(53.5650, -2.3090),
        Coordinate::new(53.5700, -2.3060),
        Coordinate::new(53.5680, -2.2960),
        Coordinate::new(53.5605, -2.3044),
    ];

    let mut points = Vec::new();
    for pair in corners.windows(2) {
        for step in 0..20 {
            let t = step as f64 / 20.0;
            points.push(Coordinate::new(
                pair[0].lat + (pair[1].lat - pair[0].lat) * t,
                pair[0].lon + (pair[1].lon - pair[0].lon) * t,
            ));
        }
    }
    points.push(corners[corners.len() - 1]);
    points
}

/// Encodes coordinates as a precision-5 polyline.
pub fn encode_polyline(points: &[Coordinate]) -> String {
    let mut out = String::new();
    let (mut prev_lat, mut prev_lon) = (0i64, 0i64);

    for point in points {
        let lat = (point.lat * 1e5).round() as i64;
        let lon = (point.lon * 1e5).round() as i64;
        encode_value(lat - prev_lat, &mut out);
        encode_value(lon - prev_lon, &mut out);
        prev_lat = lat;
        prev_lon = lon;
    }

    out
}

fn encode_value(value: i64, out: &mut String) {
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((v & 0x1f) | 0x20) as u8 + 63) as char);
        v >>= 5;
    }
    out.push((v as u8 + 63) as char);
}

/// A GPX track document over `points`, with the given elevations.
pub fn gpx_document(points: &[Coordinate], elevations: &[f64]) -> String {
    let mut body = String::new();
    for (i, p) in points.iter().enumerate() {
        match elevations.get(i) {
            Some(ele) => body.push_str(&format!(
                "      <trkpt lat=\"{}\" lon=\"{}\"><ele>{}</ele></trkpt>\n",
                p.lat, p.lon, ele
            )),
            None => body.push_str(&format!("      <trkpt lat=\"{}\" lon=\"{}\"></trkpt>\n", p.lat, p.lon)),
        }
    }

    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <gpx version=\"1.1\" creator=\"fixtures\" xmlns=\"http://www.topografix.com/GPX/1/1\">\n\
         <trk><trkseg>\n{body}</trkseg></trk>\n</gpx>\n"
    )
}
