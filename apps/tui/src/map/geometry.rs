/// Fraction of the span added on every side when fitting the viewport.
pub const FIT_PADDING: f64 = 0.15;

const CURVE_OFFSET_FACTOR: f64 = 0.25;
const MIN_CURVE_SPAN_DEG: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatLon {
    pub lat: f64,
    pub lon: f64,
}

impl LatLon {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }

    pub fn is_finite(self) -> bool {
        self.lat.is_finite() && self.lon.is_finite()
    }
}

fn normalize_lon(lon: f64) -> f64 {
    if lon > 180.0 {
        lon - 360.0
    } else if lon < -180.0 {
        lon + 360.0
    } else {
        lon
    }
}

/// Control point lifting the skywave line off the straight path.
///
/// The latitude is pushed north by a quarter of the larger span, or by a
/// small latitude-scaled minimum when the stations are close together. Across
/// the antimeridian the longitude is taken on the short way round.
pub fn sky_path_midpoint(tx: LatLon, rx: LatLon) -> LatLon {
    let mid_lat = (tx.lat + rx.lat) / 2.0;
    let mid_lon = (tx.lon + rx.lon) / 2.0;
    let lat_span = (tx.lat - rx.lat).abs();
    let lon_span = (tx.lon - rx.lon).abs();

    let span = lat_span.max(lon_span);
    let offset = if span > MIN_CURVE_SPAN_DEG {
        span * CURVE_OFFSET_FACTOR
    } else {
        mid_lat.abs().mul_add(0.05, 1.0)
    };

    let lon = if lon_span > 180.0 {
        let shift = if tx.lon < rx.lon { 360.0 } else { -360.0 };
        normalize_lon((tx.lon + rx.lon + shift) / 2.0)
    } else {
        mid_lon
    };

    LatLon::new(mid_lat + offset, lon)
}

/// Axis-aligned lat/lon box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub south: f64,
    pub west: f64,
    pub north: f64,
    pub east: f64,
}

impl Default for Bounds {
    /// Continental US, where the map opens.
    fn default() -> Self {
        Self {
            south: 20.0,
            west: -130.0,
            north: 56.0,
            east: -60.0,
        }
    }
}

impl Bounds {
    pub fn from_points(a: LatLon, b: LatLon) -> Self {
        Self {
            south: a.lat.min(b.lat),
            west: a.lon.min(b.lon),
            north: a.lat.max(b.lat),
            east: a.lon.max(b.lon),
        }
    }

    pub fn lat_span(&self) -> f64 {
        self.north - self.south
    }

    pub fn lon_span(&self) -> f64 {
        self.east - self.west
    }

    pub fn is_finite(&self) -> bool {
        [self.south, self.west, self.north, self.east]
            .iter()
            .all(|v| v.is_finite())
    }

    /// A box that collapsed to a single point cannot be fitted.
    pub fn is_degenerate(&self) -> bool {
        self.lat_span() <= 0.0 && self.lon_span() <= 0.0
    }

    /// Grows the box by `ratio` of its span on each side.
    pub fn pad(&self, ratio: f64) -> Self {
        let lat_buffer = self.lat_span().abs() * ratio;
        let lon_buffer = self.lon_span().abs() * ratio;
        Self {
            south: self.south - lat_buffer,
            west: self.west - lon_buffer,
            north: self.north + lat_buffer,
            east: self.east + lon_buffer,
        }
    }

    /// Widens either axis up to `min_span` around its centre so a thin box
    /// still has something to draw.
    pub fn with_min_span(&self, min_span: f64) -> Self {
        let mut out = *self;
        if self.lat_span() < min_span {
            let centre = (self.north + self.south) / 2.0;
            out.south = centre - min_span / 2.0;
            out.north = centre + min_span / 2.0;
        }
        if self.lon_span() < min_span {
            let centre = (self.east + self.west) / 2.0;
            out.west = centre - min_span / 2.0;
            out.east = centre + min_span / 2.0;
        }
        out
    }

    pub fn contains(&self, point: LatLon) -> bool {
        (self.south..=self.north).contains(&point.lat) && (self.west..=self.east).contains(&point.lon)
    }
}

/// Padded box around both stations, or `None` when it cannot be fitted.
pub fn fit_bounds(tx: LatLon, rx: LatLon) -> Option<Bounds> {
    if !tx.is_finite() || !rx.is_finite() {
        return None;
    }
    let bounds = Bounds::from_points(tx, rx);
    if !bounds.is_finite() || bounds.is_degenerate() {
        return None;
    }
    Some(bounds.pad(FIT_PADDING))
}
