use crate::domain::{SkywaveLikelihood, StyleBucket};
use crate::map::geometry::{fit_bounds, sky_path_midpoint, Bounds, LatLon};
use crate::sim::error::RenderError;

#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub position: LatLon,
    pub label: &'static str,
}

impl Marker {
    /// Popup text, e.g. `Lat: 40.0000, Lon: -100.0000`.
    pub fn detail(&self) -> String {
        format!(
            "Lat: {:.4}, Lon: {:.4}",
            self.position.lat, self.position.lon
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    Ground,
    Sky,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PathLine {
    pub kind: PathKind,
    pub points: Vec<LatLon>,
    pub style: StyleBucket,
}

impl PathLine {
    /// Consecutive point pairs, one per drawn segment.
    pub fn segments(&self) -> impl Iterator<Item = (LatLon, LatLon)> + '_ {
        self.points.windows(2).map(|pair| (pair[0], pair[1]))
    }
}

/// Markers, path lines and viewport currently on the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapOverlay {
    tx_marker: Option<Marker>,
    rx_marker: Option<Marker>,
    ground_path: Option<PathLine>,
    sky_path: Option<PathLine>,
    viewport: Bounds,
}

impl MapOverlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn viewport(&self) -> Bounds {
        self.viewport
    }

    pub fn markers(&self) -> impl Iterator<Item = &Marker> {
        self.tx_marker.iter().chain(self.rx_marker.iter())
    }

    pub fn paths(&self) -> impl Iterator<Item = &PathLine> {
        self.ground_path.iter().chain(self.sky_path.iter())
    }

    pub const fn ground_path(&self) -> Option<&PathLine> {
        self.ground_path.as_ref()
    }

    pub const fn sky_path(&self) -> Option<&PathLine> {
        self.sky_path.as_ref()
    }

    pub fn is_empty(&self) -> bool {
        self.tx_marker.is_none()
            && self.rx_marker.is_none()
            && self.ground_path.is_none()
            && self.sky_path.is_none()
    }

    /// Removes every overlay item. The viewport stays where it was.
    pub fn clear(&mut self) {
        self.tx_marker = None;
        self.rx_marker = None;
        self.ground_path = None;
        self.sky_path = None;
    }

    /// Replaces the overlay with markers and both paths for one link.
    ///
    /// Invalid coordinates leave the previous overlay untouched.
    pub fn redraw(
        &mut self,
        tx: LatLon,
        rx: LatLon,
        likelihood: Option<&str>,
        ground_wave_snr: Option<f64>,
    ) -> Result<(), RenderError> {
        tracing::debug!(?tx, ?rx, ?likelihood, ?ground_wave_snr, "updating map overlay");
        if !tx.is_finite() || !rx.is_finite() {
            tracing::error!(?tx, ?rx, "invalid coordinates for map overlay");
            return Err(RenderError::InvalidCoordinates);
        }

        self.clear();

        let mid = sky_path_midpoint(tx, rx);

        self.tx_marker = Some(Marker {
            position: tx,
            label: "Transmitter",
        });
        self.rx_marker = Some(Marker {
            position: rx,
            label: "Receiver",
        });

        let ground_style = match ground_wave_snr {
            Some(snr) if snr.is_finite() && snr > 0.0 => StyleBucket::Good,
            _ => StyleBucket::Poor,
        };
        self.ground_path = Some(PathLine {
            kind: PathKind::Ground,
            points: vec![tx, rx],
            style: ground_style,
        });
        self.sky_path = Some(PathLine {
            kind: PathKind::Sky,
            points: vec![tx, mid, rx],
            style: SkywaveLikelihood::from_label(likelihood).sky_path_bucket(),
        });

        match fit_bounds(tx, rx) {
            Some(bounds) => self.viewport = bounds,
            None => tracing::warn!("could not fit map bounds"),
        }
        tracing::debug!(viewport = ?self.viewport, "map overlay updated");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TX: LatLon = LatLon::new(40.0, -100.0);
    const RX: LatLon = LatLon::new(40.0, -90.0);

    #[test]
    fn redraw_places_two_markers_and_two_lines() {
        let mut overlay = MapOverlay::new();
        overlay.redraw(TX, RX, Some("Good"), Some(12.34)).unwrap();

        let labels: Vec<_> = overlay.markers().map(|m| m.label).collect();
        assert_eq!(labels, ["Transmitter", "Receiver"]);
        assert_eq!(
            overlay.markers().next().unwrap().detail(),
            "Lat: 40.0000, Lon: -100.0000"
        );

        let ground = overlay.ground_path().unwrap();
        assert_eq!(ground.points, vec![TX, RX]);
        assert_eq!(ground.style, StyleBucket::Good);

        let sky = overlay.sky_path().unwrap();
        assert_eq!(sky.points.len(), 3);
        assert_eq!(sky.segments().count(), 2);
        assert_eq!(sky.style, StyleBucket::Good);

        let viewport = overlay.viewport();
        assert!(viewport.contains(TX));
        assert!(viewport.contains(RX));
    }

    #[test]
    fn redraw_is_idempotent() {
        let mut overlay = MapOverlay::new();
        overlay.redraw(TX, RX, Some("Fair"), Some(-3.0)).unwrap();
        overlay.redraw(TX, RX, Some("Fair"), Some(-3.0)).unwrap();
        assert_eq!(overlay.markers().count(), 2);
        assert_eq!(overlay.paths().count(), 2);
        assert_eq!(overlay.ground_path().unwrap().style, StyleBucket::Poor);
        assert_eq!(overlay.sky_path().unwrap().style, StyleBucket::Fair);
    }

    #[test]
    fn ground_wave_and_unknown_labels_draw_sky_as_poor() {
        let mut overlay = MapOverlay::new();
        overlay.redraw(TX, RX, Some("Fair (GW?)"), None).unwrap();
        assert_eq!(overlay.sky_path().unwrap().style, StyleBucket::Poor);
        assert_eq!(overlay.ground_path().unwrap().style, StyleBucket::Poor);

        overlay.redraw(TX, RX, None, Some(f64::INFINITY)).unwrap();
        assert_eq!(overlay.sky_path().unwrap().style, StyleBucket::Poor);
        assert_eq!(overlay.ground_path().unwrap().style, StyleBucket::Poor);
    }

    #[test]
    fn invalid_coordinates_keep_previous_overlay() {
        let mut overlay = MapOverlay::new();
        overlay.redraw(TX, RX, Some("Good"), Some(1.0)).unwrap();
        let before = overlay.clone();

        let err = overlay
            .redraw(LatLon::new(f64::NAN, 0.0), RX, Some("Good"), Some(1.0))
            .unwrap_err();
        assert_eq!(err, RenderError::InvalidCoordinates);
        assert_eq!(overlay, before);
    }

    #[test]
    fn extreme_but_finite_coordinates_always_draw() {
        let mut overlay = MapOverlay::new();
        let pole = LatLon::new(90.0, 180.0);
        let dateline = LatLon::new(-90.0, -180.0);

        overlay.redraw(pole, dateline, Some("Fair"), Some(-1.0)).unwrap();

        let sky = overlay.sky_path().unwrap();
        assert_eq!(sky.points.len(), 3);
        assert!(sky.points.iter().all(|p| p.is_finite()));
        assert_eq!(overlay.markers().count(), 2);
    }

    #[test]
    fn clear_removes_items_but_keeps_viewport() {
        let mut overlay = MapOverlay::new();
        overlay.redraw(TX, RX, Some("Good"), Some(1.0)).unwrap();
        let viewport = overlay.viewport();
        overlay.clear();
        assert!(overlay.is_empty());
        assert_eq!(overlay.viewport(), viewport);

        // Clearing twice is harmless.
        overlay.clear();
        assert!(overlay.is_empty());
    }
}
