//! Markers and the visibility set

use std::collections::BTreeSet;

use arview_oui::renderer::Color;
use arview_oui::spatial::Point3D;
use tracing::debug;

use crate::projection::{polar_to_offset, MARKER_SCALE};

/// A virtual object pinned at a fixed polar offset from the viewer
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub label: String,
    pub distance_meters: f32,
    /// Compass degrees, clockwise from north
    pub bearing_degrees: f32,
    pub color: Color,
}

impl Marker {
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        distance_meters: f32,
        bearing_degrees: f32,
        color: Color,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            distance_meters,
            bearing_degrees,
            color,
        }
    }

    /// Render-space position of this marker
    pub fn position(&self) -> Point3D {
        polar_to_offset(self.distance_meters, self.bearing_degrees, MARKER_SCALE).to_point()
    }

    /// Human-readable distance, switching to kilometers past 1000 m
    pub fn distance_text(&self) -> String {
        if self.distance_meters >= 1000.0 {
            format!("{:.1}km", self.distance_meters / 1000.0)
        } else {
            format!("{:.0}m", self.distance_meters)
        }
    }
}

/// A marker together with its computed render-space position
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedMarker<'a> {
    pub marker: &'a Marker,
    pub position: Point3D,
}

/// Place every marker in render space
pub fn place_markers(markers: &[Marker]) -> Vec<PlacedMarker<'_>> {
    markers
        .iter()
        .map(|marker| PlacedMarker {
            marker,
            position: marker.position(),
        })
        .collect()
}

/// The built-in catalog used when no configuration supplies markers
pub fn default_catalog() -> Vec<Marker> {
    vec![
        Marker::new("north-tower", "North Tower", 10.0, 0.0, Color::Red),
        Marker::new("kiosk", "Kiosk", 25.0, 45.0, Color::Magenta),
        Marker::new("east-gate", "East Gate", 20.0, 90.0, Color::Green),
        Marker::new("fountain", "Fountain", 15.0, 180.0, Color::Cyan),
        Marker::new("cafe", "Café", 8.0, 270.0, Color::Yellow),
    ]
}

/// Set of marker ids still shown.
///
/// Dismissal is one-way; ids never re-enter the set during a session.
#[derive(Debug, Clone, Default)]
pub struct VisibilityGate {
    visible: BTreeSet<String>,
}

impl VisibilityGate {
    /// Every marker starts visible
    pub fn from_markers(markers: &[Marker]) -> Self {
        Self {
            visible: markers.iter().map(|m| m.id.clone()).collect(),
        }
    }

    /// Hide a marker. Returns true if it was visible.
    pub fn dismiss(&mut self, id: &str) -> bool {
        let removed = self.visible.remove(id);
        if removed {
            debug!(marker = id, remaining = self.visible.len(), "marker dismissed");
        }
        removed
    }

    pub fn is_visible(&self, id: &str) -> bool {
        self.visible.contains(id)
    }

    pub fn visible_ids(&self) -> impl Iterator<Item = &str> {
        self.visible.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.visible.len()
    }

    pub fn is_empty(&self) -> bool {
        self.visible.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_position_uses_fixed_scale() {
        let marker = Marker::new("m", "M", 10.0, 90.0, Color::Red);
        let p = marker.position();
        assert!((p.x - 5.0).abs() < 1e-4);
        assert_eq!(p.y, 0.0);
        assert!(p.z.abs() < 1e-4);
    }

    #[test]
    fn test_distance_text() {
        assert_eq!(Marker::new("a", "A", 8.0, 0.0, Color::Red).distance_text(), "8m");
        assert_eq!(Marker::new("b", "B", 2500.0, 0.0, Color::Red).distance_text(), "2.5km");
    }

    #[test]
    fn test_place_markers_keeps_order() {
        let catalog = default_catalog();
        let placed = place_markers(&catalog);
        assert_eq!(placed.len(), catalog.len());
        for (p, m) in placed.iter().zip(&catalog) {
            assert_eq!(p.marker.id, m.id);
        }
    }

    #[test]
    fn test_dismiss_removes_exactly_one() {
        let catalog = default_catalog();
        let mut gate = VisibilityGate::from_markers(&catalog);
        assert_eq!(gate.len(), catalog.len());

        assert!(gate.dismiss("east-gate"));
        assert!(!gate.is_visible("east-gate"));
        for m in catalog.iter().filter(|m| m.id != "east-gate") {
            assert!(gate.is_visible(&m.id));
        }
        assert_eq!(gate.len(), catalog.len() - 1);
    }

    #[test]
    fn test_dismiss_is_one_way_and_idempotent() {
        let catalog = default_catalog();
        let mut gate = VisibilityGate::from_markers(&catalog);
        assert!(gate.dismiss("cafe"));
        assert!(!gate.dismiss("cafe"));
        assert!(!gate.dismiss("no-such-marker"));
        assert_eq!(gate.len(), catalog.len() - 1);
    }

    #[test]
    fn test_visible_ids_skip_dismissed() {
        let markers = vec![
            Marker::new("b", "B", 1.0, 0.0, Color::Red),
            Marker::new("a", "A", 1.0, 90.0, Color::Red),
            Marker::new("c", "C", 1.0, 180.0, Color::Red),
        ];
        let mut gate = VisibilityGate::from_markers(&markers);
        gate.dismiss("b");

        let ids: Vec<&str> = gate.visible_ids().collect();
        assert_eq!(ids, vec!["a", "c"]);
    }

    #[test]
    fn test_catalog_ids_unique() {
        let catalog = default_catalog();
        let gate = VisibilityGate::from_markers(&catalog);
        assert_eq!(gate.len(), catalog.len());
        assert!(!gate.is_empty());
    }
}
