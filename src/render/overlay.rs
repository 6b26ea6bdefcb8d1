use crate::domain::{Camera, Coordinate, MIN_RING_POINTS};
use crate::session::ScreenState;

pub const POLYGON_FILL_COLOR: &str = "rgba(0, 200, 0, 0.3)";
pub const MARKER_COLOR: &str = "red";

/// Filled region for one finalized polygon
#[derive(Debug, Clone, PartialEq)]
pub struct FillLayer {
    pub id: String,
    /// Closed ring, first coordinate repeated as last
    pub ring: Vec<Coordinate>,
    pub fill_color: &'static str,
}

/// Dot drawn on one tapped vertex
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    pub id: String,
    pub coordinate: Coordinate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GestureFlags {
    pub scroll_enabled: bool,
    pub zoom_enabled: bool,
}

/// Everything the map draws on top of the basemap, derived from screen state
#[derive(Debug, Clone, PartialEq)]
pub struct MapOverlay {
    pub fills: Vec<FillLayer>,
    /// Preview of the polygon being drawn
    pub line_strip: Option<Vec<Coordinate>>,
    pub markers: Vec<Marker>,
    pub camera: Camera,
    pub gestures: GestureFlags,
}

pub fn overlay(state: &ScreenState) -> MapOverlay {
    let fills = state
        .polygons()
        .enumerate()
        .map(|(i, ring)| FillLayer {
            id: format!("polygon-{i}"),
            ring: ring.coords().to_vec(),
            fill_color: POLYGON_FILL_COLOR,
        })
        .collect();

    let markers = state
        .points()
        .iter()
        .enumerate()
        .map(|(i, &coordinate)| Marker {
            id: format!("point-{i}"),
            coordinate,
        })
        .collect();

    let line_strip = if state.is_drawing() {
        preview_strip(state.points())
    } else {
        None
    };

    MapOverlay {
        fills,
        line_strip,
        markers,
        camera: *state.camera(),
        gestures: GestureFlags {
            scroll_enabled: !state.is_drawing(),
            zoom_enabled: !state.is_drawing(),
        },
    }
}

/// Tapped points in order, closed back to the first one once they could form a ring
fn preview_strip(points: &[Coordinate]) -> Option<Vec<Coordinate>> {
    if points.len() < 2 {
        return None;
    }

    let mut strip = points.to_vec();
    if points.len() >= MIN_RING_POINTS {
        strip.push(points[0]);
    }
    Some(strip)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Event, SessionSettings, reduce};

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    fn drawing_with(points: &[Coordinate]) -> ScreenState {
        let settings = SessionSettings::default();
        let mut state = reduce(&ScreenState::default(), Event::ToggleDrawing, &settings).state;
        for &p in points {
            state = reduce(&state, Event::MapPressed(p), &settings).state;
        }
        state
    }

    #[test]
    fn test_idle_overlay_is_empty_and_navigable() {
        let overlay = overlay(&ScreenState::default());
        assert!(overlay.fills.is_empty());
        assert!(overlay.markers.is_empty());
        assert!(overlay.line_strip.is_none());
        assert!(overlay.gestures.scroll_enabled);
        assert!(overlay.gestures.zoom_enabled);
    }

    #[test]
    fn test_drawing_disables_gestures() {
        let overlay = overlay(&drawing_with(&[]));
        assert!(!overlay.gestures.scroll_enabled);
        assert!(!overlay.gestures.zoom_enabled);
    }

    #[test]
    fn test_preview_open_until_three_points() {
        let one = overlay(&drawing_with(&[c(0.0, 0.0)]));
        assert!(one.line_strip.is_none());
        assert_eq!(one.markers.len(), 1);

        let two = overlay(&drawing_with(&[c(0.0, 0.0), c(0.0, 1.0)]));
        assert_eq!(two.line_strip, Some(vec![c(0.0, 0.0), c(0.0, 1.0)]));
    }

    #[test]
    fn test_preview_closes_with_three_points() {
        let points = [c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)];
        let overlay = overlay(&drawing_with(&points));

        assert_eq!(
            overlay.line_strip,
            Some(vec![c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(0.0, 0.0)])
        );
        let ids: Vec<&str> = overlay.markers.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, ["point-0", "point-1", "point-2"]);
    }

    #[test]
    fn test_completed_polygon_becomes_fill() {
        let settings = SessionSettings::default();
        let state = drawing_with(&[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0)]);
        let state = reduce(&state, Event::CompletePolygon, &settings).state;

        let overlay = overlay(&state);
        assert_eq!(overlay.fills.len(), 1);
        assert_eq!(overlay.fills[0].id, "polygon-0");
        assert_eq!(overlay.fills[0].ring.len(), 4);
        assert_eq!(overlay.fills[0].fill_color, POLYGON_FILL_COLOR);
        assert!(overlay.markers.is_empty());
        assert!(overlay.line_strip.is_none());
    }
}
