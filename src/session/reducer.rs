//! Pure state transitions for the map screen
//!
//! `reduce` maps the current state and one event to the next state plus an
//! optional alert. It performs no I/O, so the whole drawing workflow can be
//! exercised without a map or a terminal.

use crate::domain::{Camera, DrawnPolygon, Ring};

use super::{Alert, DrawingMode, Event, ScreenState, SessionSettings};

/// Result of applying one event
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub state: ScreenState,
    pub alert: Option<Alert>,
}

impl Outcome {
    fn quiet(state: ScreenState) -> Self {
        Self { state, alert: None }
    }

    fn alert(state: ScreenState, alert: Alert) -> Self {
        Self {
            state,
            alert: Some(alert),
        }
    }
}

pub fn reduce(state: &ScreenState, event: Event, settings: &SessionSettings) -> Outcome {
    let mut next = state.clone();

    match event {
        Event::ToggleDrawing => {
            // Both directions start from an empty vertex chain
            next.points.clear();
            next.mode = match state.mode {
                DrawingMode::Idle => DrawingMode::Drawing,
                DrawingMode::Drawing => DrawingMode::Idle,
            };
            Outcome::quiet(next)
        }
        Event::MapPressed(coordinate) => {
            if next.is_drawing() {
                next.points.push(coordinate);
            }
            Outcome::quiet(next)
        }
        Event::CompletePolygon => complete_polygon(next, settings),
        Event::Recenter => match state.user_location {
            Some(location) => {
                next.camera = Camera::new(
                    location,
                    settings.recenter_zoom,
                    settings.recenter_animation,
                );
                Outcome::quiet(next)
            }
            None => Outcome::alert(next, Alert::LocationUnavailable),
        },
        Event::LocationFixed(_) | Event::LocationUpdated(_) if state.location_denied => {
            Outcome::quiet(next)
        }
        Event::LocationFixed(coordinate) => {
            next.user_location = Some(coordinate);
            next.camera = state.camera.centered_on(coordinate);
            Outcome::quiet(next)
        }
        Event::LocationUpdated(coordinate) => {
            next.user_location = Some(coordinate);
            Outcome::quiet(next)
        }
        Event::PermissionDenied => {
            next.location_denied = true;
            next.user_location = None;
            Outcome::alert(next, Alert::PermissionDenied)
        }
        Event::OpenPolygonList => {
            next.list_visible = true;
            Outcome::quiet(next)
        }
        Event::ClosePolygonList => {
            next.list_visible = false;
            Outcome::quiet(next)
        }
    }
}

fn complete_polygon(mut next: ScreenState, settings: &SessionSettings) -> Outcome {
    if !next.is_drawing() {
        return Outcome::quiet(next);
    }

    let ring = match Ring::close(&next.points) {
        Ok(ring) => ring,
        Err(err) => return Outcome::alert(next, Alert::too_few_points(err.actual)),
    };

    next.points.clear();
    next.mode = DrawingMode::Idle;

    if next.polygons.len() >= settings.capacity {
        return Outcome::alert(
            next,
            Alert::CapacityReached {
                capacity: settings.capacity,
            },
        );
    }

    let area = settings.area_method.measure(&ring);
    next.polygons.push(DrawnPolygon::new(ring, area));

    Outcome::quiet(next)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{AnimationMode, Coordinate};
    use std::time::Duration;

    fn c(lon: f64, lat: f64) -> Coordinate {
        Coordinate::new(lon, lat)
    }

    fn apply(state: ScreenState, events: &[Event], settings: &SessionSettings) -> Outcome {
        let mut outcome = Outcome::quiet(state);
        for &event in events {
            outcome = reduce(&outcome.state, event, settings);
        }
        outcome
    }

    fn triangle_events() -> Vec<Event> {
        vec![
            Event::ToggleDrawing,
            Event::MapPressed(c(0.0, 0.0)),
            Event::MapPressed(c(0.0, 1.0)),
            Event::MapPressed(c(1.0, 1.0)),
            Event::CompletePolygon,
        ]
    }

    fn assert_aligned(state: &ScreenState) {
        assert_eq!(
            state.polygons().len(),
            state.areas().len(),
            "polygon and area collections must stay index-aligned"
        );
    }

    #[test]
    fn test_toggle_enters_and_leaves_drawing() {
        let settings = SessionSettings::default();
        let state = ScreenState::default();
        assert_eq!(state.mode(), DrawingMode::Idle);

        let on = reduce(&state, Event::ToggleDrawing, &settings);
        assert!(on.state.is_drawing());
        assert!(on.alert.is_none());

        let off = reduce(&on.state, Event::ToggleDrawing, &settings);
        assert_eq!(off.state.mode(), DrawingMode::Idle);
    }

    #[test]
    fn test_press_ignored_while_idle() {
        let settings = SessionSettings::default();
        let outcome = reduce(
            &ScreenState::default(),
            Event::MapPressed(c(3.0, 4.0)),
            &settings,
        );
        assert!(outcome.state.points().is_empty());
    }

    #[test]
    fn test_presses_append_in_order() {
        let settings = SessionSettings::default();
        let outcome = apply(
            ScreenState::default(),
            &[
                Event::ToggleDrawing,
                Event::MapPressed(c(1.0, 2.0)),
                Event::MapPressed(c(3.0, 4.0)),
            ],
            &settings,
        );
        assert_eq!(outcome.state.points(), &[c(1.0, 2.0), c(3.0, 4.0)]);
    }

    #[test]
    fn test_complete_triangle_scenario() {
        let settings = SessionSettings::default();
        let outcome = apply(ScreenState::default(), &triangle_events(), &settings);
        let state = &outcome.state;

        assert!(outcome.alert.is_none());
        assert_eq!(state.polygon_count(), 1);
        let ring = state.polygons().next().unwrap();
        assert_eq!(
            ring.coords(),
            &[c(0.0, 0.0), c(0.0, 1.0), c(1.0, 1.0), c(0.0, 0.0)]
        );
        let area = state.areas().next().unwrap();
        assert!(area.square_meters > 0.0);
        assert_eq!(area.acres, area.square_meters / 4046.86);

        assert!(state.points().is_empty());
        assert_eq!(state.mode(), DrawingMode::Idle);
        assert_aligned(state);
    }

    #[test]
    fn test_complete_with_too_few_points_changes_nothing() {
        let settings = SessionSettings::default();
        let before = apply(
            ScreenState::default(),
            &[
                Event::ToggleDrawing,
                Event::MapPressed(c(0.0, 0.0)),
                Event::MapPressed(c(0.0, 1.0)),
            ],
            &settings,
        )
        .state;

        let outcome = reduce(&before, Event::CompletePolygon, &settings);
        assert_eq!(outcome.alert, Some(Alert::TooFewPoints { actual: 2 }));
        assert_eq!(outcome.state, before);
        assert!(outcome.state.is_drawing());
        assert_eq!(outcome.state.polygon_count(), 0);
    }

    #[test]
    fn test_complete_while_idle_is_noop() {
        let settings = SessionSettings::default();
        let state = ScreenState::default();
        let outcome = reduce(&state, Event::CompletePolygon, &settings);
        assert_eq!(outcome.state, state);
        assert!(outcome.alert.is_none());
    }

    #[test]
    fn test_complete_at_capacity_discards_polygon() {
        let settings = SessionSettings {
            capacity: 2,
            ..Default::default()
        };

        let mut events = triangle_events();
        events.extend(triangle_events());
        let full = apply(ScreenState::default(), &events, &settings).state;
        assert_eq!(full.polygon_count(), 2);

        let drawing = apply(
            full.clone(),
            &[
                Event::ToggleDrawing,
                Event::MapPressed(c(5.0, 5.0)),
                Event::MapPressed(c(5.0, 6.0)),
                Event::MapPressed(c(6.0, 6.0)),
            ],
            &settings,
        )
        .state;

        let outcome = reduce(&drawing, Event::CompletePolygon, &settings);
        assert_eq!(outcome.alert, Some(Alert::CapacityReached { capacity: 2 }));
        assert_eq!(outcome.state.drawn(), full.drawn());
        assert!(outcome.state.points().is_empty());
        assert_eq!(outcome.state.mode(), DrawingMode::Idle);
        assert_aligned(&outcome.state);
    }

    #[test]
    fn test_abandoned_session_starts_empty() {
        let settings = SessionSettings::default();
        let outcome = apply(
            ScreenState::default(),
            &[
                Event::ToggleDrawing,
                Event::MapPressed(c(0.0, 0.0)),
                Event::ToggleDrawing,
            ],
            &settings,
        );
        assert!(outcome.alert.is_none());
        assert!(outcome.state.points().is_empty());
        assert_eq!(outcome.state.polygon_count(), 0);

        let again = reduce(&outcome.state, Event::ToggleDrawing, &settings);
        assert!(again.state.is_drawing());
        assert!(again.state.points().is_empty());
    }

    #[test]
    fn test_recenter_without_location_alerts() {
        let settings = SessionSettings::default();
        let state = ScreenState::default();
        let outcome = reduce(&state, Event::Recenter, &settings);
        assert_eq!(outcome.alert, Some(Alert::LocationUnavailable));
        assert_eq!(outcome.state.camera(), state.camera());
    }

    #[test]
    fn test_recenter_resets_zoom_and_animation() {
        let settings = SessionSettings {
            recenter_zoom: 14.0,
            recenter_animation: Duration::from_millis(500),
            ..Default::default()
        };
        let start = ScreenState::new(Camera::new(c(0.0, 0.0), 3.0, Duration::ZERO));
        let outcome = apply(
            start,
            &[Event::LocationUpdated(c(7.0, 8.0)), Event::Recenter],
            &settings,
        );
        let camera = outcome.state.camera();
        assert_eq!(camera.center, c(7.0, 8.0));
        assert_eq!(camera.zoom, 14.0);
        assert_eq!(camera.animation_duration, Duration::from_millis(500));
        assert_eq!(camera.mode, AnimationMode::FlyTo);
    }

    #[test]
    fn test_location_fix_moves_camera_center_only() {
        let settings = SessionSettings::default();
        let start = ScreenState::new(Camera::new(c(0.0, 0.0), 3.0, Duration::ZERO));
        let outcome = reduce(&start, Event::LocationFixed(c(2.0, 1.0)), &settings);
        assert_eq!(outcome.state.user_location(), Some(c(2.0, 1.0)));
        assert_eq!(outcome.state.camera().center, c(2.0, 1.0));
        assert_eq!(outcome.state.camera().zoom, 3.0);
    }

    #[test]
    fn test_location_update_keeps_camera() {
        let settings = SessionSettings::default();
        let start = ScreenState::default();
        let outcome = reduce(&start, Event::LocationUpdated(c(2.0, 1.0)), &settings);
        assert_eq!(outcome.state.user_location(), Some(c(2.0, 1.0)));
        assert_eq!(outcome.state.camera(), start.camera());
    }

    #[test]
    fn test_permission_denied_alerts_and_keeps_camera() {
        let settings = SessionSettings::default();
        let start = ScreenState::default();
        let outcome = reduce(&start, Event::PermissionDenied, &settings);
        assert_eq!(outcome.alert, Some(Alert::PermissionDenied));
        assert!(outcome.state.is_location_denied());
        assert_eq!(outcome.state.camera(), start.camera());
        assert!(outcome.state.user_location().is_none());
    }

    #[test]
    fn test_location_ignored_after_denial() {
        let settings = SessionSettings::default();
        let denied = reduce(&ScreenState::default(), Event::PermissionDenied, &settings).state;

        let outcome = apply(
            denied.clone(),
            &[
                Event::LocationUpdated(c(5.0, 6.0)),
                Event::LocationFixed(c(5.0, 6.0)),
            ],
            &settings,
        );
        assert!(outcome.alert.is_none());
        assert_eq!(outcome.state, denied);

        let recenter = reduce(&outcome.state, Event::Recenter, &settings);
        assert_eq!(recenter.alert, Some(Alert::LocationUnavailable));
        assert_eq!(recenter.state.camera(), denied.camera());
    }

    #[test]
    fn test_list_visibility_touches_nothing_else() {
        let settings = SessionSettings::default();
        let drawn = apply(ScreenState::default(), &triangle_events(), &settings).state;

        let open = reduce(&drawn, Event::OpenPolygonList, &settings).state;
        assert!(open.is_list_visible());

        let closed = reduce(&open, Event::ClosePolygonList, &settings).state;
        assert!(!closed.is_list_visible());
        assert_eq!(closed, drawn);
    }

    #[test]
    fn test_collections_stay_aligned_over_mixed_events() {
        let settings = SessionSettings {
            capacity: 3,
            ..Default::default()
        };
        let mut state = ScreenState::default();
        let script = [
            Event::ToggleDrawing,
            Event::MapPressed(c(0.0, 0.0)),
            Event::CompletePolygon,
            Event::MapPressed(c(0.0, 0.5)),
            Event::MapPressed(c(0.5, 0.5)),
            Event::CompletePolygon,
            Event::ToggleDrawing,
            Event::CompletePolygon,
            Event::ToggleDrawing,
        ];
        for _ in 0..4 {
            for &event in &script {
                state = reduce(&state, event, &settings).state;
                assert_aligned(&state);
                assert!(state.polygon_count() <= settings.capacity);
            }
        }
        assert_eq!(state.polygon_count(), 3);
    }
}
