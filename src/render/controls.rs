use crate::session::{Event, ScreenState};

/// A tappable button on the map screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Control {
    pub label: &'static str,
    pub event: ControlEvent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlEvent {
    Recenter,
    ToggleDrawing,
    CompletePolygon,
    OpenPolygonList,
    ClosePolygonList,
}

impl From<ControlEvent> for Event {
    fn from(event: ControlEvent) -> Self {
        match event {
            ControlEvent::Recenter => Event::Recenter,
            ControlEvent::ToggleDrawing => Event::ToggleDrawing,
            ControlEvent::CompletePolygon => Event::CompletePolygon,
            ControlEvent::OpenPolygonList => Event::OpenPolygonList,
            ControlEvent::ClosePolygonList => Event::ClosePolygonList,
        }
    }
}

/// Buttons currently on screen, in layout order
pub fn controls(state: &ScreenState) -> Vec<Control> {
    let mut controls = vec![
        Control {
            label: "Locate Me",
            event: ControlEvent::Recenter,
        },
        Control {
            label: if state.is_drawing() {
                "Finish Polygon"
            } else {
                "Draw Polygon"
            },
            event: ControlEvent::ToggleDrawing,
        },
    ];

    if state.is_drawing() {
        controls.push(Control {
            label: "Complete Polygon",
            event: ControlEvent::CompletePolygon,
        });
    }

    if state.is_list_visible() {
        controls.push(Control {
            label: "Close",
            event: ControlEvent::ClosePolygonList,
        });
    } else if state.polygon_count() > 0 {
        controls.push(Control {
            label: "Show Polygons",
            event: ControlEvent::OpenPolygonList,
        });
    }

    controls
}

/// Event for the on-screen button with this label (case-insensitive)
pub fn press(state: &ScreenState, label: &str) -> Option<Event> {
    controls(state)
        .into_iter()
        .find(|control| control.label.eq_ignore_ascii_case(label))
        .map(|control| control.event.into())
}

/// Per-polygon area cards stacked over the map, in square meters
pub fn area_cards(state: &ScreenState) -> Vec<String> {
    state
        .areas()
        .map(|area| format!("Polygon Area: {:.2} m²", area.square_meters))
        .collect()
}
