use std::time::Duration;

use crate::domain::{Area, Camera, Coordinate, DrawnPolygon, Ring};
use crate::geometry::AreaMethod;

/// Tunables the reducer needs; built from the file config
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionSettings {
    /// Maximum number of finalized polygons kept on the map
    pub capacity: usize,
    pub area_method: AreaMethod,
    /// Zoom applied when recentering on the user
    pub recenter_zoom: f64,
    /// Transition applied when recentering on the user
    pub recenter_animation: Duration,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            capacity: 15,
            area_method: AreaMethod::Spherical,
            recenter_zoom: 10.0,
            recenter_animation: Duration::from_millis(1000),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DrawingMode {
    #[default]
    Idle,
    Drawing,
}

/// Everything the map screen shows, as one value.
///
/// Polygons and their areas live in a single vector so the two collections
/// can never fall out of step.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ScreenState {
    pub(crate) user_location: Option<Coordinate>,
    pub(crate) camera: Camera,
    pub(crate) mode: DrawingMode,
    pub(crate) points: Vec<Coordinate>,
    pub(crate) polygons: Vec<DrawnPolygon>,
    pub(crate) list_visible: bool,
    /// Set once permission is refused; holds until the next launch
    pub(crate) location_denied: bool,
}

impl ScreenState {
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            ..Default::default()
        }
    }

    pub fn user_location(&self) -> Option<Coordinate> {
        self.user_location
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn mode(&self) -> DrawingMode {
        self.mode
    }

    pub fn is_drawing(&self) -> bool {
        self.mode == DrawingMode::Drawing
    }

    /// Vertices tapped in the current drawing session
    pub fn points(&self) -> &[Coordinate] {
        &self.points
    }

    pub fn drawn(&self) -> &[DrawnPolygon] {
        &self.polygons
    }

    pub fn polygons(&self) -> impl ExactSizeIterator<Item = &Ring> + '_ {
        self.polygons.iter().map(|p| &p.ring)
    }

    pub fn areas(&self) -> impl ExactSizeIterator<Item = Area> + '_ {
        self.polygons.iter().map(|p| p.area)
    }

    pub fn polygon_count(&self) -> usize {
        self.polygons.len()
    }

    pub fn is_list_visible(&self) -> bool {
        self.list_visible
    }

    pub fn is_location_denied(&self) -> bool {
        self.location_denied
    }
}
