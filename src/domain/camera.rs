use std::time::Duration;

use super::Coordinate;

/// How the map moves to a new camera position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationMode {
    #[default]
    FlyTo,
    Ease,
    Linear,
    None,
}

impl AnimationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnimationMode::FlyTo => "flyTo",
            AnimationMode::Ease => "easeTo",
            AnimationMode::Linear => "linearTo",
            AnimationMode::None => "none",
        }
    }
}

/// Visible viewport of the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub center: Coordinate,
    pub zoom: f64,
    pub animation_duration: Duration,
    pub mode: AnimationMode,
}

impl Camera {
    pub fn new(center: Coordinate, zoom: f64, animation_duration: Duration) -> Self {
        Self {
            center,
            zoom,
            animation_duration,
            mode: AnimationMode::FlyTo,
        }
    }

    /// Same zoom and transition, new center
    pub fn centered_on(self, center: Coordinate) -> Self {
        Self { center, ..self }
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Coordinate::new(0.0, 0.0), 10.0, Duration::from_millis(1000))
    }
}
