use thiserror::Error;

use crate::domain::MIN_RING_POINTS;

/// User-facing notices raised by the reducer.
///
/// Each one is terminal: it is shown once and nothing retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Alert {
    #[error("Location permission denied.")]
    PermissionDenied,
    #[error("A polygon requires at least three points.")]
    TooFewPoints { actual: usize },
    #[error("Maximum of {capacity} polygons reached.")]
    CapacityReached { capacity: usize },
    #[error("User location not available.")]
    LocationUnavailable,
}

impl Alert {
    pub fn too_few_points(actual: usize) -> Self {
        debug_assert!(actual < MIN_RING_POINTS);
        Alert::TooFewPoints { actual }
    }
}
