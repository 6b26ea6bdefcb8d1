use super::{Fix, LocationError, LocationRequest, LocationService};
use crate::domain::Coordinate;

/// Always reports the same configured position
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation {
    coordinate: Coordinate,
}

impl FixedLocation {
    pub fn new(coordinate: Coordinate) -> Self {
        Self { coordinate }
    }
}

impl LocationService for FixedLocation {
    async fn current_position(&self, _request: &LocationRequest) -> Result<Fix, LocationError> {
        Ok(Fix::now(self.coordinate))
    }
}
