use thiserror::Error;

use super::{Area, Coordinate};

/// Fewest vertices a drawn polygon can have before it is closed
pub const MIN_RING_POINTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a ring needs at least {min} points, got {actual}", min = MIN_RING_POINTS)]
pub struct RingError {
    pub actual: usize,
}

/// Closed sequence of coordinates: the first coordinate is repeated as the last.
///
/// Only [`Ring::close`] builds one, so every `Ring` holds at least four
/// coordinates with matching ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Ring {
    coords: Vec<Coordinate>,
}

impl Ring {
    /// Close an open vertex chain by appending its first point.
    pub fn close(points: &[Coordinate]) -> Result<Self, RingError> {
        if points.len() < MIN_RING_POINTS {
            return Err(RingError {
                actual: points.len(),
            });
        }

        let mut coords = Vec::with_capacity(points.len() + 1);
        coords.extend_from_slice(points);
        coords.push(points[0]);

        Ok(Self { coords })
    }

    pub fn coords(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn len(&self) -> usize {
        self.coords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.coords.is_empty()
    }

    pub fn to_line_string(&self) -> geo::LineString<f64> {
        self.coords.iter().map(|&c| geo::Coord::from(c)).collect()
    }

    pub fn to_polygon(&self) -> geo::Polygon<f64> {
        geo::Polygon::new(self.to_line_string(), vec![])
    }
}

/// A finalized polygon together with its measured area
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnPolygon {
    pub ring: Ring,
    pub area: Area,
}

impl DrawnPolygon {
    pub fn new(ring: Ring, area: Area) -> Self {
        Self { ring, area }
    }
}
