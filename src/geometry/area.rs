use geo::orient::{Direction, Orient};
use geo::{ChamberlainDuquetteArea, GeodesicArea};
use serde::Deserialize;

use crate::domain::{Area, Ring};

/// Formula used to measure the surface enclosed by a ring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum AreaMethod {
    /// Spherical approximation on a 6378137 m sphere (Chamberlain & Duquette)
    #[default]
    Spherical,
    /// Ellipsoidal geodesic area on WGS84 (Karney)
    Geodesic,
}

impl AreaMethod {
    /// Unsigned area of the ring in square meters, whichever way it was tapped
    pub fn square_meters(self, ring: &Ring) -> f64 {
        // The geodesic formula reads a clockwise exterior as the rest of the globe
        let polygon = ring.to_polygon().orient(Direction::Default);
        match self {
            AreaMethod::Spherical => polygon.chamberlain_duquette_unsigned_area(),
            AreaMethod::Geodesic => polygon.geodesic_area_unsigned(),
        }
    }

    pub fn measure(self, ring: &Ring) -> Area {
        Area::from_square_meters(self.square_meters(ring))
    }
}
