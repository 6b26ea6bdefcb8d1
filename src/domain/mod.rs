pub mod area;
pub mod camera;
pub mod coordinate;
pub mod ring;

pub use area::{Area, SQUARE_METERS_PER_ACRE};
pub use camera::{AnimationMode, Camera};
pub use coordinate::Coordinate;
pub use ring::{DrawnPolygon, MIN_RING_POINTS, Ring, RingError};
