pub mod controls;
pub mod geojson;
pub mod list;
pub mod overlay;

pub use controls::{Control, ControlEvent, area_cards, controls, press};
pub use geojson::{feature_collection, write_geojson};
pub use list::{PolygonList, PolygonRow};
pub use overlay::{FillLayer, GestureFlags, MapOverlay, Marker, overlay};
