//! polyarea - Draw polygons on a map and measure their surface area

pub mod config;
pub mod domain;
pub mod geometry;
pub mod location;
pub mod render;
pub mod screen;
pub mod script;
pub mod session;
