use crate::domain::Coordinate;

/// Discrete inputs the map screen reacts to
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The draw button: starts a session, or abandons the current one
    ToggleDrawing,
    /// A press on the map at the given position
    MapPressed(Coordinate),
    /// The complete button shown while drawing
    CompletePolygon,
    /// The locate button
    Recenter,
    /// One-shot position fix obtained at startup
    LocationFixed(Coordinate),
    /// Position reported by the map's live user-location stream
    LocationUpdated(Coordinate),
    /// The platform refused location access
    PermissionDenied,
    OpenPolygonList,
    ClosePolygonList,
}
