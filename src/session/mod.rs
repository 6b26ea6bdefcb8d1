pub mod alert;
pub mod event;
pub mod reducer;
pub mod state;

pub use alert::Alert;
pub use event::Event;
pub use reducer::{Outcome, reduce};
pub use state::{DrawingMode, ScreenState, SessionSettings};
