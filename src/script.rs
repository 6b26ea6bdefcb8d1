//! Line commands that stand in for map gestures and button presses
//!
//! ```text
//! draw                 toggle drawing mode (Draw / Finish Polygon)
//! tap <lon> <lat>      press the map
//! complete             Complete Polygon
//! locate               recenter on the user
//! moved <lon> <lat>    user-location update from the map
//! list | close         open or close the polygon list
//! button <label>       press an on-screen button, e.g. `button Locate Me`
//! show                 print the current overlay
//! export <path>        write the overlay as GeoJSON
//! quit
//! ```

use std::path::PathBuf;

use thiserror::Error;

use crate::domain::Coordinate;
use crate::session::Event;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Event(Event),
    /// A button named by its on-screen label
    Button(String),
    Show,
    Export(PathBuf),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("{command} expects {expected}")]
    MissingArgument {
        command: &'static str,
        expected: &'static str,
    },
    #[error("invalid number: {0}")]
    InvalidNumber(String),
    #[error("unexpected argument: {0}")]
    UnexpectedArgument(String),
}

/// Parse one line; blank lines and `#` comments yield `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, ScriptError> {
    let line = line.split('#').next().unwrap_or_default().trim();
    if line.is_empty() {
        return Ok(None);
    }

    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };

    let command = match name.to_ascii_lowercase().as_str() {
        "draw" | "toggle" => Command::Event(Event::ToggleDrawing),
        "tap" | "press" => Command::Event(Event::MapPressed(coordinate("tap", &mut words)?)),
        "complete" => Command::Event(Event::CompletePolygon),
        "locate" | "center" => Command::Event(Event::Recenter),
        "moved" => Command::Event(Event::LocationUpdated(coordinate("moved", &mut words)?)),
        "list" => Command::Event(Event::OpenPolygonList),
        "close" => Command::Event(Event::ClosePolygonList),
        "button" => {
            let label = words.by_ref().collect::<Vec<_>>().join(" ");
            if label.is_empty() {
                return Err(ScriptError::MissingArgument {
                    command: "button",
                    expected: "<label>",
                });
            }
            Command::Button(label)
        }
        "show" => Command::Show,
        "export" => {
            let path = words.next().ok_or(ScriptError::MissingArgument {
                command: "export",
                expected: "<path>",
            })?;
            Command::Export(PathBuf::from(path))
        }
        "quit" | "exit" => Command::Quit,
        other => return Err(ScriptError::UnknownCommand(other.to_string())),
    };

    if let Some(extra) = words.next() {
        return Err(ScriptError::UnexpectedArgument(extra.to_string()));
    }

    Ok(Some(command))
}

fn coordinate<'a>(
    command: &'static str,
    words: &mut impl Iterator<Item = &'a str>,
) -> Result<Coordinate, ScriptError> {
    let missing = ScriptError::MissingArgument {
        command,
        expected: "<lon> <lat>",
    };
    let lon = number(words.next().ok_or(missing.clone())?)?;
    let lat = number(words.next().ok_or(missing)?)?;
    Ok(Coordinate::new(lon, lat))
}

fn number(word: &str) -> Result<f64, ScriptError> {
    word.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ScriptError::InvalidNumber(word.to_string()))
}
