//! The map screen: owns the state, feeds events through the reducer and
//! prints what the map would show.

use std::io::Write;
use std::pin::pin;

use anyhow::{Context, Result};
use indicatif::ProgressBar;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::oneshot;
use tracing::{debug, error, info, warn};

use crate::domain::{Camera, Coordinate};
use crate::location::{AcquireError, LocationRequest, LocationService, Permission, fetch_position};
use crate::render::{self, MapOverlay, PolygonList};
use crate::script::{self, Command};
use crate::session::{Alert, Event, ScreenState, SessionSettings, reduce};

#[derive(Debug)]
pub struct MapScreen {
    state: ScreenState,
    settings: SessionSettings,
}

impl MapScreen {
    pub fn new(settings: SessionSettings, camera: Camera) -> Self {
        info!(
            "Map loaded at ({:.4}, {:.4}), zoom {}",
            camera.center.lon, camera.center.lat, camera.zoom
        );
        Self {
            state: ScreenState::new(camera),
            settings,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Apply one event; each call runs to completion before the next.
    pub fn dispatch(&mut self, event: Event) -> Option<Alert> {
        let outcome = reduce(&self.state, event, &self.settings);
        debug!(
            ?event,
            mode = ?outcome.state.mode(),
            points = outcome.state.points().len(),
            polygons = outcome.state.polygon_count(),
            "event applied"
        );
        if let Some(alert) = &outcome.alert {
            warn!("{alert}");
        }
        self.state = outcome.state;
        outcome.alert
    }

    /// Turn the startup location query result into state changes.
    ///
    /// Fetch failures are only logged; the camera keeps its default center.
    pub fn apply_location(&mut self, result: Result<Coordinate, AcquireError>) -> Option<Alert> {
        match result {
            Ok(coordinate) => self.dispatch(Event::LocationFixed(coordinate)),
            Err(AcquireError::Cancelled) => {
                debug!("location request cancelled");
                None
            }
            Err(err) => {
                error!("Error fetching location: {err}");
                None
            }
        }
    }

    pub fn overlay(&self) -> MapOverlay {
        render::overlay(&self.state)
    }

    pub fn polygon_list(&self) -> PolygonList {
        PolygonList::from_state(&self.state)
    }

    /// Run one parsed command, writing any visible result to `out`.
    pub fn execute<W: Write>(&mut self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::Event(event) => {
                let alert = self.dispatch(event);
                if let Some(alert) = alert {
                    writeln!(out, "alert: {alert}")?;
                }
                self.print_status(out)?;
            }
            Command::Button(label) => match render::press(&self.state, &label) {
                Some(event) => self.execute(Command::Event(event), out)?,
                None => writeln!(out, "error: no button labelled {label:?} on screen")?,
            },
            Command::Show => self.print_overlay(out)?,
            Command::Export(path) => {
                render::write_geojson(&path, &self.overlay())
                    .with_context(|| format!("Failed to export overlay to {}", path.display()))?;
                writeln!(out, "exported {}", path.display())?;
            }
            Command::Quit => {}
        }
        Ok(())
    }

    fn print_status<W: Write>(&self, out: &mut W) -> Result<()> {
        let state = &self.state;
        if state.is_drawing() {
            writeln!(out, "drawing: {} point(s)", state.points().len())?;
        }
        for card in render::area_cards(state) {
            writeln!(out, "  {card}")?;
        }
        if state.is_list_visible() {
            write!(out, "{}", self.polygon_list())?;
        }
        let labels: Vec<&str> = render::controls(state).iter().map(|c| c.label).collect();
        writeln!(out, "buttons: {}", labels.join(" | "))?;
        Ok(())
    }

    fn print_overlay<W: Write>(&self, out: &mut W) -> Result<()> {
        let overlay = self.overlay();
        let camera = &overlay.camera;
        writeln!(
            out,
            "camera: ({:.6}, {:.6}) zoom {} {} {}ms",
            camera.center.lon,
            camera.center.lat,
            camera.zoom,
            camera.mode.as_str(),
            camera.animation_duration.as_millis()
        )?;
        writeln!(
            out,
            "gestures: scroll {} zoom {}",
            on_off(overlay.gestures.scroll_enabled),
            on_off(overlay.gestures.zoom_enabled)
        )?;
        match self.state.user_location() {
            Some(c) => writeln!(out, "user: ({:.6}, {:.6})", c.lon, c.lat)?,
            None => writeln!(out, "user: unknown")?,
        }
        for fill in &overlay.fills {
            writeln!(out, "fill {}: {} vertices", fill.id, fill.ring.len())?;
        }
        if let Some(strip) = &overlay.line_strip {
            writeln!(out, "preview: {} segment(s)", strip.len() - 1)?;
        }
        for marker in &overlay.markers {
            writeln!(
                out,
                "marker {}: ({:.6}, {:.6})",
                marker.id, marker.coordinate.lon, marker.coordinate.lat
            )?;
        }
        Ok(())
    }
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}

/// Hosts a [`MapScreen`] and its one-shot startup location query
pub struct ScreenHost<L> {
    screen: MapScreen,
    location: L,
    request: LocationRequest,
    spinner: Option<ProgressBar>,
}

impl<L: LocationService> ScreenHost<L> {
    pub fn new(screen: MapScreen, location: L, request: LocationRequest) -> Self {
        Self {
            screen,
            location,
            request,
            spinner: None,
        }
    }

    /// Spinner shown until the startup location query settles
    pub fn with_spinner(mut self, spinner: ProgressBar) -> Self {
        self.spinner = Some(spinner);
        self
    }

    pub fn screen(&self) -> &MapScreen {
        &self.screen
    }

    pub fn into_screen(self) -> MapScreen {
        self.screen
    }

    /// Process commands until input ends, `quit`, or Ctrl-C.
    ///
    /// The location query runs alongside command handling. It is tied to
    /// this call: leaving the loop drops the teardown sender, which cancels
    /// a query still in flight.
    pub async fn run<R, W>(&mut self, permission: Permission, commands: R, out: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: Write,
    {
        let Self {
            screen,
            location,
            request,
            spinner,
        } = self;

        let (_teardown, cancelled) = oneshot::channel::<()>();
        let mut fetch = pin!(fetch_position(&*location, &*request, cancelled));
        let mut pending = match permission {
            Permission::Granted => true,
            Permission::Denied => {
                if let Some(alert) = screen.dispatch(Event::PermissionDenied) {
                    writeln!(out, "alert: {alert}")?;
                }
                false
            }
        };
        if !pending && let Some(spinner) = spinner.take() {
            spinner.finish_and_clear();
        }

        let mut lines = commands.lines();
        loop {
            tokio::select! {
                // A settled fix lands before the next command is read
                biased;
                result = &mut fetch, if pending => {
                    pending = false;
                    if let Some(spinner) = spinner.take() {
                        spinner.finish_and_clear();
                    }
                    if result.is_ok() {
                        writeln!(out, "location acquired")?;
                    }
                    if let Some(alert) = screen.apply_location(result) {
                        writeln!(out, "alert: {alert}")?;
                    }
                }
                line = lines.next_line() => {
                    let Some(line) = line.context("Failed to read command")? else {
                        break;
                    };
                    match script::parse_line(&line) {
                        Ok(None) => {}
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => screen.execute(command, out)?,
                        Err(err) => writeln!(out, "error: {err}")?,
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    info!("interrupted");
                    break;
                }
            }
        }

        if let Some(spinner) = spinner.take() {
            spinner.finish_and_clear();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::{FixedLocation, LocationProvider};
    use std::time::Duration;

    fn host<L: LocationService>(location: L) -> ScreenHost<L> {
        let screen = MapScreen::new(SessionSettings::default(), Camera::default());
        ScreenHost::new(screen, location, LocationRequest::default())
    }

    fn output(bytes: Vec<u8>) -> String {
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_dispatch_reports_alert() {
        let mut screen = MapScreen::new(SessionSettings::default(), Camera::default());
        assert_eq!(
            screen.dispatch(Event::Recenter),
            Some(Alert::LocationUnavailable)
        );
        assert_eq!(screen.dispatch(Event::ToggleDrawing), None);
        assert!(screen.state().is_drawing());
    }

    #[test]
    fn test_location_failure_is_silent() {
        let mut screen = MapScreen::new(SessionSettings::default(), Camera::default());
        let before = screen.state().clone();
        let alert = screen.apply_location(Err(AcquireError::Timeout(Duration::from_secs(90))));
        assert!(alert.is_none());
        assert_eq!(screen.state(), &before);
    }

    #[test]
    fn test_execute_prints_alert_and_buttons() {
        let mut screen = MapScreen::new(SessionSettings::default(), Camera::default());
        let mut out = Vec::new();
        screen.execute(Command::Event(Event::ToggleDrawing), &mut out).unwrap();
        screen.execute(Command::Event(Event::CompletePolygon), &mut out).unwrap();

        let text = output(out);
        assert!(text.contains("alert: A polygon requires at least three points."));
        assert!(text.contains("Complete Polygon"));
    }

    #[test]
    fn test_buttons_drive_the_screen() {
        let mut screen = MapScreen::new(SessionSettings::default(), Camera::default());
        let mut out = Vec::new();
        for label in ["Draw Polygon", "Complete Polygon", "Finish Polygon", "Show Polygons"] {
            screen.execute(Command::Button(label.to_string()), &mut out).unwrap();
        }

        let text = output(out);
        assert!(text.contains("alert: A polygon requires at least three points."));
        assert!(text.contains("error: no button labelled \"Show Polygons\" on screen"));
        assert!(!screen.state().is_drawing());

        let mut out = Vec::new();
        screen.execute(Command::Event(Event::OpenPolygonList), &mut out).unwrap();
        screen.execute(Command::Button("Close".to_string()), &mut out).unwrap();
        assert!(!screen.state().is_list_visible());
    }

    #[tokio::test]
    async fn test_run_script_draws_polygon() {
        let mut host = host(FixedLocation::new(Coordinate::new(10.0, 20.0)));
        let script = "draw\ntap 0 0\ntap 0 1\ntap 1 1\ncomplete\nlist\n";
        let mut out = Vec::new();

        host.run(Permission::Granted, script.as_bytes(), &mut out)
            .await
            .unwrap();

        let state = host.screen().state();
        assert_eq!(state.polygon_count(), 1);
        assert!(state.is_list_visible());
        let text = output(out);
        assert!(text.contains("Polygon 1"));
        assert!(text.contains("acres"));
    }

    #[tokio::test]
    async fn test_run_applies_fix_before_first_command() {
        for _ in 0..20 {
            let mut host = host(FixedLocation::new(Coordinate::new(10.0, 20.0)));
            let mut out = Vec::new();
            host.run(Permission::Granted, "locate\n".as_bytes(), &mut out)
                .await
                .unwrap();

            let text = output(out);
            assert!(!text.contains("alert:"), "unexpected alert in {text:?}");
            assert_eq!(
                host.screen().state().camera().center,
                Coordinate::new(10.0, 20.0)
            );
        }
    }

    #[tokio::test]
    async fn test_run_stops_at_quit() {
        let mut host = host(LocationProvider::None);
        let mut out = Vec::new();
        host.run(Permission::Granted, "draw\nquit\ndraw\n".as_bytes(), &mut out)
            .await
            .unwrap();
        assert!(host.screen().state().is_drawing());
    }

    #[tokio::test]
    async fn test_run_denied_permission_alerts() {
        let mut host = host(FixedLocation::new(Coordinate::new(10.0, 20.0)));
        let mut out = Vec::new();
        host.run(Permission::Denied, "locate\n".as_bytes(), &mut out)
            .await
            .unwrap();

        let text = output(out);
        assert!(text.contains("alert: Location permission denied."));
        assert!(text.contains("alert: User location not available."));
        assert!(host.screen().state().user_location().is_none());
    }

    #[tokio::test]
    async fn test_run_denied_permission_ignores_location_updates() {
        let mut host = host(FixedLocation::new(Coordinate::new(10.0, 20.0)));
        let mut out = Vec::new();
        host.run(Permission::Denied, "moved 5 6\nlocate\n".as_bytes(), &mut out)
            .await
            .unwrap();

        let state = host.screen().state();
        assert!(state.user_location().is_none());
        assert_eq!(state.camera(), &Camera::default());
        assert!(output(out).contains("alert: User location not available."));
    }

    #[tokio::test]
    async fn test_run_reports_bad_commands() {
        let mut host = host(LocationProvider::None);
        let mut out = Vec::new();
        host.run(Permission::Granted, "fly away\n".as_bytes(), &mut out)
            .await
            .unwrap();
        assert!(output(out).contains("error: unknown command: fly"));
    }
}
