use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::domain::{Camera, Coordinate};
use crate::geometry::AreaMethod;
use crate::location::ip::DEFAULT_IP_LOCATION_URL;
use crate::location::{
    FixedLocation, IpLocation, LocationError, LocationProvider, LocationRequest, PermissionPolicy,
};
use crate::session::SessionSettings;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {0:?}")]
    NotFound(PathBuf),
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("capacity must be at least 1")]
    ZeroCapacity,
    #[error("{0} must be a finite number")]
    NotFinite(&'static str),
    #[error("location provider \"fixed\" needs location.fixed = [lon, lat]")]
    MissingFixedLocation,
    #[error(transparent)]
    Location(#[from] LocationError),
}

fn default_capacity() -> usize {
    15
}
fn default_center() -> [f64; 2] {
    [0.0, 0.0]
}
fn default_zoom() -> f64 {
    10.0
}
fn default_animation_ms() -> u64 {
    1000
}
fn default_timeout_secs() -> u64 {
    90
}
fn default_maximum_age_ms() -> u64 {
    1000
}
fn default_high_accuracy() -> bool {
    true
}
fn default_ip_url() -> String {
    DEFAULT_IP_LOCATION_URL.to_string()
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    None,
    Fixed,
    Ip,
}

#[derive(Debug, Deserialize)]
pub struct FileConfig {
    /// Maximum number of finalized polygons
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub area_method: AreaMethod,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub location: LocationConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CameraConfig {
    /// `[lon, lat]` shown until a location is known
    #[serde(default = "default_center")]
    pub center: [f64; 2],
    #[serde(default = "default_zoom")]
    pub zoom: f64,
    #[serde(default = "default_animation_ms")]
    pub animation_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LocationConfig {
    #[serde(default)]
    pub provider: ProviderKind,
    #[serde(default)]
    pub fixed: Option<[f64; 2]>,
    #[serde(default = "default_ip_url")]
    pub ip_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_maximum_age_ms")]
    pub maximum_age_ms: u64,
    #[serde(default = "default_high_accuracy")]
    pub high_accuracy: bool,
    #[serde(default)]
    pub permission: PermissionPolicy,
}

impl Default for FileConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            area_method: AreaMethod::default(),
            verbose: false,
            camera: CameraConfig::default(),
            location: LocationConfig::default(),
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            center: default_center(),
            zoom: default_zoom(),
            animation_ms: default_animation_ms(),
        }
    }
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            provider: ProviderKind::default(),
            fixed: None,
            ip_url: default_ip_url(),
            timeout_secs: default_timeout_secs(),
            maximum_age_ms: default_maximum_age_ms(),
            high_accuracy: default_high_accuracy(),
            permission: PermissionPolicy::default(),
        }
    }
}

impl FileConfig {
    /// First parseable config on the search path, if any
    pub fn load() -> Option<Self> {
        let config_paths = get_config_paths();

        for path in config_paths {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => return Some(config),
                    Err(e) => {
                        eprintln!("Warning: Failed to parse config file {:?}: {}", path, e);
                    }
                }
            }
        }
        None
    }

    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn session_settings(&self) -> Result<SessionSettings, ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        if !self.camera.zoom.is_finite() {
            return Err(ConfigError::NotFinite("camera.zoom"));
        }

        Ok(SessionSettings {
            capacity: self.capacity,
            area_method: self.area_method,
            recenter_zoom: self.camera.zoom,
            recenter_animation: Duration::from_millis(self.camera.animation_ms),
        })
    }

    pub fn camera_defaults(&self) -> Result<Camera, ConfigError> {
        let center = Coordinate::from(self.camera.center);
        if !center.is_finite() {
            return Err(ConfigError::NotFinite("camera.center"));
        }
        if !self.camera.zoom.is_finite() {
            return Err(ConfigError::NotFinite("camera.zoom"));
        }

        Ok(Camera::new(
            center,
            self.camera.zoom,
            Duration::from_millis(self.camera.animation_ms),
        ))
    }

    pub fn location_request(&self) -> LocationRequest {
        LocationRequest {
            high_accuracy: self.location.high_accuracy,
            timeout: Duration::from_secs(self.location.timeout_secs),
            maximum_age: Duration::from_millis(self.location.maximum_age_ms),
        }
    }

    pub fn location_provider(&self) -> Result<LocationProvider, ConfigError> {
        match self.location.provider {
            ProviderKind::None => Ok(LocationProvider::None),
            ProviderKind::Fixed => {
                let coordinate = self
                    .location
                    .fixed
                    .map(Coordinate::from)
                    .ok_or(ConfigError::MissingFixedLocation)?;
                if !coordinate.is_finite() {
                    return Err(ConfigError::NotFinite("location.fixed"));
                }
                Ok(LocationProvider::Fixed(FixedLocation::new(coordinate)))
            }
            ProviderKind::Ip => Ok(LocationProvider::Ip(IpLocation::new(
                self.location.ip_url.clone(),
            )?)),
        }
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("polyarea.toml"));
    paths.push(PathBuf::from(".polyarea.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("polyarea").join("config.toml"));
        paths.push(config_dir.join("polyarea.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".polyarea.toml"));
        paths.push(home.join(".config").join("polyarea").join("config.toml"));
    }

    paths
}
