use serde::Deserialize;
use tokio::sync::Mutex;
use tracing::debug;

use super::{Fix, LocationError, LocationRequest, LocationService};
use crate::domain::Coordinate;

pub const DEFAULT_IP_LOCATION_URL: &str = "https://ipapi.co/json/";
const USER_AGENT: &str = concat!("polyarea/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Deserialize)]
struct IpLocationResponse {
    #[serde(alias = "lat")]
    latitude: Option<f64>,
    #[serde(alias = "lon")]
    longitude: Option<f64>,
    #[serde(default)]
    error: Option<bool>,
    #[serde(default)]
    reason: Option<String>,
}

impl IpLocationResponse {
    fn into_coordinate(self) -> Result<Coordinate, LocationError> {
        if self.error.unwrap_or(false) {
            return Err(LocationError::InvalidResponse(
                self.reason.unwrap_or_else(|| "unknown error".to_string()),
            ));
        }

        let (Some(lat), Some(lon)) = (self.latitude, self.longitude) else {
            return Err(LocationError::InvalidResponse(
                "missing latitude or longitude".to_string(),
            ));
        };

        let coordinate = Coordinate::new(lon, lat);
        if !coordinate.is_finite() || lat.abs() > 90.0 || lon.abs() > 180.0 {
            return Err(LocationError::InvalidResponse(format!(
                "out of range position ({lon}, {lat})"
            )));
        }

        Ok(coordinate)
    }
}

/// Approximate device position from an IP geolocation lookup.
///
/// The last fix is kept and handed out again while it is younger than the
/// request's `maximum_age`.
#[derive(Debug)]
pub struct IpLocation {
    client: reqwest::Client,
    url: String,
    last_fix: Mutex<Option<Fix>>,
}

impl IpLocation {
    pub fn new(url: impl Into<String>) -> Result<Self, LocationError> {
        let client = reqwest::Client::builder().user_agent(USER_AGENT).build()?;

        Ok(Self {
            client,
            url: url.into(),
            last_fix: Mutex::new(None),
        })
    }

    async fn lookup(&self, request: &LocationRequest) -> Result<Coordinate, LocationError> {
        if request.high_accuracy {
            debug!("IP geolocation cannot honor high accuracy, using city-level position");
        }

        let response = self
            .client
            .get(&self.url)
            .timeout(request.timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationError::Status(response.status()));
        }

        let body: IpLocationResponse = response.json().await?;
        body.into_coordinate()
    }
}

impl LocationService for IpLocation {
    async fn current_position(&self, request: &LocationRequest) -> Result<Fix, LocationError> {
        let mut last_fix = self.last_fix.lock().await;

        if let Some(fix) = *last_fix
            && fix.is_fresh(request.maximum_age)
        {
            debug!("reusing cached position {:?}", fix.coordinate);
            return Ok(fix);
        }

        let fix = Fix::now(self.lookup(request).await?);
        *last_fix = Some(fix);
        Ok(fix)
    }
}
