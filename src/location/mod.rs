pub mod acquire;
pub mod fixed;
pub mod ip;
pub mod permission;

use std::time::{Duration, Instant};

use thiserror::Error;

use crate::domain::Coordinate;

pub use acquire::{AcquireError, fetch_position};
pub use fixed::FixedLocation;
pub use ip::IpLocation;
pub use permission::{Permission, PermissionPolicy, PermissionRationale, prompt_permission};

/// Parameters of a one-shot position query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationRequest {
    pub high_accuracy: bool,
    /// Upper bound on the whole query
    pub timeout: Duration,
    /// Oldest cached fix the service may answer with
    pub maximum_age: Duration,
}

impl Default for LocationRequest {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: Duration::from_secs(90),
            maximum_age: Duration::from_millis(1000),
        }
    }
}

/// A position together with the moment it was obtained
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fix {
    pub coordinate: Coordinate,
    pub acquired_at: Instant,
}

impl Fix {
    pub fn now(coordinate: Coordinate) -> Self {
        Self {
            coordinate,
            acquired_at: Instant::now(),
        }
    }

    pub fn is_fresh(&self, maximum_age: Duration) -> bool {
        self.acquired_at.elapsed() <= maximum_age
    }
}

#[derive(Debug, Error)]
pub enum LocationError {
    #[error("no location provider configured")]
    Unavailable,
    #[error("location request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("location service returned error status: {0}")]
    Status(reqwest::StatusCode),
    #[error("location service returned an unusable position: {0}")]
    InvalidResponse(String),
}

/// Source of the device position
pub trait LocationService {
    fn current_position(
        &self,
        request: &LocationRequest,
    ) -> impl Future<Output = Result<Fix, LocationError>>;
}

/// Provider chosen by configuration
#[derive(Debug)]
pub enum LocationProvider {
    Fixed(FixedLocation),
    Ip(IpLocation),
    None,
}

impl LocationService for LocationProvider {
    async fn current_position(&self, request: &LocationRequest) -> Result<Fix, LocationError> {
        match self {
            LocationProvider::Fixed(fixed) => fixed.current_position(request).await,
            LocationProvider::Ip(ip) => ip.current_position(request).await,
            LocationProvider::None => Err(LocationError::Unavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_request_matches_startup_query() {
        let request = LocationRequest::default();
        assert!(request.high_accuracy);
        assert_eq!(request.timeout, Duration::from_secs(90));
        assert_eq!(request.maximum_age, Duration::from_secs(1));
    }

    #[test]
    fn test_fix_freshness() {
        let fix = Fix::now(Coordinate::new(1.0, 2.0));
        assert!(fix.is_fresh(Duration::from_secs(60)));

        let old = Fix {
            acquired_at: Instant::now() - Duration::from_secs(5),
            ..fix
        };
        assert!(!old.is_fresh(Duration::from_secs(1)));
    }

    #[tokio::test]
    async fn test_none_provider_is_unavailable() {
        let result = LocationProvider::None
            .current_position(&LocationRequest::default())
            .await;
        assert!(matches!(result, Err(LocationError::Unavailable)));
    }
}
