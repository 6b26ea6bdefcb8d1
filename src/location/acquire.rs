use std::time::Duration;

use thiserror::Error;
use tokio::sync::oneshot;

use super::{LocationError, LocationRequest, LocationService};
use crate::domain::Coordinate;

#[derive(Debug, Error)]
pub enum AcquireError {
    #[error("location request timed out after {0:?}")]
    Timeout(Duration),
    #[error(transparent)]
    Location(#[from] LocationError),
    #[error("location request cancelled")]
    Cancelled,
}

/// Fetch one position, bounded by the request timeout.
///
/// `cancel` resolves when its sender fires or is dropped; either way the
/// query is abandoned and `Cancelled` is returned.
pub async fn fetch_position<L>(
    service: &L,
    request: &LocationRequest,
    cancel: oneshot::Receiver<()>,
) -> Result<Coordinate, AcquireError>
where
    L: LocationService,
{
    tokio::select! {
        biased;
        _ = cancel => Err(AcquireError::Cancelled),
        result = tokio::time::timeout(request.timeout, service.current_position(request)) => {
            match result {
                Ok(Ok(fix)) => Ok(fix.coordinate),
                Ok(Err(err)) => Err(err.into()),
                Err(_) => Err(AcquireError::Timeout(request.timeout)),
            }
        }
    }
}
