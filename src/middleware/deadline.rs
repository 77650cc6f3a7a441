use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Duration;
use tracing::warn;

use crate::error::ServiceError;

/// Abort handlers that run past the configured deadline with 408.
pub async fn enforce_deadline(
    State(deadline): State<Duration>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_owned();
    match tokio::time::timeout(deadline, next.run(req)).await {
        Ok(resp) => resp,
        Err(_) => {
            let deadline_ms = u64::try_from(deadline.as_millis()).unwrap_or(u64::MAX);
            warn!(%path, deadline_ms, "request deadline exceeded");
            ServiceError::Timeout.into_response()
        }
    }
}
