use axum::http::StatusCode;
use axum::response::Response;

use pharmastock_infra::ServiceError;

use crate::app::errors;
use crate::app::services::{AppServices, SharedServices};

/// Run a service call on the blocking pool; the store does synchronous file I/O.
///
/// Failures come back already rendered as error responses.
pub async fn run_blocking<T, F>(services: SharedServices, call: F) -> Result<T, Response>
where
    F: FnOnce(&AppServices) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    match tokio::task::spawn_blocking(move || call(&services)).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(errors::service_error_to_response(e)),
        Err(e) => {
            tracing::error!(error = %e, "service task did not complete");
            Err(errors::json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                "request could not be completed",
            ))
        }
    }
}
