use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use issuetrack_service::{ErrorBody, ServiceError};

/// A failed request. Everything except unparsable JSON and transport errors
/// keeps status 200 with an `error` body.
#[derive(Debug, Clone)]
pub struct Failure {
    status: StatusCode,
    body: ErrorBody,
}

impl Failure {
    pub fn rejected(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            body: ErrorBody::message(message),
        }
    }

    /// A body that decoded but does not describe a usable request.
    pub fn unusable(message: impl Into<String>) -> Self {
        Self::rejected(StatusCode::OK, message)
    }
}

impl From<ServiceError> for Failure {
    fn from(err: ServiceError) -> Self {
        Self {
            status: StatusCode::OK,
            body: ErrorBody::from(&err),
        }
    }
}

impl IntoResponse for Failure {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
