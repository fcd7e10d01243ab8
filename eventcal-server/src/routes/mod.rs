pub mod calendar;
pub mod events;

use axum::{
    Json, Router,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use eventcal_core::EventCalError;
use eventcal_core::error::FieldError;
use serde::Serialize;

use crate::state::AppState;

/// The full API router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .merge(events::router())
        .merge(calendar::router())
        .with_state(state)
}

/// Standard API error response
#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,
}

/// An error on its way to becoming a `{ success: false, ... }` response
#[derive(Debug)]
pub struct AppError {
    status: StatusCode,
    message: String,
    error: Option<String>,
    errors: Vec<FieldError>,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
            error: None,
            errors: Vec::new(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError {
            status: StatusCode::NOT_FOUND,
            message: message.into(),
            error: None,
            errors: Vec::new(),
        }
    }

    /// Map a core error to a response; `failure` is the message used when
    /// the error is the server's fault.
    pub fn from_core(err: EventCalError, failure: &str) -> Self {
        match err {
            EventCalError::EventNotFound(_) => Self::not_found("Event not found"),
            EventCalError::Validation(errors) => AppError {
                status: StatusCode::BAD_REQUEST,
                message: "Invalid event data".to_string(),
                error: None,
                errors,
            },
            EventCalError::InvalidDate(message) => Self::bad_request(message),
            other => {
                tracing::error!(error = %other, "{failure}");
                AppError {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: failure.to_string(),
                    error: Some(other.to_string()),
                    errors: Vec::new(),
                }
            }
        }
    }
}

impl From<EventCalError> for AppError {
    fn from(err: EventCalError) -> Self {
        Self::from_core(err, "Unexpected server error")
    }
}

/// Attach the user-facing failure message to a core result
pub trait OrFail<T> {
    fn or_fail(self, failure: &str) -> Result<T, AppError>;
}

impl<T> OrFail<T> for Result<T, EventCalError> {
    fn or_fail(self, failure: &str) -> Result<T, AppError> {
        self.map_err(|e| AppError::from_core(e, failure))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = Json(ErrorResponse {
            success: false,
            message: self.message,
            error: self.error,
            errors: self.errors,
        });
        (self.status, body).into_response()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::{
        Router,
        body::Body,
        http::{Request, StatusCode},
    };
    use serde_json::Value;
    use tower::ServiceExt;

    pub async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                request = request.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(request.body(body).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }
}
