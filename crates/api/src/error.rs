use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use finsage_core::ScenarioError;
use serde::Serialize;

#[derive(Debug)]
pub enum ApiError {
    Scenario(ScenarioError),
    BadRequest(String),
    NotFound(String),
}

impl From<ScenarioError> for ApiError {
    fn from(err: ScenarioError) -> Self {
        ApiError::Scenario(err)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    code: u16,
    kind: &'static str,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match self {
            ApiError::Scenario(err) if err.is_client_fault() => {
                (StatusCode::BAD_REQUEST, err.kind(), err.to_string())
            }
            ApiError::Scenario(err) => {
                // Detail goes to logs and Sentry only.
                let status = match err {
                    ScenarioError::DataUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
                    _ => StatusCode::INTERNAL_SERVER_ERROR,
                };
                tracing::error!(kind = err.kind(), error = %err, "scenario request failed");
                sentry_anyhow::capture_anyhow(&anyhow::Error::new(err.clone()));
                let message = match err {
                    ScenarioError::DataUnavailable(_) => {
                        "market data is temporarily unavailable, please retry later"
                    }
                    _ => "internal error",
                };
                (status, err.kind(), message.to_string())
            }
            ApiError::BadRequest(message) => (StatusCode::BAD_REQUEST, "invalid_input", message),
            ApiError::NotFound(message) => (StatusCode::NOT_FOUND, "not_found", message),
        };

        let body = Json(ErrorBody {
            code: status.as_u16(),
            kind,
            message,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
