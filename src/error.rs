use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Land check failed: {0}")]
    LandCheck(String),

    #[error("Routing service error: {0}")]
    RoutingFailure(String),

    #[error("Route generation failed after {attempts} attempts")]
    GenerationFailed { attempts: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Internal server error: {0}")]
    Internal(String),
}

// Convert AppError into HTTP responses
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let message = self.to_string();
        let (status, error_message) = match self {
            AppError::InvalidInput(ref e) | AppError::InvalidRequest(ref e) => {
                (StatusCode::BAD_REQUEST, e.as_str())
            }
            AppError::LandCheck(ref e) => {
                // Should have been degraded to "assume land" before reaching a handler
                tracing::error!("Land check error escaped the generator: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Land verification error")
            }
            AppError::RoutingFailure(ref e) => {
                tracing::error!("Routing service error: {}", e);
                (StatusCode::BAD_GATEWAY, "Routing service error")
            }
            AppError::GenerationFailed { attempts } => {
                tracing::warn!(attempts, "Route generation gave up after {} attempts", attempts);
                (StatusCode::SERVICE_UNAVAILABLE, message.as_str())
            }
            AppError::Internal(ref e) => {
                tracing::error!("Internal error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        };

        let body = Json(json!({
            "error": status.canonical_reason().unwrap_or("Unknown error"),
            "message": error_message,
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
