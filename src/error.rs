use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Invalid response body: {0}")]
    DecodeError(#[from] serde_json::Error),

    #[error("Backend returned {status}: {message}")]
    BackendError { status: u16, message: String },

    #[error("Payment required: receipt transaction missing")]
    PaymentRequired,

    #[error("A payment request is already in flight")]
    Busy,

    #[error("Artifact error: {0}")]
    ArtifactError(String),
}

#[derive(Serialize, Deserialize, Debug)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: String,
    pub error_code: String,
    pub timestamp: chrono::DateTime<Utc>,
    pub request_id: String,
}

impl WalletError {
    pub fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            WalletError::PaymentRequired => (StatusCode::PAYMENT_REQUIRED, "PAYMENT_REQUIRED"),
            WalletError::Busy => (StatusCode::CONFLICT, "REQUEST_IN_FLIGHT"),
            WalletError::DecodeError(_) => (StatusCode::BAD_REQUEST, "INVALID_BODY"),
            WalletError::HttpError(_) | WalletError::BackendError { .. } => {
                (StatusCode::BAD_GATEWAY, "UPSTREAM_ERROR")
            }
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        }
    }
}

impl IntoResponse for WalletError {
    fn into_response(self) -> Response {
        let request_id = Uuid::new_v4().to_string();
        let (status, error_code) = self.status_and_code();

        let body = ErrorResponse {
            ok: false,
            error: self.to_string(),
            error_code: error_code.to_string(),
            timestamp: Utc::now(),
            request_id,
        };

        tracing::error!(
            error = ?self,
            error_code = error_code,
            "Request failed"
        );

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_required_maps_to_402() {
        let (status, code) = WalletError::PaymentRequired.status_and_code();
        assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
        assert_eq!(code, "PAYMENT_REQUIRED");
    }

    #[test]
    fn backend_errors_are_upstream() {
        let err = WalletError::BackendError {
            status: 500,
            message: "boom".to_string(),
        };
        assert_eq!(err.status_and_code().0, StatusCode::BAD_GATEWAY);
        assert_eq!(err.to_string(), "Backend returned 500: boom");
    }
}
