use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use gokids_booking::{ConfirmError, TopUpError};
use gokids_schedule::ScheduleError;
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    ValidationError(String),
    NotFoundError(String),
    /// Not enough ride credits; the client is expected to go to the wallet.
    PaymentRequired(String),
    /// A remote write against the ledger or rides store failed.
    UpstreamError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => (StatusCode::UNAUTHORIZED, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::PaymentRequired(msg) => (StatusCode::PAYMENT_REQUIRED, msg),
            AppError::UpstreamError(msg) => {
                tracing::error!("Upstream write failed: {}", msg);
                (StatusCode::BAD_GATEWAY, msg)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<ConfirmError> for AppError {
    fn from(err: ConfirmError) -> Self {
        match err {
            ConfirmError::DraftMissing => AppError::NotFoundError(err.to_string()),
            ConfirmError::InvalidDraft(_) => AppError::ValidationError(err.to_string()),
            ConfirmError::InsufficientCredit { .. } => AppError::PaymentRequired(err.to_string()),
            ConfirmError::LedgerUpdateFailed(_) | ConfirmError::RideInsertFailed { .. } => {
                AppError::UpstreamError(err.to_string())
            }
        }
    }
}

impl From<TopUpError> for AppError {
    fn from(err: TopUpError) -> Self {
        match err {
            TopUpError::UnknownPackage(_) => AppError::ValidationError(err.to_string()),
            TopUpError::LedgerUpdateFailed(_) => AppError::UpstreamError(err.to_string()),
        }
    }
}

impl From<ScheduleError> for AppError {
    fn from(err: ScheduleError) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<gokids_core::RepoError> for AppError {
    fn from(err: gokids_core::RepoError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}
