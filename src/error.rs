//! Application error type and its HTTP mapping.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Error payload returned to clients.
#[derive(Debug, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The caller's request is unusable; no upstream call was made.
    #[error("{message}")]
    BadRequest { message: String },

    /// The matching API answered with a non-success status.
    #[error("upstream responded {status}: {message}")]
    Upstream { status: StatusCode, message: String },

    #[error("{message}")]
    Internal { message: String },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    /// Mirrors an upstream failure. The message is the upstream status text.
    pub fn upstream(status: StatusCode, message: impl Into<String>) -> Self {
        Self::Upstream {
            status,
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Upstream { status, .. } => *status,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::BadRequest { message } => ("bad_request", message),
            AppError::Upstream { message, .. } => ("upstream_error", message),
            AppError::Internal { message } => {
                tracing::error!(error = %message, "Internal error");
                ("internal_error", "Internal Server Error".to_string())
            }
        };

        let body = ErrorBody {
            error: ErrorInfo { code, message },
        };

        (status, Json(body)).into_response()
    }
}
