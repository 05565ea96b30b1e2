use crate::validation::ValidationError;
use axum::http::StatusCode;
use thiserror::Error;

/// Why a call to the task backend produced no usable data.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("not authenticated")]
    Unauthenticated,
    #[error("backend responded with status {status}")]
    Status { status: u16, message: Option<String> },
    #[error("backend request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("backend sent an unreadable body: {0}")]
    Decode(#[source] reqwest::Error),
}

#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    pub fn bad_gateway(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_GATEWAY,
            message: message.into(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<LoadError> for AppError {
    fn from(err: LoadError) -> Self {
        match err {
            LoadError::Unauthenticated => Self {
                status: StatusCode::UNAUTHORIZED,
                message: LoadError::Unauthenticated.to_string(),
            },
            LoadError::Status {
                status: 404,
                message,
            } => Self {
                status: StatusCode::NOT_FOUND,
                message: message.unwrap_or_else(|| "not found".to_string()),
            },
            LoadError::Status {
                status: 400,
                message,
            } => Self::bad_request(message.unwrap_or_else(|| "invalid request".to_string())),
            LoadError::Status {
                status: 401,
                message,
            } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: message.unwrap_or_else(|| LoadError::Unauthenticated.to_string()),
            },
            LoadError::Status {
                message: Some(message),
                ..
            } => Self::bad_gateway(message),
            other => Self::bad_gateway(other.to_string()),
        }
    }
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        (self.status, self.message).into_response()
    }
}
