use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;
use tracing::error;

use pitchboard_ledger::LedgerError;
use pitchboard_types::api::ErrorResponse;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("malformed request body: {0}")]
    Body(#[from] JsonRejection),

    #[error("blocking task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    /// A server-side fault tagged with the message the client sees.
    #[error("{message}: {source}")]
    Failed {
        message: &'static str,
        #[source]
        source: Box<ApiError>,
    },
}

impl ApiError {
    /// The message of a core validation failure, if this is one.
    pub fn validation_message(&self) -> Option<&str> {
        match self {
            ApiError::Ledger(LedgerError::Validation(msg)) => Some(msg.as_str()),
            _ => None,
        }
    }

    fn is_server_fault(&self) -> bool {
        matches!(
            self,
            ApiError::Ledger(LedgerError::Storage(_)) | ApiError::Join(_) | ApiError::Failed { .. }
        )
    }
}

/// Attach a per-operation message to server-side faults. Caller faults pass
/// through untouched.
pub trait FailureContext<T> {
    fn failure(self, message: &'static str) -> Result<T, ApiError>;
}

impl<T, E> FailureContext<T> for Result<T, E>
where
    E: Into<ApiError>,
{
    fn failure(self, message: &'static str) -> Result<T, ApiError> {
        self.map_err(|e| {
            let e = e.into();
            if e.is_server_fault() {
                ApiError::Failed {
                    message,
                    source: Box::new(e),
                }
            } else {
                e
            }
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Ledger(LedgerError::Validation(msg)) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::Ledger(LedgerError::NotFound(msg)) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Body(rejection) => (StatusCode::BAD_REQUEST, rejection.body_text()),
            ApiError::Failed { message, source } => {
                error!("{}: {:#}", message, source);
                (StatusCode::INTERNAL_SERVER_ERROR, message.to_string())
            }
            ApiError::Ledger(LedgerError::Storage(e)) => {
                error!("Storage failure: {:#}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ApiError::Join(e) => {
                error!("spawn_blocking join error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
