use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

/// Failures of the manually invoked dispatcher operations.
///
/// The periodic cycle never surfaces these; they are only returned from
/// `retry_command` and `execute_manual_command` so the admin panel can show feedback.
/// Execution failures are not errors here: they are reported as an unsuccessful
/// `CommandExecution`.
#[derive(Error, Debug)]
pub enum DispatchError {
    /// No queue record exists with the given id.
    #[error("Command {0} not found")]
    NotFound(i32),

    /// The record already completed and cannot be executed again.
    #[error("Command {0} has already completed")]
    AlreadyCompleted(i32),

    /// Another dispatcher holds a live claim on the record.
    #[error("Command {0} is currently being processed")]
    Claimed(i32),

    /// No remote console profile could be resolved.
    #[error("Remote console is not configured")]
    NotConfigured,

    /// Request parameters were rejected before touching the queue.
    #[error("{0}")]
    InvalidInput(String),

    /// Queue store failure.
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

/// Converts dispatch errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - `InvalidInput`
/// - 404 Not Found - `NotFound`
/// - 409 Conflict - `AlreadyCompleted`, `Claimed`
/// - 503 Service Unavailable - `NotConfigured`
/// - 500 Internal Server Error - `DbErr`, logged with a generic client message
impl IntoResponse for DispatchError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::InvalidInput(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::AlreadyCompleted(_) | Self::Claimed(_) => StatusCode::CONFLICT,
            Self::NotConfigured => StatusCode::SERVICE_UNAVAILABLE,
            Self::DbErr(err) => {
                tracing::error!("Dispatcher database error: {}", err);
                return (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ErrorDto {
                        error: "Internal server error".to_string(),
                    }),
                )
                    .into_response();
            }
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
