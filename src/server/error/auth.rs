use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// Request carried no `Authorization: Bearer` header.
    #[error("Missing admin bearer token")]
    MissingToken,

    /// Bearer token did not match the configured admin token.
    #[error("Invalid admin bearer token")]
    InvalidToken,
}

/// Converts authentication errors into HTTP responses.
///
/// Both variants map to 401 Unauthorized with the same generic message so callers cannot
/// distinguish a missing token from a wrong one. The specific cause is logged at debug
/// level.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Unauthorized".to_string(),
            }),
        )
            .into_response()
    }
}
