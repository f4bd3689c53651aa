use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};

use crate::{
    model::{
        api::ErrorDto,
        rcon::{RconStatusDto, UpdateRconSettingsDto},
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::rcon::RconProfile,
        service::settings::RconSettingsService, state::AppState,
    },
};

/// Tag for grouping remote console endpoints in OpenAPI documentation
pub static RCON_TAG: &str = "rcon";

/// Get the active remote console configuration.
///
/// Reports the profile the dispatcher would use right now and where it came from. The
/// password is never included.
///
/// # Returns
/// - `200 OK` - Configuration status
/// - `401 Unauthorized` - Missing or wrong admin token
#[utoipa::path(
    get,
    path = "/api/admin/rcon",
    tag = RCON_TAG,
    responses(
        (status = 200, description = "Remote console status", body = RconStatusDto),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto)
    ),
)]
pub async fn get_rcon_status(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let service = RconSettingsService::new(&state.db, state.profiles.as_ref());

    Ok((StatusCode::OK, Json(service.status().await.into_dto())))
}

/// Store remote console settings.
///
/// Persists the `rcon_config` setting. It takes effect on the next dispatch cycle unless
/// the environment already provides a complete profile.
///
/// # Returns
/// - `200 OK` - Settings stored; resulting status
/// - `400 Bad Request` - Missing host, port or password
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    put,
    path = "/api/admin/rcon",
    tag = RCON_TAG,
    request_body = UpdateRconSettingsDto,
    responses(
        (status = 200, description = "Settings stored", body = RconStatusDto),
        (status = 400, description = "Invalid settings", body = ErrorDto),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn update_rcon_settings(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<UpdateRconSettingsDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let service = RconSettingsService::new(&state.db, state.profiles.as_ref());

    let status = service.update(RconProfile::from_dto(payload)).await?;

    Ok((StatusCode::OK, Json(status.into_dto())))
}
