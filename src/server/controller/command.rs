use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;

use crate::{
    model::{
        api::ErrorDto,
        command::{
            CommandDto, CommandResultDto, EnqueueCommandDto, ManualCommandDto,
            PaginatedCommandsDto,
        },
    },
    server::{
        error::AppError, middleware::auth::AuthGuard, model::command::CreateCommandParams,
        service::command::CommandService, state::AppState,
    },
};

/// Tag for grouping command queue endpoints in OpenAPI documentation
pub static COMMAND_TAG: &str = "command";

#[derive(Deserialize)]
pub struct CommandListParams {
    pub status: Option<String>,
    #[serde(default)]
    pub page: u64,
    #[serde(default = "default_entries")]
    pub entries: u64,
}

fn default_entries() -> u64 {
    10
}

/// Queue a command for execution.
///
/// Called by order fulfilment when a purchased package needs console commands run on the
/// game server. The command is picked up by the next dispatch cycle.
///
/// # Returns
/// - `201 Created` - Queued record
/// - `400 Bad Request` - Blank username/command or invalid attempt limit
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/commands",
    tag = COMMAND_TAG,
    request_body = EnqueueCommandDto,
    responses(
        (status = 201, description = "Command queued", body = CommandDto),
        (status = 400, description = "Invalid command data", body = ErrorDto),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn enqueue_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<EnqueueCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let service = CommandService::new(&state.db);

    let record = service
        .enqueue(CreateCommandParams::from_dto(payload))
        .await?;

    Ok((StatusCode::CREATED, Json(record.into_dto())))
}

/// Get paginated queue records.
///
/// Newest records first, optionally filtered by status.
///
/// # Returns
/// - `200 OK` - Page of records
/// - `400 Bad Request` - Unknown status filter
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/commands",
    tag = COMMAND_TAG,
    params(
        ("status" = Option<String>, Query, description = "pending, completed or failed"),
        ("page" = Option<u64>, Query, description = "Page number (default: 0)"),
        ("entries" = Option<u64>, Query, description = "Items per page (default: 10)")
    ),
    responses(
        (status = 200, description = "Retrieved commands", body = PaginatedCommandsDto),
        (status = 400, description = "Unknown status filter", body = ErrorDto),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_commands(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<CommandListParams>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let service = CommandService::new(&state.db);

    let commands = service
        .get_paginated(params.status.as_deref(), params.page, params.entries)
        .await?;

    Ok((StatusCode::OK, Json(commands.into_dto())))
}

/// Get a queue record by ID.
///
/// # Returns
/// - `200 OK` - The record
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - No record with this ID
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    get,
    path = "/api/admin/commands/{command_id}",
    tag = COMMAND_TAG,
    params(
        ("command_id" = i32, Path, description = "Queue record ID")
    ),
    responses(
        (status = 200, description = "Successfully retrieved command", body = CommandDto),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 404, description = "Command not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn get_command_by_id(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(command_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let service = CommandService::new(&state.db);

    let record = service
        .get_by_id(command_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Command {} not found", command_id)))?;

    Ok((StatusCode::OK, Json(record.into_dto())))
}

/// Execute a one-shot console command.
///
/// Records the command with a single allowed attempt and runs it immediately. Execution
/// failures are reported in the body with `success: false`; the record ends `failed` and
/// is not retried automatically.
///
/// # Returns
/// - `200 OK` - Attempt made; see `success`
/// - `400 Bad Request` - Blank username or command
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `503 Service Unavailable` - Remote console not configured
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/commands/execute",
    tag = COMMAND_TAG,
    request_body = ManualCommandDto,
    responses(
        (status = 200, description = "Command attempted", body = CommandResultDto),
        (status = 400, description = "Invalid command data", body = ErrorDto),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 503, description = "Remote console not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn execute_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ManualCommandDto>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let execution = state
        .dispatcher
        .execute_manual_command(&payload.username, &payload.command)
        .await?;

    Ok((StatusCode::OK, Json(execution.into_dto())))
}

/// Retry a queue record.
///
/// Runs one more attempt on a pending or failed record regardless of how many attempts it
/// has used.
///
/// # Returns
/// - `200 OK` - Attempt made; see `success`
/// - `401 Unauthorized` - Missing or wrong admin token
/// - `404 Not Found` - No record with this ID
/// - `409 Conflict` - Record already completed or held by another dispatcher
/// - `503 Service Unavailable` - Remote console not configured
/// - `500 Internal Server Error` - Database error
#[utoipa::path(
    post,
    path = "/api/admin/commands/{command_id}/retry",
    tag = COMMAND_TAG,
    params(
        ("command_id" = i32, Path, description = "Queue record ID")
    ),
    responses(
        (status = 200, description = "Command attempted", body = CommandResultDto),
        (status = 401, description = "Missing or invalid admin token", body = ErrorDto),
        (status = 404, description = "Command not found", body = ErrorDto),
        (status = 409, description = "Command completed or being processed", body = ErrorDto),
        (status = 503, description = "Remote console not configured", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn retry_command(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(command_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    AuthGuard::new(&state.admin_token, &headers).require()?;

    let execution = state.dispatcher.retry_command(command_id).await?;

    Ok((StatusCode::OK, Json(execution.into_dto())))
}
