use axum::{
    routing::{get, post},
    Json, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;

use crate::{
    model::{
        api::ErrorDto,
        command::{
            CommandDto, CommandResultDto, EnqueueCommandDto, ManualCommandDto,
            PaginatedCommandsDto,
        },
        rcon::{RconStatusDto, UpdateRconSettingsDto},
    },
    server::{
        controller::{
            command::{
                self, enqueue_command, execute_command, get_command_by_id, get_commands,
                retry_command,
            },
            rcon::{self, get_rcon_status, update_rcon_settings},
        },
        state::AppState,
    },
};

#[derive(OpenApi)]
#[openapi(
    info(title = "Command Dispatcher API"),
    paths(
        command::enqueue_command,
        command::get_commands,
        command::get_command_by_id,
        command::execute_command,
        command::retry_command,
        rcon::get_rcon_status,
        rcon::update_rcon_settings,
    ),
    components(schemas(
        ErrorDto,
        CommandDto,
        PaginatedCommandsDto,
        EnqueueCommandDto,
        ManualCommandDto,
        CommandResultDto,
        RconStatusDto,
        UpdateRconSettingsDto,
    )),
    tags(
        (name = "command", description = "Command queue"),
        (name = "rcon", description = "Remote console settings")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/commands", post(enqueue_command))
        .route("/api/admin/commands", get(get_commands))
        .route("/api/admin/commands/execute", post(execute_command))
        .route("/api/admin/commands/{command_id}", get(get_command_by_id))
        .route("/api/admin/commands/{command_id}/retry", post(retry_command))
        .route(
            "/api/admin/rcon",
            get(get_rcon_status).put(update_rcon_settings),
        )
        .route("/api/docs/openapi.json", get(openapi))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn openapi() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
