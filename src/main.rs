mod model;
mod server;

use std::sync::Arc;

use crate::server::{
    config::Config,
    error::AppError,
    rcon::RconExecutor,
    router,
    scheduler::command_queue,
    service::{
        dispatcher::CommandDispatcher,
        profile::{ConfiguredProfileSource, ProfileSource},
    },
    startup,
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    startup::init_tracing();

    let config = Config::from_env()?;

    let db = startup::connect_to_database(&config).await?;

    match &config.rcon {
        Some(profile) => tracing::info!(
            "Remote console configured from environment ({})",
            profile.address()
        ),
        None => tracing::info!("Remote console not set in environment, using stored settings"),
    }

    let profiles: Arc<dyn ProfileSource> =
        Arc::new(ConfiguredProfileSource::new(db.clone(), config.rcon.clone()));
    let dispatcher = Arc::new(CommandDispatcher::new(
        db.clone(),
        profiles.clone(),
        Arc::new(RconExecutor),
    ));

    tracing::info!("Starting dispatcher {}", dispatcher.worker_id());

    let mut scheduler =
        command_queue::start_scheduler(dispatcher.clone(), &config.poll_schedule).await?;

    let app = router::router(AppState::new(
        db,
        dispatcher,
        profiles,
        config.admin_token.as_str(),
    ));

    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    tracing::info!("Listening on {}", config.bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(startup::shutdown_signal())
        .await?;

    scheduler.shutdown().await?;
    tracing::info!("Command queue scheduler stopped");

    Ok(())
}
