use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, service::dispatcher::CommandDispatcher};

/// Starts the command queue scheduler
///
/// Runs one dispatch cycle immediately, then on every tick of `schedule`. Ticks that
/// arrive while a cycle is still running are skipped by the dispatcher itself.
///
/// # Arguments
/// - `dispatcher`: Dispatcher shared with the admin API
/// - `schedule`: Cron expression with a seconds field, e.g. `*/30 * * * * *`
///
/// # Returns
/// - `Ok(JobScheduler)`: Running scheduler; call `shutdown` on it to stop polling
/// - `Err(AppError::SchedulerErr)`: Invalid schedule or scheduler failure
pub async fn start_scheduler(
    dispatcher: Arc<CommandDispatcher>,
    schedule: &str,
) -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;

    let job_dispatcher = dispatcher.clone();
    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let dispatcher = job_dispatcher.clone();

        Box::pin(async move {
            dispatcher.process_pending_commands().await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tokio::spawn(async move {
        dispatcher.process_pending_commands().await;
    });

    tracing::info!("Command queue scheduler started ({})", schedule);

    Ok(scheduler)
}
