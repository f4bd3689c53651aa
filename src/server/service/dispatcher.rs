//! Command queue dispatcher.
//!
//! Drains pending queue records oldest first, runs each through the injected
//! [`CommandExecutor`] and records the outcome with bounded retries. The periodic cycle
//! ([`CommandDispatcher::process_pending_commands`]) absorbs every error so the scheduler
//! can keep calling it forever; only the administrator operations return typed errors.
//!
//! Each attempt follows the same path:
//! 1. Claim the record and count the attempt in one conditional update
//! 2. Execute the command
//! 3. Store success (`completed`) or failure (`pending` or `failed` depending on the
//!    remaining attempts) and release the claim

use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use sea_orm::{DatabaseConnection, DbErr};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::server::{
    data::command_queue::CommandRepository,
    error::dispatch::DispatchError,
    model::{
        command::{CommandExecution, CommandRecord, CommandStatus, CreateCommandParams},
        rcon::RconProfile,
    },
    rcon::CommandExecutor,
    service::profile::ProfileSource,
};

/// Maximum records attempted per cycle.
pub const BATCH_SIZE: u64 = 10;

/// Records with this many attempts are never picked up automatically.
pub const MAX_AUTOMATIC_ATTEMPTS: i32 = 3;

/// How long a claim protects a record from other dispatchers.
pub const CLAIM_LEASE_SECONDS: i64 = 300;

/// Counts of what one cycle did.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    pub completed: usize,
    /// Failed but left pending for a later cycle.
    pub retrying: usize,
    /// Failed with no attempts left.
    pub failed: usize,
    /// Claimed elsewhere or hit a persistence error.
    pub skipped: usize,
}

/// Result of one claimed attempt.
struct Attempt {
    status: CommandStatus,
    execution: CommandExecution,
}

pub struct CommandDispatcher {
    db: DatabaseConnection,
    profiles: Arc<dyn ProfileSource>,
    executor: Arc<dyn CommandExecutor>,
    worker_id: String,
    /// Held for the duration of a cycle so ticks never overlap.
    cycle: Mutex<()>,
}

impl CommandDispatcher {
    pub fn new(
        db: DatabaseConnection,
        profiles: Arc<dyn ProfileSource>,
        executor: Arc<dyn CommandExecutor>,
    ) -> Self {
        Self {
            db,
            profiles,
            executor,
            worker_id: generate_worker_id(),
            cycle: Mutex::new(()),
        }
    }

    /// Identifier written to `claimed_by` by this instance.
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// Runs one dispatch cycle.
    ///
    /// Does nothing when the executor is unconfigured (no queue access at all), when the
    /// queue holds no executable records, or when a previous cycle is still running.
    /// Records are attempted one at a time in creation order; a persistence failure on
    /// one record is logged and the rest of the batch still runs.
    ///
    /// # Returns
    /// - `DispatchSummary` - What the cycle did, empty for a no-op
    pub async fn process_pending_commands(&self) -> DispatchSummary {
        let mut summary = DispatchSummary::default();

        let Ok(_cycle) = self.cycle.try_lock() else {
            tracing::debug!("Previous dispatch cycle still running, skipping");
            return summary;
        };

        let Some((profile, _)) = self.profiles.resolve().await else {
            tracing::debug!("Remote console not configured, skipping command queue");
            return summary;
        };

        let repo = CommandRepository::new(&self.db);
        let batch = match repo
            .get_executable(BATCH_SIZE, MAX_AUTOMATIC_ATTEMPTS, lease_cutoff())
            .await
        {
            Ok(batch) => batch,
            Err(e) => {
                tracing::error!("Failed to fetch pending commands: {}", e);
                return summary;
            }
        };

        if batch.is_empty() {
            return summary;
        }

        for record in batch {
            match self.attempt(&profile, &record).await {
                Ok(Some(attempt)) => match attempt.status {
                    CommandStatus::Completed => summary.completed += 1,
                    CommandStatus::Pending => summary.retrying += 1,
                    CommandStatus::Failed => summary.failed += 1,
                },
                Ok(None) => summary.skipped += 1,
                Err(e) => {
                    tracing::error!("Failed to claim command {}: {}", record.id, e);
                    summary.skipped += 1;
                }
            }
        }

        tracing::info!(
            "Dispatch cycle finished: {} completed, {} retrying, {} failed, {} skipped",
            summary.completed,
            summary.retrying,
            summary.failed,
            summary.skipped
        );

        summary
    }

    /// Executes an existing record once more on an administrator's request.
    ///
    /// Bypasses the automatic attempt ceiling: the record is reopened with
    /// `max_attempts` raised to at least `attempts + 1` and claimed in the same update, so
    /// exactly one further attempt is allowed and a lost race changes nothing.
    ///
    /// # Returns
    /// - `Ok(CommandExecution)` - The attempt ran; `success` reports the executor result
    /// - `Err(DispatchError::NotFound)` - No record with this id
    /// - `Err(DispatchError::AlreadyCompleted)` - Record already succeeded
    /// - `Err(DispatchError::NotConfigured)` - No executor profile
    /// - `Err(DispatchError::Claimed)` - Another dispatcher holds or changed the record
    /// - `Err(DispatchError::DbErr)` - Queue store failure
    pub async fn retry_command(&self, id: i32) -> Result<CommandExecution, DispatchError> {
        let repo = CommandRepository::new(&self.db);

        let record = repo
            .find_by_id(id)
            .await?
            .ok_or(DispatchError::NotFound(id))?;

        if record.status == CommandStatus::Completed {
            return Err(DispatchError::AlreadyCompleted(id));
        }

        let (profile, _) = self
            .profiles
            .resolve()
            .await
            .ok_or(DispatchError::NotConfigured)?;

        let max_attempts = record.max_attempts.max(record.attempts + 1);
        if !repo
            .claim_for_retry(
                id,
                record.attempts,
                max_attempts,
                &self.worker_id,
                lease_cutoff(),
            )
            .await?
        {
            return Err(DispatchError::Claimed(id));
        }

        tracing::info!(
            "Manual retry of command {} ({} previous attempts)",
            id,
            record.attempts
        );

        let record = CommandRecord {
            status: CommandStatus::Pending,
            max_attempts,
            ..record
        };

        Ok(self.run_claimed(&profile, &record).await.execution)
    }

    /// Records and immediately executes a one-shot administrator command.
    ///
    /// The record is created with a single allowed attempt, so it ends either
    /// `completed` or `failed` and is never picked up by the periodic cycle.
    ///
    /// # Returns
    /// - `Ok(CommandExecution)` - The attempt ran; `success` reports the executor result
    /// - `Err(DispatchError::InvalidInput)` - Blank username or command
    /// - `Err(DispatchError::NotConfigured)` - No executor profile; nothing is recorded
    /// - `Err(DispatchError::DbErr)` - Queue store failure
    pub async fn execute_manual_command(
        &self,
        username: &str,
        command: &str,
    ) -> Result<CommandExecution, DispatchError> {
        let username = username.trim();
        let command = command.trim();

        if username.is_empty() {
            return Err(DispatchError::InvalidInput(
                "Username must not be empty".to_string(),
            ));
        }
        if command.is_empty() {
            return Err(DispatchError::InvalidInput(
                "Command must not be empty".to_string(),
            ));
        }

        let (profile, _) = self
            .profiles
            .resolve()
            .await
            .ok_or(DispatchError::NotConfigured)?;

        let record = CommandRepository::new(&self.db)
            .create(CreateCommandParams::manual(
                username.to_string(),
                command.to_string(),
            ))
            .await?;

        tracing::info!(
            "Manual command {} for {}: {}",
            record.id,
            record.username,
            record.command
        );

        let id = record.id;
        self.attempt(&profile, &record)
            .await?
            .map(|attempt| attempt.execution)
            .ok_or(DispatchError::Claimed(id))
    }

    /// Claims, executes and records a single attempt.
    ///
    /// # Returns
    /// - `Ok(Some(Attempt))` - The command was executed and the outcome recorded (or
    ///   logged, if recording failed)
    /// - `Ok(None)` - The claim was lost to another dispatcher; nothing executed
    /// - `Err(DbErr)` - The claim itself failed; nothing executed
    async fn attempt(
        &self,
        profile: &RconProfile,
        record: &CommandRecord,
    ) -> Result<Option<Attempt>, DbErr> {
        if !CommandRepository::new(&self.db)
            .claim(record.id, record.attempts, &self.worker_id, lease_cutoff())
            .await?
        {
            tracing::debug!("Command {} claimed by another dispatcher", record.id);
            return Ok(None);
        }

        Ok(Some(self.run_claimed(profile, record).await))
    }

    /// Executes a record this instance has just claimed and records the outcome.
    ///
    /// `record` holds the values observed before the claim counted the attempt.
    async fn run_claimed(&self, profile: &RconProfile, record: &CommandRecord) -> Attempt {
        let repo = CommandRepository::new(&self.db);
        let attempts = record.attempts + 1;

        match self.executor.execute(profile, &record.command).await {
            Ok(response) => {
                tracing::info!(
                    "Executed command {} for {} (attempt {}/{})",
                    record.id,
                    record.username,
                    attempts,
                    record.max_attempts
                );

                let recorded = repo
                    .complete(record.id, &self.worker_id, response.clone())
                    .await;
                log_unrecorded(record.id, recorded);

                Attempt {
                    status: CommandStatus::Completed,
                    execution: CommandExecution {
                        command_id: record.id,
                        success: true,
                        response: Some(response),
                        error: None,
                    },
                }
            }
            Err(e) => {
                let error = e.to_string();
                let status = if attempts >= record.max_attempts {
                    CommandStatus::Failed
                } else {
                    CommandStatus::Pending
                };

                tracing::warn!(
                    "Command {} failed (attempt {}/{}): {}",
                    record.id,
                    attempts,
                    record.max_attempts,
                    error
                );

                let recorded = repo
                    .record_failure(record.id, &self.worker_id, status, error.clone())
                    .await;
                log_unrecorded(record.id, recorded);

                Attempt {
                    status,
                    execution: CommandExecution {
                        command_id: record.id,
                        success: false,
                        response: None,
                        error: Some(error),
                    },
                }
            }
        }
    }
}

/// The command already ran; a failure here only loses the bookkeeping.
fn log_unrecorded(id: i32, recorded: Result<bool, DbErr>) {
    match recorded {
        Ok(true) => {}
        Ok(false) => tracing::warn!("Claim on command {} expired before its result was stored", id),
        Err(e) => tracing::error!("Failed to store result of command {}: {}", id, e),
    }
}

fn lease_cutoff() -> DateTime<Utc> {
    Utc::now() - Duration::seconds(CLAIM_LEASE_SECONDS)
}

/// Random per-process identifier, e.g. `dispatcher-4fQz81Lm`.
fn generate_worker_id() -> String {
    const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                             abcdefghijklmnopqrstuvwxyz\
                             0123456789";
    const SUFFIX_LENGTH: usize = 8;

    let mut rng = rand::rng();

    let suffix: String = (0..SUFFIX_LENGTH)
        .map(|_| {
            let idx = rng.random_range(0..CHARSET.len());
            CHARSET[idx] as char
        })
        .collect();

    format!("dispatcher-{}", suffix)
}
