use sea_orm::DatabaseConnection;

use crate::server::{
    data::command_queue::CommandRepository,
    error::AppError,
    model::command::{CommandRecord, CommandStatus, CreateCommandParams, PaginatedCommands},
    service::dispatcher::MAX_AUTOMATIC_ATTEMPTS,
};

/// Queue inspection and enqueueing for the admin API.
///
/// Execution itself is owned by the dispatcher; this service never runs commands.
pub struct CommandService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Queues a command for the next dispatch cycle
    ///
    /// # Returns
    /// - `Ok(CommandRecord)` - The new pending record
    /// - `Err(AppError::BadRequest)` - Blank username/command, or an attempt limit outside
    ///   `1..=MAX_AUTOMATIC_ATTEMPTS`
    /// - `Err(AppError::DbErr)` - Database error
    pub async fn enqueue(&self, params: CreateCommandParams) -> Result<CommandRecord, AppError> {
        let params = CreateCommandParams {
            username: params.username.trim().to_string(),
            command: params.command.trim().to_string(),
            ..params
        };

        if params.username.is_empty() {
            return Err(AppError::BadRequest(
                "Username must not be empty".to_string(),
            ));
        }
        if params.command.is_empty() {
            return Err(AppError::BadRequest("Command must not be empty".to_string()));
        }
        if !(1..=MAX_AUTOMATIC_ATTEMPTS).contains(&params.max_attempts) {
            return Err(AppError::BadRequest(format!(
                "max_attempts must be between 1 and {}",
                MAX_AUTOMATIC_ATTEMPTS
            )));
        }

        let record = CommandRepository::new(self.db).create(params).await?;

        tracing::info!(
            "Queued command {} for {} (order {:?})",
            record.id,
            record.username,
            record.order_id
        );

        Ok(record)
    }

    /// Gets a specific queue record by ID
    pub async fn get_by_id(&self, id: i32) -> Result<Option<CommandRecord>, AppError> {
        Ok(CommandRepository::new(self.db).find_by_id(id).await?)
    }

    /// Gets paginated queue records, newest first
    ///
    /// # Arguments
    /// - `status` - Optional status filter (`pending`, `completed` or `failed`)
    ///
    /// # Returns
    /// - `Err(AppError::BadRequest)` - Unknown status filter
    pub async fn get_paginated(
        &self,
        status: Option<&str>,
        page: u64,
        per_page: u64,
    ) -> Result<PaginatedCommands, AppError> {
        let status = status
            .map(|value| {
                CommandStatus::parse(value)
                    .map_err(|_| AppError::BadRequest(format!("Unknown status '{}'", value)))
            })
            .transpose()?;

        let per_page = per_page.max(1);

        let (commands, total) = CommandRepository::new(self.db)
            .get_paginated(status, page, per_page)
            .await?;

        let total_pages = total.div_ceil(per_page);

        Ok(PaginatedCommands {
            commands,
            total,
            page,
            per_page,
            total_pages,
        })
    }
}
