//! Command queue domain models and parameters.
//!
//! A command record tracks one request to run a console command against the game server,
//! either generated by a store purchase or triggered manually by an administrator. The
//! dispatcher is the only writer once a record exists.

use chrono::{DateTime, Utc};
use sea_orm::DbErr;

use crate::model::command::{
    CommandDto, CommandResultDto, EnqueueCommandDto, PaginatedCommandsDto,
};

/// Attempt ceiling for records created by order fulfilment.
pub const DEFAULT_MAX_ATTEMPTS: i32 = 3;

/// Attempt ceiling for one-shot administrator commands.
pub const MANUAL_MAX_ATTEMPTS: i32 = 1;

/// Lifecycle state of a queued command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandStatus {
    /// Waiting for an attempt, possibly after earlier failures.
    Pending,
    /// Executed successfully. Terminal.
    Completed,
    /// Exhausted its attempts. Terminal unless an administrator retries it.
    Failed,
}

impl CommandStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Parses a stored status string.
    ///
    /// # Returns
    /// - `Ok(CommandStatus)` - Known status value
    /// - `Err(DbErr::Custom)` - Unknown status stored in the database
    pub fn parse(value: &str) -> Result<Self, DbErr> {
        match value {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            other => Err(DbErr::Custom(format!("Unknown command status '{}'", other))),
        }
    }
}

/// A command record with full data from the database.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandRecord {
    pub id: i32,
    pub order_id: Option<String>,
    pub package_id: Option<String>,
    /// Player the command acts upon.
    pub username: String,
    /// Literal console command line.
    pub command: String,
    pub status: CommandStatus,
    pub attempts: i32,
    pub max_attempts: i32,
    /// Last failure reason, cleared on success.
    pub error_message: Option<String>,
    /// Console output of the successful execution.
    pub response: Option<String>,
    /// Dispatcher instance currently holding the record, if any.
    pub claimed_by: Option<String>,
    pub claimed_at: Option<DateTime<Utc>>,
    /// Set only on successful completion.
    pub executed_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl CommandRecord {
    /// Converts an entity model to a command record at the repository boundary.
    ///
    /// # Arguments
    /// - `entity` - The entity model from the database
    ///
    /// # Returns
    /// - `Ok(CommandRecord)` - The converted record
    /// - `Err(DbErr::Custom)` - The stored status is not a known value
    pub fn from_entity(entity: entity::command_queue::Model) -> Result<Self, DbErr> {
        Ok(Self {
            id: entity.id,
            order_id: entity.order_id,
            package_id: entity.package_id,
            username: entity.username,
            command: entity.command,
            status: CommandStatus::parse(&entity.status)?,
            attempts: entity.attempts,
            max_attempts: entity.max_attempts,
            error_message: entity.error_message,
            response: entity.response,
            claimed_by: entity.claimed_by,
            claimed_at: entity.claimed_at,
            executed_at: entity.executed_at,
            created_at: entity.created_at,
            updated_at: entity.updated_at,
        })
    }

    /// Converts the record into the API representation.
    pub fn into_dto(self) -> CommandDto {
        CommandDto {
            id: self.id,
            order_id: self.order_id,
            package_id: self.package_id,
            username: self.username,
            command: self.command,
            status: self.status.as_str().to_string(),
            attempts: self.attempts,
            max_attempts: self.max_attempts,
            error_message: self.error_message,
            response: self.response,
            executed_at: self.executed_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// One page of queue records, newest first.
#[derive(Debug, Clone)]
pub struct PaginatedCommands {
    pub commands: Vec<CommandRecord>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

impl PaginatedCommands {
    pub fn into_dto(self) -> PaginatedCommandsDto {
        PaginatedCommandsDto {
            commands: self
                .commands
                .into_iter()
                .map(CommandRecord::into_dto)
                .collect(),
            total: self.total,
            page: self.page,
            per_page: self.per_page,
            total_pages: self.total_pages,
        }
    }
}

/// Parameters for inserting a new pending command.
#[derive(Debug, Clone)]
pub struct CreateCommandParams {
    pub order_id: Option<String>,
    pub package_id: Option<String>,
    pub username: String,
    pub command: String,
    pub max_attempts: i32,
}

impl CreateCommandParams {
    /// Parameters for a command enqueued by order fulfilment.
    pub fn from_dto(dto: EnqueueCommandDto) -> Self {
        Self {
            order_id: dto.order_id,
            package_id: dto.package_id,
            username: dto.username,
            command: dto.command,
            max_attempts: dto.max_attempts.unwrap_or(DEFAULT_MAX_ATTEMPTS),
        }
    }

    /// Parameters for a one-shot administrator command.
    pub fn manual(username: String, command: String) -> Self {
        Self {
            order_id: None,
            package_id: None,
            username,
            command,
            max_attempts: MANUAL_MAX_ATTEMPTS,
        }
    }
}

/// Outcome of a single execution attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandExecution {
    pub command_id: i32,
    pub success: bool,
    pub response: Option<String>,
    pub error: Option<String>,
}

impl CommandExecution {
    pub fn into_dto(self) -> CommandResultDto {
        CommandResultDto {
            command_id: self.command_id,
            success: self.success,
            response: self.response,
            error: self.error,
        }
    }
}
