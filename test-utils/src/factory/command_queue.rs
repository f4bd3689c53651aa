//! Command queue factory for creating test queue records.
//!
//! Records default to a fresh `pending` command with no attempts, matching what order
//! fulfilment inserts. Timestamps can be overridden to control FIFO ordering in tests.

use crate::factory::helpers::next_id;
use chrono::{DateTime, Utc};
use sea_orm::{ActiveModelTrait, ActiveValue, DatabaseConnection, DbErr};

/// Factory for creating test command queue records with customizable fields.
///
/// # Example
///
/// ```rust,ignore
/// use test_utils::factory::command_queue::CommandFactory;
///
/// let command = CommandFactory::new(&db)
///     .username("Steve")
///     .command("give Steve diamond 1")
///     .max_attempts(1)
///     .build()
///     .await?;
/// ```
pub struct CommandFactory<'a> {
    db: &'a DatabaseConnection,
    order_id: Option<String>,
    package_id: Option<String>,
    username: String,
    command: String,
    status: String,
    attempts: i32,
    max_attempts: i32,
    error_message: Option<String>,
    claimed_by: Option<String>,
    claimed_at: Option<DateTime<Utc>>,
    executed_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl<'a> CommandFactory<'a> {
    /// Creates a new CommandFactory with default values.
    ///
    /// Defaults:
    /// - username: `"Player{id}"` where id is auto-incremented
    /// - command: `"say hello Player{id}"`
    /// - status: `"pending"`
    /// - attempts: `0`, max_attempts: `3`
    /// - created_at: now
    ///
    /// # Arguments
    /// - `db` - Database connection for inserting the entity
    ///
    /// # Returns
    /// - `CommandFactory` - New factory instance with defaults
    pub fn new(db: &'a DatabaseConnection) -> Self {
        let id = next_id();
        Self {
            db,
            order_id: None,
            package_id: None,
            username: format!("Player{}", id),
            command: format!("say hello Player{}", id),
            status: "pending".to_string(),
            attempts: 0,
            max_attempts: 3,
            error_message: None,
            claimed_by: None,
            claimed_at: None,
            executed_at: None,
            created_at: Utc::now(),
        }
    }

    /// Sets the linked order ID.
    pub fn order_id(mut self, order_id: impl Into<String>) -> Self {
        self.order_id = Some(order_id.into());
        self
    }

    /// Sets the linked package ID.
    pub fn package_id(mut self, package_id: impl Into<String>) -> Self {
        self.package_id = Some(package_id.into());
        self
    }

    /// Sets the target player username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.username = username.into();
        self
    }

    /// Sets the literal console command.
    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Sets the stored status string (`pending`, `completed`, `failed`).
    pub fn status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Sets the number of attempts already consumed.
    pub fn attempts(mut self, attempts: i32) -> Self {
        self.attempts = attempts;
        self
    }

    /// Sets the attempt ceiling.
    pub fn max_attempts(mut self, max_attempts: i32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Sets the last error message.
    pub fn error_message(mut self, error_message: impl Into<String>) -> Self {
        self.error_message = Some(error_message.into());
        self
    }

    /// Marks the record as claimed by a dispatcher at the given time.
    pub fn claimed(mut self, claimed_by: impl Into<String>, claimed_at: DateTime<Utc>) -> Self {
        self.claimed_by = Some(claimed_by.into());
        self.claimed_at = Some(claimed_at);
        self
    }

    /// Sets the successful execution time.
    pub fn executed_at(mut self, executed_at: DateTime<Utc>) -> Self {
        self.executed_at = Some(executed_at);
        self
    }

    /// Sets the creation time, used for ordering.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Builds and inserts the command queue record into the database.
    ///
    /// # Returns
    /// - `Ok(entity::command_queue::Model)` - Created record
    /// - `Err(DbErr)` - Database error during insert
    pub async fn build(self) -> Result<entity::command_queue::Model, DbErr> {
        entity::command_queue::ActiveModel {
            order_id: ActiveValue::Set(self.order_id),
            package_id: ActiveValue::Set(self.package_id),
            username: ActiveValue::Set(self.username),
            command: ActiveValue::Set(self.command),
            status: ActiveValue::Set(self.status),
            attempts: ActiveValue::Set(self.attempts),
            max_attempts: ActiveValue::Set(self.max_attempts),
            error_message: ActiveValue::Set(self.error_message),
            response: ActiveValue::Set(None),
            claimed_by: ActiveValue::Set(self.claimed_by),
            claimed_at: ActiveValue::Set(self.claimed_at),
            executed_at: ActiveValue::Set(self.executed_at),
            created_at: ActiveValue::Set(self.created_at),
            updated_at: ActiveValue::Set(self.created_at),
            ..Default::default()
        }
        .insert(self.db)
        .await
    }
}

/// Creates a pending command record with default values.
///
/// # Returns
/// - `Ok(entity::command_queue::Model)` - Created record
/// - `Err(DbErr)` - Database error during insert
pub async fn create_command(
    db: &DatabaseConnection,
) -> Result<entity::command_queue::Model, DbErr> {
    CommandFactory::new(db).build().await
}
