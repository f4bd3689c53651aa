//! Command queue repository.
//!
//! Every state transition is a single conditional `UPDATE`, so concurrent dispatchers
//! polling the same table rely only on row-level atomicity. The claim step compares the
//! observed `attempts` value and the claim lease; a zero row count means someone else got
//! there first.

use chrono::{DateTime, Utc};
use sea_orm::{
    sea_query::Expr, ActiveModelTrait, ActiveValue, ColumnTrait, Condition, DatabaseConnection,
    DbErr, EntityTrait, ExprTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};

use crate::server::model::command::{CommandRecord, CommandStatus, CreateCommandParams};

use entity::command_queue::{ActiveModel, Column};

pub struct CommandRepository<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommandRepository<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Inserts a new pending command with no attempts.
    ///
    /// # Arguments
    /// - `params`: Target player, command line, optional order/package links, attempt ceiling
    ///
    /// # Returns
    /// - `Ok(CommandRecord)`: The created record
    /// - `Err(DbErr)`: Database error
    pub async fn create(&self, params: CreateCommandParams) -> Result<CommandRecord, DbErr> {
        let now = Utc::now();

        let entity = ActiveModel {
            order_id: ActiveValue::Set(params.order_id),
            package_id: ActiveValue::Set(params.package_id),
            username: ActiveValue::Set(params.username),
            command: ActiveValue::Set(params.command),
            status: ActiveValue::Set(CommandStatus::Pending.as_str().to_string()),
            attempts: ActiveValue::Set(0),
            max_attempts: ActiveValue::Set(params.max_attempts),
            error_message: ActiveValue::Set(None),
            response: ActiveValue::Set(None),
            claimed_by: ActiveValue::Set(None),
            claimed_at: ActiveValue::Set(None),
            executed_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        CommandRecord::from_entity(entity)
    }

    /// Gets a command by ID
    ///
    /// # Returns
    /// - `Ok(Some(CommandRecord))`: The record if found
    /// - `Ok(None)`: No record with that ID
    /// - `Err(DbErr)`: Database error
    pub async fn find_by_id(&self, id: i32) -> Result<Option<CommandRecord>, DbErr> {
        entity::prelude::CommandQueue::find_by_id(id)
            .one(self.db)
            .await?
            .map(CommandRecord::from_entity)
            .transpose()
    }

    /// Gets the oldest commands eligible for an automatic attempt.
    ///
    /// A command is eligible when it is pending, has fewer than `attempt_ceiling` attempts,
    /// has attempts left under its own `max_attempts`, and carries no claim newer than
    /// `lease_cutoff`. Results are ordered oldest first so a perpetually failing new record
    /// cannot starve older ones.
    ///
    /// # Arguments
    /// - `limit`: Maximum number of records to return
    /// - `attempt_ceiling`: Global automatic attempt ceiling
    /// - `lease_cutoff`: Claims taken before this instant are considered abandoned
    ///
    /// # Returns
    /// - `Ok(Vec<CommandRecord>)`: Up to `limit` eligible records
    /// - `Err(DbErr)`: Database error
    pub async fn get_executable(
        &self,
        limit: u64,
        attempt_ceiling: i32,
        lease_cutoff: DateTime<Utc>,
    ) -> Result<Vec<CommandRecord>, DbErr> {
        entity::prelude::CommandQueue::find()
            .filter(Column::Status.eq(CommandStatus::Pending.as_str()))
            .filter(Column::Attempts.lt(attempt_ceiling))
            .filter(Expr::col(Column::Attempts).lt(Expr::col(Column::MaxAttempts)))
            .filter(unclaimed_since(lease_cutoff))
            .order_by_asc(Column::CreatedAt)
            .order_by_asc(Column::Id)
            .limit(limit)
            .all(self.db)
            .await?
            .into_iter()
            .map(CommandRecord::from_entity)
            .collect()
    }

    /// Claims a pending command and counts the attempt in one conditional update.
    ///
    /// Only succeeds when the record is still pending, its attempt counter still equals
    /// `observed_attempts`, and no live claim exists. This runs before execution so a
    /// crash mid-execution still consumes the attempt.
    ///
    /// # Returns
    /// - `Ok(true)`: Claimed; `attempts` is now `observed_attempts + 1`
    /// - `Ok(false)`: Another dispatcher changed or holds the record
    /// - `Err(DbErr)`: Database error
    pub async fn claim(
        &self,
        id: i32,
        observed_attempts: i32,
        worker_id: &str,
        lease_cutoff: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::CommandQueue::update_many()
            .set(ActiveModel {
                attempts: ActiveValue::Set(observed_attempts + 1),
                claimed_by: ActiveValue::Set(Some(worker_id.to_string())),
                claimed_at: ActiveValue::Set(Some(now)),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.eq(CommandStatus::Pending.as_str()))
            .filter(Column::Attempts.eq(observed_attempts))
            .filter(unclaimed_since(lease_cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Marks a claimed command as completed and releases the claim.
    ///
    /// Sets `executed_at`, stores the console response and clears any previous error.
    ///
    /// # Returns
    /// - `Ok(true)`: Record updated
    /// - `Ok(false)`: The claim is no longer held by `worker_id`
    /// - `Err(DbErr)`: Database error
    pub async fn complete(
        &self,
        id: i32,
        worker_id: &str,
        response: String,
    ) -> Result<bool, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::CommandQueue::update_many()
            .set(ActiveModel {
                status: ActiveValue::Set(CommandStatus::Completed.as_str().to_string()),
                executed_at: ActiveValue::Set(Some(now)),
                error_message: ActiveValue::Set(None),
                response: ActiveValue::Set(Some(response)),
                claimed_by: ActiveValue::Set(None),
                claimed_at: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::ClaimedBy.eq(worker_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Records a failed attempt on a claimed command and releases the claim.
    ///
    /// # Arguments
    /// - `status`: `Pending` to leave the record eligible for another cycle, `Failed` when
    ///   its attempts are exhausted
    ///
    /// # Returns
    /// - `Ok(true)`: Record updated
    /// - `Ok(false)`: The claim is no longer held by `worker_id`
    /// - `Err(DbErr)`: Database error
    pub async fn record_failure(
        &self,
        id: i32,
        worker_id: &str,
        status: CommandStatus,
        error_message: String,
    ) -> Result<bool, DbErr> {
        let result = entity::prelude::CommandQueue::update_many()
            .set(ActiveModel {
                status: ActiveValue::Set(status.as_str().to_string()),
                error_message: ActiveValue::Set(Some(error_message)),
                claimed_by: ActiveValue::Set(None),
                claimed_at: ActiveValue::Set(None),
                updated_at: ActiveValue::Set(Utc::now()),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::ClaimedBy.eq(worker_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Reopens and claims a non-completed command for one administrator-requested attempt.
    ///
    /// Resets the status to pending, raises `max_attempts` (the caller passes at least
    /// `observed_attempts + 1`), counts the attempt and takes the claim in one conditional
    /// update, so a lost race leaves the record untouched.
    ///
    /// # Returns
    /// - `Ok(true)`: Claimed; `attempts` is now `observed_attempts + 1`
    /// - `Ok(false)`: Record completed meanwhile, changed, or holds a live claim
    /// - `Err(DbErr)`: Database error
    pub async fn claim_for_retry(
        &self,
        id: i32,
        observed_attempts: i32,
        max_attempts: i32,
        worker_id: &str,
        lease_cutoff: DateTime<Utc>,
    ) -> Result<bool, DbErr> {
        let now = Utc::now();

        let result = entity::prelude::CommandQueue::update_many()
            .set(ActiveModel {
                status: ActiveValue::Set(CommandStatus::Pending.as_str().to_string()),
                attempts: ActiveValue::Set(observed_attempts + 1),
                max_attempts: ActiveValue::Set(max_attempts),
                claimed_by: ActiveValue::Set(Some(worker_id.to_string())),
                claimed_at: ActiveValue::Set(Some(now)),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .filter(Column::Id.eq(id))
            .filter(Column::Status.ne(CommandStatus::Completed.as_str()))
            .filter(Column::Attempts.eq(observed_attempts))
            .filter(unclaimed_since(lease_cutoff))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected == 1)
    }

    /// Gets paginated commands, newest first, optionally filtered by status
    ///
    /// # Returns
    /// - `Ok((Vec<CommandRecord>, u64))`: Page of records and the total matching count
    /// - `Err(DbErr)`: Database error
    pub async fn get_paginated(
        &self,
        status: Option<CommandStatus>,
        page: u64,
        per_page: u64,
    ) -> Result<(Vec<CommandRecord>, u64), DbErr> {
        let mut query = entity::prelude::CommandQueue::find();

        if let Some(status) = status {
            query = query.filter(Column::Status.eq(status.as_str()));
        }

        let paginator = query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .paginate(self.db, per_page);
        let total = paginator.num_items().await?;
        let commands = paginator
            .fetch_page(page)
            .await?
            .into_iter()
            .map(CommandRecord::from_entity)
            .collect::<Result<Vec<_>, _>>()?;

        Ok((commands, total))
    }
}

/// No claim, or a claim older than the lease.
fn unclaimed_since(lease_cutoff: DateTime<Utc>) -> Condition {
    Condition::any()
        .add(Column::ClaimedAt.is_null())
        .add(Column::ClaimedAt.lt(lease_cutoff))
}
