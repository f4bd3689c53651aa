use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(CommandQueue::Table)
                    .if_not_exists()
                    .col(pk_auto(CommandQueue::Id))
                    .col(string_null(CommandQueue::OrderId))
                    .col(string_null(CommandQueue::PackageId))
                    .col(string(CommandQueue::Username))
                    .col(text(CommandQueue::Command))
                    .col(string(CommandQueue::Status).default("pending"))
                    .col(integer(CommandQueue::Attempts).default(0))
                    .col(integer(CommandQueue::MaxAttempts).default(3))
                    .col(text_null(CommandQueue::ErrorMessage))
                    .col(text_null(CommandQueue::Response))
                    .col(string_null(CommandQueue::ClaimedBy))
                    .col(timestamp_null(CommandQueue::ClaimedAt))
                    .col(timestamp_null(CommandQueue::ExecutedAt))
                    .col(
                        timestamp(CommandQueue::CreatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .col(
                        timestamp(CommandQueue::UpdatedAt)
                            .default(Expr::current_timestamp())
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // Poll query: status filter ordered by creation time
        manager
            .create_index(
                Index::create()
                    .name("idx_command_queue_status_created_at")
                    .table(CommandQueue::Table)
                    .col(CommandQueue::Status)
                    .col(CommandQueue::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_command_queue_order_id")
                    .table(CommandQueue::Table)
                    .col(CommandQueue::OrderId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_command_queue_order_id")
                    .table(CommandQueue::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_command_queue_status_created_at")
                    .table(CommandQueue::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(CommandQueue::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum CommandQueue {
    Table,
    Id,
    OrderId,
    PackageId,
    Username,
    Command,
    Status,
    Attempts,
    MaxAttempts,
    ErrorMessage,
    Response,
    ClaimedBy,
    ClaimedAt,
    ExecutedAt,
    CreatedAt,
    UpdatedAt,
}
