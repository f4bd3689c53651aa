use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CommandDto {
    pub id: i32,
    pub order_id: Option<String>,
    pub package_id: Option<String>,
    pub username: String,
    pub command: String,
    pub status: String, // "pending" | "completed" | "failed"
    pub attempts: i32,
    pub max_attempts: i32,
    pub error_message: Option<String>,
    pub response: Option<String>,
    #[serde(with = "chrono::serde::ts_seconds_option")]
    pub executed_at: Option<DateTime<Utc>>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct PaginatedCommandsDto {
    pub commands: Vec<CommandDto>,
    pub total: u64,
    pub page: u64,
    pub per_page: u64,
    pub total_pages: u64,
}

/// Request body used by order fulfilment to queue a purchased package's command.
#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct EnqueueCommandDto {
    pub order_id: Option<String>,
    pub package_id: Option<String>,
    pub username: String,
    pub command: String,
    /// Defaults to 3 when omitted.
    pub max_attempts: Option<i32>,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct ManualCommandDto {
    pub username: String,
    pub command: String,
}

#[derive(Serialize, Deserialize, PartialEq, Clone, Debug, ToSchema)]
pub struct CommandResultDto {
    pub command_id: i32,
    pub success: bool,
    pub response: Option<String>,
    pub error: Option<String>,
}
