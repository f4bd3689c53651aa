//! Factory methods for creating test data.
//!
//! This module provides factory methods for creating test entities with sensible defaults,
//! reducing boilerplate in tests.
//!
//! # Basic Usage
//!
//! ```rust,ignore
//! use test_utils::factory;
//!
//! #[tokio::test]
//! async fn test_example() -> Result<(), sea_orm::DbErr> {
//!     let db = /* ... */;
//!
//!     // Create with defaults
//!     let command = factory::create_command(&db).await?;
//!
//!     // Customize through the builder
//!     let failed = factory::command_queue::CommandFactory::new(&db)
//!         .status("failed")
//!         .attempts(3)
//!         .build()
//!         .await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Available Factories
//!
//! - `command_queue` - Create command queue records
//! - `setting` - Create key/value settings
//! - `helpers` - Shared ID generation

pub mod command_queue;
pub mod helpers;
pub mod setting;

// Re-export commonly used factory functions for concise usage
pub use command_queue::create_command;
pub use setting::create_setting;
