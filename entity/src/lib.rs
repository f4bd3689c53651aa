//! SeaORM entity models for the command dispatcher database.

pub mod prelude;

pub mod command_queue;
pub mod setting;
