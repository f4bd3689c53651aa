//! Database repository layer.
//!
//! Repositories use SeaORM entity models internally and return domain models to keep the
//! data layer separate from dispatcher logic. All queue-store and settings-store reads and
//! writes go through these repositories.

pub mod command_queue;
pub mod setting;

#[cfg(test)]
mod test;
