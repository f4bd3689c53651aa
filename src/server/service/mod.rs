//! Service layer for business logic and orchestration.
//!
//! This module contains the service layer of the application, which sits between the
//! controller (API) layer and the data (repository) layer. Services are responsible for:
//!
//! - **Dispatching**: Draining the command queue through the remote console executor
//! - **Validation**: Rejecting malformed enqueue and settings requests
//! - **Orchestration**: Coordinating repository calls with profile resolution

pub mod command;
pub mod dispatcher;
pub mod profile;
pub mod settings;
